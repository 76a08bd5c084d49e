//! Quote service binary.
//!
//! Parses `Args`, initializes logging and runs the HTTP endpoint until Ctrl+C.
//!
//! Usage example (CLI):
//! ```bash
//! quote_server --bind 0.0.0.0:8080 --db-path ./quotes.db --provider-deadline-ms 200
//! ```
use clap::Parser;
use log::error;
use quote_common::Result;
use quote_server::ServerConfig;
use quote_server::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let config: ServerConfig = Args::parse().into();
    if let Err(e) = quote_server::run(config).await {
        error!("Quote service stopped: {}", e);
        return Err(e);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
