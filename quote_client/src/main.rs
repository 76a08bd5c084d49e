//! Quote Client binary: one request to the quote service, one artifact write.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client --server-url http://localhost:8080/cotacao --output ./cotacao.txt --deadline-ms 300
//! ```
//!
//! Any failure is logged and the process exits with a non-zero status.
use clap::Parser;
use log::error;
use quote_client::args::Args;
use quote_client::artifact::render;
use quote_client::{ClientConfig, run};
use quote_common::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let config: ClientConfig = Args::parse().into();

    match run(&config).await {
        Ok(summary) => {
            println!("{}", render(&summary.bid));
            Ok(())
        }
        Err(e) => {
            error!("Error while fetching the dollar quote: {}", e);
            Err(e)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
