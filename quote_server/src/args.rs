//! Command-line arguments for the quote server.
//!
//! Every flag has a default and an environment override, so the binary runs
//! with no arguments at all. See `main` for how they are applied.
use clap::Parser;
use quote_common::deadline::{DEFAULT_PROVIDER_DEADLINE_MS, DEFAULT_STORE_DEADLINE_MS};
use quote_common::net::{PROVIDER_URL, SERVICE_PORT, addr};
use quote_common::Deadline;

use crate::ServerConfig;
use crate::service::ServiceDeadlines;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "USD-BRL quote service", long_about = None)]
pub struct Args {
    /// Address the HTTP endpoint binds to.
    #[clap(long, env = "QUOTE_SERVER_BIND", default_value_t = addr("0.0.0.0", SERVICE_PORT))]
    pub bind: String,

    /// External quote source.
    #[clap(long, env = "QUOTE_PROVIDER_URL", default_value = PROVIDER_URL)]
    pub provider_url: String,

    /// SQLite database file.
    #[clap(long, env = "QUOTE_DB_PATH", default_value = "quotes.db")]
    pub db_path: String,

    /// Budget for one provider fetch, in milliseconds.
    #[clap(long, env = "QUOTE_PROVIDER_DEADLINE_MS", default_value_t = DEFAULT_PROVIDER_DEADLINE_MS)]
    pub provider_deadline_ms: u64,

    /// Budget for one store write, in milliseconds.
    #[clap(long, env = "QUOTE_STORE_DEADLINE_MS", default_value_t = DEFAULT_STORE_DEADLINE_MS)]
    pub store_deadline_ms: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            bind: args.bind.trim().to_string(),
            provider_url: args.provider_url.trim().to_string(),
            db_path: args.db_path.trim().into(),
            deadlines: ServiceDeadlines {
                provider: Deadline::from_millis(args.provider_deadline_ms),
                store: Deadline::from_millis(args.store_deadline_ms),
            },
        }
    }
}
