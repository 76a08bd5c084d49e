//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use quote_common::deadline::DEFAULT_CLIENT_DEADLINE_MS;
use quote_common::net::{SERVICE_PORT, quote_url};
use quote_common::Deadline;

use crate::ClientConfig;
use crate::artifact::DEFAULT_ARTIFACT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Full URL of the quote service endpoint.
    #[clap(long, env = "QUOTE_SERVER_URL", default_value_t = quote_url("localhost", SERVICE_PORT))]
    pub server_url: String,

    /// File the quote line is written to. Replaced on every run.
    #[clap(long, env = "QUOTE_OUTPUT", default_value = DEFAULT_ARTIFACT)]
    pub output: String,

    /// Budget for the call to the quote service, in milliseconds.
    #[clap(long, env = "QUOTE_CLIENT_DEADLINE_MS", default_value_t = DEFAULT_CLIENT_DEADLINE_MS)]
    pub deadline_ms: u64,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        ClientConfig {
            server_url: args.server_url.trim().replace('"', ""),
            output: normalize_path(&args.output),
            deadline: Deadline::from_millis(args.deadline_ms),
        }
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> std::path::PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    std::path::PathBuf::from(no_quotes)
}
