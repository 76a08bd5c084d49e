//! Quote Client: fetches the current USD→BRL bid from the quote service and writes
//! it to a local artifact.
//!
//! One invocation performs exactly one call to the service under its own deadline,
//! then replaces the artifact. Any failure is returned to the caller; there is no
//! fallback to an earlier artifact.
#![warn(missing_docs)]
use std::path::PathBuf;

use log::info;
use quote_common::{Deadline, QuoteSummary, Result};

pub mod args;
pub mod artifact;
pub mod fetcher;

use crate::artifact::write_artifact;
use crate::fetcher::QuoteFetcher;

/// Startup configuration, read once and passed down explicitly.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the `/cotacao` endpoint.
    pub server_url: String,
    /// Artifact path.
    pub output: PathBuf,
    /// Budget for the service call.
    pub deadline: Deadline,
}

/// Fetches the quote and writes the artifact.
///
/// The artifact is only touched once the service call has succeeded.
pub async fn run(config: &ClientConfig) -> Result<QuoteSummary> {
    let summary = QuoteFetcher::new(config.server_url.clone())
        .fetch_summary(config.deadline)
        .await?;
    info!("Received bid {}", summary.bid);
    write_artifact(&config.output, &summary.bid)?;
    Ok(summary)
}
