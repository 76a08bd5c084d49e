//! USD→BRL quote service.
//!
//! The service exposes `GET /cotacao`. Each request runs one fetch from the
//! external provider, then one insert into the quote store, and only then serves
//! the bid. The building blocks are:
//!
//! - `provider` — `QuoteProvider` seam and the reqwest-backed `HttpQuoteProvider`.
//! - `store` — `QuoteStore` seam and the rusqlite-backed `SqliteQuoteStore`.
//! - `service` — `QuoteService`, the sequential fetch → persist → serve pipeline,
//!   and the per-tier `ServiceDeadlines`.
//! - `api` — the axum router and the mapping from `QuoteError` to HTTP status.
//!
//! Every downstream call carries its own deadline; none is derived from another.
//! A failure at any tier fails the request closed and is reported with a
//! non-success status, while the server keeps accepting new requests.
#![warn(missing_docs)]
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};
use quote_common::{QuoteError, Result};
use tokio::net::TcpListener;

pub mod api;
pub mod args;
pub mod model;
pub mod provider;
pub mod service;
pub mod store;

use crate::provider::HttpQuoteProvider;
use crate::service::{QuoteService, ServiceDeadlines};
use crate::store::SqliteQuoteStore;

/// Startup configuration, read once and passed down explicitly.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, `ip:port`.
    pub bind: String,
    /// External quote source URL.
    pub provider_url: String,
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Per-tier budgets.
    pub deadlines: ServiceDeadlines,
}

/// Opens the store and wires the production service.
pub fn build_service(config: &ServerConfig) -> Result<QuoteService> {
    let store = SqliteQuoteStore::open(&config.db_path)?;
    info!("Quote store holds {} quotes", store.count()?);
    let provider = HttpQuoteProvider::new(config.provider_url.clone());
    config.deadlines.check_against_client_default();
    Ok(QuoteService::new(
        Arc::new(provider),
        Arc::new(store),
        config.deadlines,
    ))
}

/// Serves `service` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, service: QuoteService, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .map_err(|e| QuoteError::Transport(e.to_string()))?;
    info!("Quote service listening on {}", local_addr);
    let router = api::app_router(Arc::new(service));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| QuoteError::Transport(format!("server on {} failed: {}", local_addr, e)))
}

/// Binds `config.bind` and serves until Ctrl+C.
pub async fn run(config: ServerConfig) -> Result<()> {
    let service = build_service(&config)?;
    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| QuoteError::Transport(format!("cannot bind {}: {}", config.bind, e)))?;
    serve(listener, service, shutdown_signal()).await
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed the server
/// keeps running until the process is killed.
async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Ctrl+C received. Shutting down quote service..."),
        Err(e) => {
            error!("Cannot listen for Ctrl+C, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
