//! Quote request orchestration.
//!
//! `QuoteService` owns the second- and third-tier deadlines and runs the two
//! downstream calls strictly in sequence: fetch, then persist. A quote is only
//! served once it has been both fetched and persisted; any failure aborts the
//! request with no partial result.
use std::sync::Arc;

use log::{info, warn};
use quote_common::deadline::{
    DEFAULT_CLIENT_DEADLINE_MS, DEFAULT_PROVIDER_DEADLINE_MS, DEFAULT_STORE_DEADLINE_MS,
};
use quote_common::{Deadline, QuoteSummary, Result};

use crate::provider::QuoteProvider;
use crate::store::QuoteStore;

/// Independent budgets for the service's downstream calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDeadlines {
    /// Budget for the provider fetch (default 200 ms).
    pub provider: Deadline,
    /// Budget for the store write (default 10 ms).
    pub store: Deadline,
}

impl Default for ServiceDeadlines {
    fn default() -> Self {
        Self {
            provider: Deadline::from_millis(DEFAULT_PROVIDER_DEADLINE_MS),
            store: Deadline::from_millis(DEFAULT_STORE_DEADLINE_MS),
        }
    }
}

impl ServiceDeadlines {
    /// Logs a warning when the downstream budgets add up to more than the
    /// default client budget. Nothing is adjusted; each tier stays as configured.
    pub fn check_against_client_default(&self) {
        let client = Deadline::from_millis(DEFAULT_CLIENT_DEADLINE_MS).budget();
        let total = self.provider.budget() + self.store.budget();
        if total >= client {
            warn!(
                "Provider ({} ms) + store ({} ms) budgets reach the default client budget ({} ms); \
                 slow but successful requests may time out at the client",
                self.provider.budget().as_millis(),
                self.store.budget().as_millis(),
                client.as_millis()
            );
        }
    }
}

/// Fetch-persist-serve pipeline behind the `/cotacao` endpoint.
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    store: Arc<dyn QuoteStore>,
    deadlines: ServiceDeadlines,
}

impl QuoteService {
    /// Wires a service from its two collaborators and their budgets.
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        store: Arc<dyn QuoteStore>,
        deadlines: ServiceDeadlines,
    ) -> Self {
        Self {
            provider,
            store,
            deadlines,
        }
    }

    /// Handles one quote request.
    ///
    /// The store is never called if the fetch failed, and no summary is returned
    /// if the store failed.
    pub async fn handle_quote_request(&self) -> Result<QuoteSummary> {
        let record = self.provider.fetch_quote(self.deadlines.provider).await?;
        let id = self.store.persist(&record, self.deadlines.store).await?;
        info!("Quote {} persisted: {}{} bid={}", id, record.code, record.codein, record.bid);
        Ok(QuoteSummary::from(&record))
    }
}
