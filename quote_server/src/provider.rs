//! Outbound adapter for the external USD→BRL quote source.
//!
//! One `fetch_quote` call issues exactly one GET and never retries. The whole
//! exchange (connect, headers, body, decode) runs under the caller's `Deadline`;
//! when it elapses the request future is dropped and the call fails with
//! `QuoteError::Timeout`.
use async_trait::async_trait;
use log::{debug, error};
use quote_common::quote::ProviderEnvelope;
use quote_common::{Deadline, QuoteError, QuoteRecord, Result};
use reqwest::Client;

/// Operation name reported in provider timeouts.
pub const FETCH_OPERATION: &str = "provider fetch";

/// Source of normalized quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches and decodes one quote within `deadline`.
    ///
    /// Returns either a fully populated record or an error, never a partial record.
    async fn fetch_quote(&self, deadline: Deadline) -> Result<QuoteRecord>;
}

/// JSON-over-HTTP provider backed by `reqwest`.
pub struct HttpQuoteProvider {
    url: String,
    client: Client,
}

impl HttpQuoteProvider {
    /// Creates a provider that queries `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    /// Creates a provider that reuses an existing HTTP client.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    async fn request(&self) -> Result<QuoteRecord> {
        debug!("Requesting quote from {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Transport(format!(
                "provider answered with status {}",
                status
            )));
        }
        let body = response.bytes().await?;
        ProviderEnvelope::decode(&body)
    }
}

#[async_trait]
impl QuoteProvider for HttpQuoteProvider {
    async fn fetch_quote(&self, deadline: Deadline) -> Result<QuoteRecord> {
        let result = deadline.run(FETCH_OPERATION, self.request()).await;
        if let Err(e) = &result {
            error!("Error during provider call to {}: {}", self.url, e);
        }
        result
    }
}
