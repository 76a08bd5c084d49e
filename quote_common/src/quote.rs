//! Quote payloads shared by the service and its client.
//!
//! Every numeric-looking field is kept as the provider's own text, so a bid of
//! `"5.4321"` travels through fetch, persistence and the client artifact without
//! being reformatted.
use serde::{Deserialize, Serialize};

use crate::result::Result;

/// Normalized USD→BRL quote as published by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Base currency code (`USD`).
    pub code: String,
    /// Counter currency code (`BRL`).
    pub codein: String,
    /// Display name, e.g. `Dólar Americano/Real Brasileiro`.
    pub name: String,
    /// Session high.
    pub high: String,
    /// Session low.
    pub low: String,
    /// Absolute bid variation.
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// Percent change.
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// Bid price.
    pub bid: String,
    /// Ask price.
    pub ask: String,
    /// Provider timestamp (seconds since epoch, as text).
    pub timestamp: String,
    /// Provider creation date, as text.
    pub create_date: String,
}

/// Provider response wrapper: `{"USDBRL": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEnvelope {
    /// The USD→BRL quote.
    #[serde(rename = "USDBRL")]
    pub usdbrl: QuoteRecord,
}

impl ProviderEnvelope {
    /// Decodes a raw provider body into a `QuoteRecord`.
    ///
    /// All eleven fields are required; a missing or mistyped field is a decode
    /// error and no partial record is produced.
    pub fn decode(body: &[u8]) -> Result<QuoteRecord> {
        let envelope: ProviderEnvelope = serde_json::from_slice(body)?;
        Ok(envelope.usdbrl)
    }
}

/// The minimal quote served to downstream callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// Bid price, verbatim from the provider.
    pub bid: String,
}

impl From<&QuoteRecord> for QuoteSummary {
    fn from(record: &QuoteRecord) -> Self {
        QuoteSummary {
            bid: record.bid.clone(),
        }
    }
}
