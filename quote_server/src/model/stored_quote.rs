//! Persisted form of a quote.
//!
//! A `StoredQuote` is what one successful request leaves behind in the store: the
//! provider's record, unchanged, plus an id assigned by the store and the UTC
//! creation/update timestamps written at insert time.

use chrono::{DateTime, Utc};
use quote_common::QuoteRecord;

/// One row of the `quotes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuote {
    /// Store-assigned identifier.
    pub id: i64,
    /// Insert time.
    pub created_at: DateTime<Utc>,
    /// Last update time; equal to `created_at` since rows are never mutated.
    pub updated_at: DateTime<Utc>,
    /// The quote exactly as fetched.
    pub record: QuoteRecord,
}
