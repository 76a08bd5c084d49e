//! Domain models owned by the quote server.
//!
//! - `stored_quote` — the persisted row: a `QuoteRecord` plus store bookkeeping.

pub mod stored_quote;
