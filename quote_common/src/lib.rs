//!
//! Common types and utilities shared by the quote server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` and its flat `ErrorKind`.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — provider record, provider envelope and the served summary.
//! - `deadline` — per-call time budgets and their defaults.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod quote;
pub mod result;

pub use deadline::Deadline;
pub use error::{ErrorKind, QuoteError};
pub use quote::{QuoteRecord, QuoteSummary};
pub use result::Result;
