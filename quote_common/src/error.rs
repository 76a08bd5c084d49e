//! Error types shared between client and server.
//!
//! The `QuoteError` enum is the single failure taxonomy of the pipeline. Every tier
//! fails closed: an adapter error aborts the service request, a service error aborts
//! the client run. `ErrorKind` is the flat, wire-friendly tag reported to callers.
use std::io;
use std::time::Duration;

use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A deadline elapsed before the named operation completed.
    #[error("Timeout: {operation} did not complete within {} ms", .budget.as_millis())]
    Timeout {
        /// Short name of the cancelled operation (e.g. `provider fetch`).
        operation: &'static str,
        /// The budget that was exceeded.
        budget: Duration,
    },

    /// A response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Connection-level failure reaching a peer, or a peer answering with a failure status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Persistence rejected the record or could not complete the write.
    #[error("Store error: {0}")]
    Store(String),

    /// The client could not manage its local artifact.
    #[error("Local I/O error: {0}")]
    LocalIo(#[from] io::Error),

    /// The quote service answered with a non-success status.
    #[error("Quote service failed with status {status}: {message}")]
    ServiceFailure {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body, as received.
        message: String,
    },
}

/// Flat classification of a [`QuoteError`], used in error payloads and logs.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    Decode,
    Transport,
    Store,
    LocalIo,
    ServiceFailure,
}

impl QuoteError {
    /// Builds a `Timeout` for `operation` with the exceeded `budget`.
    pub fn timeout(operation: &'static str, budget: Duration) -> Self {
        QuoteError::Timeout { operation, budget }
    }

    /// Returns the flat kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteError::Timeout { .. } => ErrorKind::Timeout,
            QuoteError::Decode(_) => ErrorKind::Decode,
            QuoteError::Transport(_) => ErrorKind::Transport,
            QuoteError::Store(_) => ErrorKind::Store,
            QuoteError::LocalIo(_) => ErrorKind::LocalIo,
            QuoteError::ServiceFailure { .. } => ErrorKind::ServiceFailure,
        }
    }

    /// `true` if this error is a deadline violation.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QuoteError::Timeout { .. })
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            QuoteError::Decode(err.to_string())
        } else {
            QuoteError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_is_snake_case_on_the_wire() {
        assert_eq!(ErrorKind::LocalIo.to_string(), "local_io");
        assert_eq!(ErrorKind::ServiceFailure.to_string(), "service_failure");
        assert_eq!(ErrorKind::from_str("timeout").unwrap(), ErrorKind::Timeout);
    }

    #[test]
    fn timeout_message_names_operation_and_budget() {
        let err = QuoteError::timeout("store write", Duration::from_millis(10));
        assert!(err.is_timeout());
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(
            err.to_string(),
            "Timeout: store write did not complete within 10 ms"
        );
    }

    #[test]
    fn json_errors_classify_as_decode() {
        let err: QuoteError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
