//! Per-call time budgets.
//!
//! Every cross-tier call runs under its own `Deadline`. Budgets are configured
//! independently for each tier; a deadline is never derived from the caller's
//! remaining time. When a budget elapses the in-flight future is dropped, which
//! cancels it, and the call reports `QuoteError::Timeout`. A late result is never
//! observed.
use std::future::Future;
use std::time::Duration;

use crate::error::QuoteError;
use crate::result::Result;

/// Default budget for the client → service call, in milliseconds.
pub const DEFAULT_CLIENT_DEADLINE_MS: u64 = 300;
/// Default budget for the service → provider fetch, in milliseconds.
pub const DEFAULT_PROVIDER_DEADLINE_MS: u64 = 200;
/// Default budget for the service → store write, in milliseconds.
pub const DEFAULT_STORE_DEADLINE_MS: u64 = 10;

/// Relative time bound for a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    budget: Duration,
}

impl Deadline {
    /// Creates a deadline that elapses `budget` after the operation starts.
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// Shorthand for [`Deadline::new`] with a millisecond budget.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// The configured budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// `true` for a zero budget; such a deadline fails every call immediately.
    pub fn is_expired(&self) -> bool {
        self.budget.is_zero()
    }

    /// Runs `fut` under this deadline.
    ///
    /// An already expired deadline returns `Timeout` without polling `fut` at all,
    /// so a zero budget can never race a future that happens to be ready.
    pub async fn run<T, F>(self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_expired() {
            return Err(QuoteError::timeout(operation, self.budget));
        }
        match tokio::time::timeout(self.budget, fut).await {
            Ok(result) => result,
            Err(_) => Err(QuoteError::timeout(operation, self.budget)),
        }
    }
}
