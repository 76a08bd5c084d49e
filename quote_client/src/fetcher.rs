//! Fetching the quote summary from the quote service over HTTP.
//!
//! The call runs under the client's own deadline. A non-success answer from the
//! service is surfaced as `QuoteError::ServiceFailure` with the status and body,
//! never decoded as a quote.
use log::{debug, info};
use quote_common::{Deadline, QuoteError, QuoteSummary, Result};
use reqwest::Client;

/// Operation name reported in client timeouts.
pub const FETCH_OPERATION: &str = "quote service call";

/// Helper type for calling the quote endpoint.
pub struct QuoteFetcher {
    url: String,
    client: Client,
}

impl QuoteFetcher {
    /// Creates a fetcher for the endpoint at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }

    /// Calls the endpoint once within `deadline`.
    pub async fn fetch_summary(&self, deadline: Deadline) -> Result<QuoteSummary> {
        info!(
            "Requesting quote from {} ({} ms budget)",
            self.url,
            deadline.budget().as_millis()
        );
        deadline.run(FETCH_OPERATION, self.request()).await
    }

    async fn request(&self) -> Result<QuoteSummary> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(QuoteError::ServiceFailure {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        debug!("Service answered: {}", String::from_utf8_lossy(&body));
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use quote_common::ErrorKind;
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/cotacao", addr)
    }

    #[tokio::test]
    async fn decodes_the_bid() {
        let url = serve(Router::new().route("/cotacao", get(|| async { r#"{"bid":"5.4321"}"# }))).await;

        let summary = QuoteFetcher::new(url)
            .fetch_summary(Deadline::from_millis(2_000))
            .await
            .unwrap();

        assert_eq!(summary.bid, "5.4321");
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let url = serve(Router::new().route(
            "/cotacao",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                r#"{"bid":"5.4321"}"#
            }),
        ))
        .await;

        let err = QuoteFetcher::new(url)
            .fetch_summary(Deadline::from_millis(50))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn failure_status_is_not_decoded() {
        let url = serve(Router::new().route(
            "/cotacao",
            get(|| async {
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    r#"{"kind":"timeout","message":"provider fetch"}"#,
                )
            }),
        ))
        .await;

        let err = QuoteFetcher::new(url)
            .fetch_summary(Deadline::from_millis(2_000))
            .await
            .unwrap_err();

        match err {
            QuoteError::ServiceFailure { status, message } => {
                assert_eq!(status, 504);
                assert!(message.contains("timeout"));
            }
            other => panic!("expected service failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_body_is_a_decode_error() {
        let url = serve(Router::new().route("/cotacao", get(|| async { "Error during request." }))).await;

        let err = QuoteFetcher::new(url)
            .fetch_summary(Deadline::from_millis(2_000))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn zero_deadline_fails_immediately() {
        let err = QuoteFetcher::new("http://127.0.0.1:9/cotacao")
            .fetch_summary(Deadline::from_millis(0))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
    }
}
