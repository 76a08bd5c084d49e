//! HTTP surface of the quote service.
//!
//! A single route, `GET /cotacao`, answers `200 {"bid": ".."}` on success. Every
//! failure carries a non-success status and a structured body
//! `{"kind": "..", "message": ".."}`; the service keeps serving later requests.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use quote_common::net::QUOTE_PATH;
use quote_common::{ErrorKind, QuoteError, QuoteSummary};
use serde::Serialize;
use thiserror::Error;

use crate::service::QuoteService;

/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub QuoteError);

#[derive(Serialize)]
struct ErrorBody {
    kind: String,
    message: String,
}

impl ApiError {
    /// Status code reported for this failure.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::Decode | ErrorKind::Transport => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            kind: self.0.kind().to_string(),
            message: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

/// Result type of HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Builds the service router.
pub fn app_router(service: Arc<QuoteService>) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(get_quote))
        .with_state(service)
}

async fn get_quote(State(service): State<Arc<QuoteService>>) -> ApiResult<Json<QuoteSummary>> {
    match service.handle_quote_request().await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            error!("Quote request failed: {}", e);
            Err(ApiError(e))
        }
    }
}
