//! HTTP surface: application state, router assembly, error responses

pub mod routes;

use crate::error::ExtractError;
use crate::store::HistoryStore;
use axum::body::to_bytes;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Cap on error bodies rewrapped by [`json_error_responses`]
const MAX_ERROR_BODY: usize = 16 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: HistoryStore,
}

/// Build the application router
pub fn build_app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/extract", post(routes::extract_file))
        .route("/api/extract-text", post(routes::extract_text))
        .route("/api/download-csv", post(routes::download_csv))
        .route("/api/download/:filename", get(routes::download))
        .route("/api/history", get(routes::history))
        .route("/api/clear-history", post(routes::clear_history))
        .route("/health", get(routes::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(json_error_responses))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Rewrap any plain-text error response into the failure body shape
///
/// Covers responses produced outside the handlers: the body-limit 413,
/// unmatched routes, method mismatches. Error responses that already carry
/// JSON pass through untouched.
async fn json_error_responses(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    let message = match to_bytes(response.into_body(), MAX_ERROR_BODY).await {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).into_owned(),
        _ => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    (
        status,
        Json(ErrorBody {
            success: false,
            error: message,
        }),
    )
        .into_response()
}

/// Failure body, always `{ "success": false, "error": "<message>" }`
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

/// Error response carrying a status code and a human-readable message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        let status = if matches!(err, ExtractError::NotFound) {
            StatusCode::NOT_FOUND
        } else if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %err, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            success: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
