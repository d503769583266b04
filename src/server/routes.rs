//! Request handlers for the extraction API

use super::{ApiError, AppState};
use crate::csv::csv_document;
use crate::decode::text_from_upload;
use crate::error::ExtractError;
use crate::extractor::ExtractionReport;
use crate::types::{
    CsvRequest, ExtractionResult, HistoryResponse, StoredExtraction, TextRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Serialize)]
pub struct StatusResponse {
    success: bool,
}

/// Map a body rejection to the failure contract
///
/// Oversized bodies keep their 413; anything else (missing body, wrong
/// content type, malformed or mistyped JSON) collapses to the endpoint's
/// own validation error.
fn map_json_rejection(rejection: &JsonRejection, err: ExtractError) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, rejection.body_text())
    } else {
        err.into()
    }
}

/// Extract emails from an uploaded file and persist the job
pub async fn extract_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::new(e.status(), format!("Failed to read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or(ExtractError::MissingFile)?;
    if filename.is_empty() {
        return Err(ExtractError::EmptyFilename.into());
    }

    debug!(filename = %filename, size = bytes.len(), "Processing upload");

    let text = text_from_upload(&filename, &bytes)?;
    let report = ExtractionReport::extract(&text);

    let snapshot = StoredExtraction::new(filename, &report);
    let files = state.store.record(&snapshot).await?;

    Ok(Json(ExtractionResult::from_report(report, Some(files))))
}

/// Extract emails from pasted text and persist the job
pub async fn extract_text(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let Json(request) =
        payload.map_err(|r| map_json_rejection(&r, ExtractError::MissingText))?;
    if request.text.trim().is_empty() {
        return Err(ExtractError::MissingText.into());
    }

    let report = ExtractionReport::extract(&request.text);

    let snapshot = StoredExtraction::new("Pasted Text", &report);
    let files = state.store.record(&snapshot).await?;

    Ok(Json(ExtractionResult::from_report(report, Some(files))))
}

/// Materialize a CSV directly from a caller-supplied email list
pub async fn download_csv(
    payload: Result<Json<CsvRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|r| map_json_rejection(&r, ExtractError::MissingEmails))?;
    if request.emails.is_empty() {
        return Err(ExtractError::MissingEmails.into());
    }

    let document = csv_document(&request.emails);
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let disposition = format!("attachment; filename=\"extracted_emails_{stamp}.csv\"");

    Ok((
        [
            (CONTENT_TYPE, "text/csv".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}

/// Download a stored artifact by filename
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = state.store.resolve(&filename).await?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(ExtractError::Storage)?;

    let content_type = if filename.ends_with(".json") {
        "application/json"
    } else {
        "text/csv"
    };
    let disposition = format!("attachment; filename=\"{filename}\"");

    Ok((
        [
            (CONTENT_TYPE, content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// List recorded extraction jobs, most recent first
pub async fn history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let extractions = state.store.list().await?;
    Ok(Json(HistoryResponse {
        success: true,
        extractions,
    }))
}

/// Remove every recorded job; succeeds on an already-empty store
pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.store.clear().await?;
    info!("History cleared");
    Ok(Json(StatusResponse { success: true }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    output_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Liveness check: verifies the output directory is writable
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let output_dir = state.store.output_dir().display().to_string();

    let probe = state.store.output_dir().join(".health_probe");
    let writable = match tokio::fs::write(&probe, b"ok").await {
        Ok(()) => {
            let _ = tokio::fs::remove_file(&probe).await;
            Ok(())
        }
        Err(e) => Err(e),
    };

    match writable {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                output_dir,
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                output_dir,
                error: Some(format!("Output directory not writable: {e}")),
            }),
        ),
    }
}
