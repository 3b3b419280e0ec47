//! Axum route handlers for document upload: validation and raw text extraction.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::classifier::classify;
use crate::errors::AppError;
use crate::extraction::{ExtractedText, ExtractionError, RawDocument};
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /validate-resume
///
/// Extracts the upload's text and runs the keyword classifier. Extraction
/// failures are reported in the body as `valid: false`, not as an HTTP error.
pub async fn handle_validate_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ValidateResponse>, AppError> {
    let document = read_document(multipart).await?;

    let extracted = match extract_off_thread(&state, document).await {
        Ok(extracted) => extracted,
        Err(e) => {
            info!("Validation upload could not be read: {e}");
            return Ok(Json(ValidateResponse {
                valid: false,
                message: Some(format!("Error reading PDF: {e}")),
                matches: None,
            }));
        }
    };

    let verdict = classify(&extracted.text());
    info!(
        "Classified upload: pages={}, matches={}, is_resume={}",
        extracted.page_count(),
        verdict.matched_keyword_count,
        verdict.is_resume
    );

    Ok(Json(ValidateResponse {
        valid: verdict.is_resume,
        message: verdict.message,
        matches: Some(verdict.matched_keyword_count),
    }))
}

/// POST /extract
///
/// Returns the upload's concatenated page text.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let document = read_document(multipart).await?;
    let extracted = extract_off_thread(&state, document).await?;
    Ok(Json(ExtractResponse {
        text: extracted.text(),
    }))
}

/// Runs the extractor on the blocking pool; PDF decoding is CPU-bound.
async fn extract_off_thread(
    state: &AppState,
    document: RawDocument,
) -> Result<ExtractedText, ExtractionError> {
    let extractor = state.extractor.clone();
    tokio::task::spawn_blocking(move || extractor.extract(document))
        .await
        .map_err(|e| ExtractionError::Decode(format!("extraction task failed: {e}")))?
}

/// Reads the `file` field of a multipart upload. Other fields are ignored.
async fn read_document(mut multipart: Multipart) -> Result<RawDocument, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let media_type = field.content_type().map(String::from);
        let file_name = field.file_name().map(String::from);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(RawDocument {
            media_type,
            file_name,
            ..RawDocument::new(bytes)
        });
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
