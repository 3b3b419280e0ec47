//! Axum route handler for the tailoring API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::classifier::{classify, RESUME_KEYWORDS};
use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::models::TailoredResume;
use crate::tailoring::resolver::tailor_resume;

/// Request body: resume and job description as one opaque blob.
#[derive(Debug, Deserialize)]
pub struct TailoringRequest {
    pub text: String,
}

/// POST /process-text
///
/// Tailors the submitted resume text to the job description it contains.
/// A single LLM call; failures are returned to the caller, never retried.
pub async fn handle_process_text(
    State(state): State<AppState>,
    Json(request): Json<TailoringRequest>,
) -> Result<Json<TailoredResume>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let char_count = request.text.chars().count();
    if char_count > state.config.max_text_chars {
        return Err(AppError::PayloadTooLarge(format!(
            "text is {char_count} characters; the limit is {}",
            state.config.max_text_chars
        )));
    }

    if state.config.require_resume_classification {
        let verdict = classify(&request.text);
        if !verdict.is_resume {
            return Err(AppError::Validation(format!(
                "text does not appear to be a resume ({} of {} section keywords found)",
                verdict.matched_keyword_count,
                RESUME_KEYWORDS.len()
            )));
        }
    }

    info!("Tailoring request: {char_count} chars");
    let tailored = tailor_resume(&request.text, state.llm.as_ref()).await?;
    Ok(Json(tailored))
}
