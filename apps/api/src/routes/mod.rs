pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as documents;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route("/validate-resume", post(documents::handle_validate_resume))
        .route("/extract", post(documents::handle_extract))
        // Tailoring API
        .route("/process-text", post(tailoring::handle_process_text))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
