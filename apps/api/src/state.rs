use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// LLM collaborator. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn ChatModel>,
    /// Document decoder. `PdfTextExtractor` by default.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
