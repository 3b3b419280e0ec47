mod classifier;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;
mod tailoring;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::llm_client::{ChatModel, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_url.clone(),
        config.openai_api_key.clone(),
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.llm_timeout_secs
    );

    if config.require_resume_classification {
        info!("Tailoring is gated on resume classification");
    }

    let cors = build_cors(&config.allowed_origins)?;
    info!("CORS allow-list: {:?}", config.allowed_origins);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        extractor: Arc::new(PdfTextExtractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS restricted to the configured origins, with credentials allowed.
/// A `*` entry is rejected: wildcard origins cannot carry credentials, and
/// `AllowOrigin::list` panics on one.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    anyhow::ensure!(
        !origins.iter().any(|o| o.trim() == "*"),
        "ALLOWED_ORIGINS must list explicit origins; '*' cannot be used with credentials"
    );

    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cors_accepts_explicit_origins() {
        let origins = vec![
            "https://job-draft-ai.vercel.app".to_string(),
            "http://localhost:3000".to_string(),
        ];
        assert!(build_cors(&origins).is_ok());
    }

    #[test]
    fn test_build_cors_rejects_wildcard() {
        let err = build_cors(&["*".to_string()]).unwrap_err();
        assert!(err.to_string().contains("'*'"));
    }

    #[test]
    fn test_build_cors_rejects_wildcard_among_origins() {
        let origins = vec!["http://localhost:3000".to_string(), "*".to_string()];
        assert!(build_cors(&origins).is_err());
    }

    #[test]
    fn test_build_cors_rejects_invalid_header_value() {
        let err = build_cors(&["https://bad\norigin".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Invalid CORS origin"));
    }
}
