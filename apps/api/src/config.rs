use anyhow::{Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "gpt-4";
const DEFAULT_ALLOWED_ORIGINS: &str = "https://job-draft-ai.vercel.app";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub max_text_chars: usize,
    /// Reject tailoring input the classifier does not recognise as a resume.
    pub require_resume_classification: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            llm_api_url: optional_env("LLM_API_URL", DEFAULT_LLM_API_URL),
            llm_model: optional_env("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            allowed_origins: parse_origins(&optional_env(
                "ALLOWED_ORIGINS",
                DEFAULT_ALLOWED_ORIGINS,
            )),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            max_text_chars: parse_env("MAX_TEXT_CHARS", 60_000)?,
            require_resume_classification: parse_env("REQUIRE_RESUME_CLASSIFICATION", false)?,
            port: parse_env("PORT", 8000)?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("https://a.example, https://b.example ,,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_parse_origins_default_is_single_origin() {
        assert_eq!(
            parse_origins(DEFAULT_ALLOWED_ORIGINS),
            vec!["https://job-draft-ai.vercel.app"]
        );
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let port: u16 = parse_env("TAILOR_API_TEST_UNSET_PORT", 8000).unwrap();
        assert_eq!(port, 8000);
    }
}
