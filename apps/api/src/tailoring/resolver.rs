//! Structured Response Resolver — turns a model's free-form reply into a
//! validated `StructuredResume` or a classified failure.
//!
//! Flow: build prompt → one LLM call → locate JSON object → parse → shape check
//!       → deserialize. Every failure is terminal; nothing here retries.
//!
//! Locating the object starts from the classic brace span (first `{` to last
//! `}`). On top of that a string-aware scanner finds balanced top-level
//! objects, so prose or code fences around the JSON, a stray `{` before it,
//! or a stray `}` after it, do not break parsing. An empty `{}` is only
//! returned when no other object parses. If no balanced candidate parses,
//! the brace span is parsed and its error reported.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::STRUCTURED_TEMPERATURE;
use crate::llm_client::{ChatModel, ChatRequest};
use crate::tailoring::models::{find_schema_issues, StructuredResume, TailoredResume};
use crate::tailoring::prompts::{build_tailoring_prompt, TAILORING_SYSTEM};

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("{0}")]
    Upstream(String),

    #[error("AI response did not contain a JSON object")]
    NoJsonFound,

    #[error("AI returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("AI response did not match the resume schema ({} field(s))", .0.len())]
    SchemaMismatch(Vec<String>),
}

/// Runs the tailoring pipeline for one request.
pub async fn tailor_resume(
    resume_text: &str,
    llm: &dyn ChatModel,
) -> Result<TailoredResume, ResolveError> {
    let prompt = build_tailoring_prompt(resume_text);
    debug!(
        "Tailoring prompt built: {} chars, model={}",
        prompt.len(),
        llm.model()
    );

    let reply = llm
        .complete(ChatRequest {
            system: TAILORING_SYSTEM,
            prompt: &prompt,
            temperature: STRUCTURED_TEMPERATURE,
        })
        .await
        .map_err(|e| ResolveError::Upstream(e.to_string()))?;

    debug!("LLM reply received: {} chars", reply.len());

    let structured = resolve_reply(&reply)?;
    info!(
        "Tailored resume resolved: {} experience item(s), {} project(s)",
        structured.tailored_experience.len(),
        structured.projects.len()
    );

    Ok(TailoredResume { structured })
}

/// Extracts, parses and validates the resume object inside a raw model reply.
pub fn resolve_reply(reply: &str) -> Result<StructuredResume, ResolveError> {
    let value = parse_json_object(reply)?;

    let issues = find_schema_issues(&value);
    if !issues.is_empty() {
        warn!("LLM reply failed schema check: {}", issues.join("; "));
        return Err(ResolveError::SchemaMismatch(issues));
    }

    // The shape check mirrors the struct, so this only fails if they drift apart.
    serde_json::from_value(value).map_err(|e| ResolveError::SchemaMismatch(vec![e.to_string()]))
}

/// Finds and parses the JSON object embedded in `reply`.
pub fn parse_json_object(reply: &str) -> Result<Value, ResolveError> {
    let (first, last) = brace_span(reply).ok_or(ResolveError::NoJsonFound)?;

    let mut cursor = first;
    let mut empty_object = None;
    while cursor <= last {
        let Some(offset) = reply[cursor..=last].find('{') else {
            break;
        };
        let start = cursor + offset;
        let Some(end) = matching_brace(reply, start) else {
            // Unclosed brace in prose; keep looking after it.
            cursor = start + 1;
            continue;
        };
        match serde_json::from_str::<Value>(&reply[start..=end]) {
            // `{}` in prose ("format is {}") only wins if nothing better follows.
            Ok(Value::Object(map)) if map.is_empty() => {
                empty_object.get_or_insert(Value::Object(map));
            }
            Ok(value @ Value::Object(_)) => return Ok(value),
            _ => {}
        }
        cursor = end + 1;
    }

    if let Some(value) = empty_object {
        return Ok(value);
    }

    serde_json::from_str::<Value>(&reply[first..=last]).map_err(|e| {
        warn!("JSON decoding failed: {e}");
        ResolveError::InvalidJson(e.to_string())
    })
}

/// Byte offsets of the first `{` and the last `}`, if the first precedes the last.
fn brace_span(reply: &str) -> Option<(usize, usize)> {
    let first = reply.find('{')?;
    let last = reply.rfind('}')?;
    (first < last).then_some((first, last))
}

/// Offset of the `}` closing the object that opens at `start`, tracking
/// string literals and escapes. `None` if the object never closes.
fn matching_brace(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in text.bytes().enumerate().skip(start) {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
