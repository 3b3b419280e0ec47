// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a helpful resume assistant that only returns structured JSON. \
    You MUST respond with a single valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Low temperature keeps the reply close to the requested schema.
pub const STRUCTURED_TEMPERATURE: f64 = 0.3;
