// Shared prompt constants.
// Each feature module that needs LLM calls defines its own prompts.rs
// alongside it; this file holds cross-cutting fragments.

/// System message pinning the model to JSON-only output. Sent together with
/// the `json_object` response format so a parse failure means a genuinely
/// malformed completion rather than stray prose.
pub const JSON_ONLY_SYSTEM: &str = "You are a JSON-only API. You output strictly valid JSON.";
