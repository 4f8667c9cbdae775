// Cross-cutting prompt fragments shared by every prompt template.
// Each feature that talks to the model keeps its own prompts.rs alongside it.

/// Closing instruction that enforces a bare JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Important: Return ONLY valid JSON, no additional text or markdown formatting.";
