//! Response extraction: isolates the JSON payload from a free-text model reply.
//!
//! Models sometimes wrap JSON in markdown code fences despite being told not to.
//! The heuristic lives behind `ResponseExtractor` so a stricter parser can replace it
//! without touching the pipeline.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Turns a raw model reply into the best-guess structured-data substring.
pub trait ResponseExtractor: Send + Sync {
    fn extract<'a>(&self, raw: &'a str) -> &'a str;
}

/// First-match fence stripping.
///
/// Ordered checks:
/// 1. a ```` ```json ```` fence: text up to the next ```` ``` ````
/// 2. any ```` ``` ```` fence: text up to the next ```` ``` ````
/// 3. the whole reply
///
/// Always trimmed. No nesting awareness. A missing closing fence takes the rest of the reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedBlockExtractor;

impl ResponseExtractor for FencedBlockExtractor {
    fn extract<'a>(&self, raw: &'a str) -> &'a str {
        between_fences(raw, JSON_FENCE)
            .or_else(|| between_fences(raw, FENCE))
            .unwrap_or(raw)
            .trim()
    }
}

/// Text between the end of the first `opening` and the next plain fence after it.
fn between_fences<'a>(raw: &'a str, opening: &str) -> Option<&'a str> {
    let start = raw.find(opening)? + opening.len();
    let rest = &raw[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    Some(&rest[..end])
}
