use serde_json::Value;

use crate::errors::AppError;
use crate::roadmap::models::Roadmap;

/// Parses the extracted candidate and checks the envelope.
///
/// Strict on the envelope (a JSON object with a `roadmap` key), permissive inside it:
/// day count and per-day fields are not checked here. See `Roadmap::day_plans`.
pub fn validate(candidate: &str) -> Result<Roadmap, AppError> {
    let parsed: Value = serde_json::from_str(candidate).map_err(|e| {
        AppError::MalformedResponse(format!("Invalid JSON response from model: {e}"))
    })?;

    let Value::Object(object) = parsed else {
        return Err(AppError::MalformedResponse(
            "Response is not a JSON object".to_string(),
        ));
    };

    if !object.contains_key("roadmap") {
        return Err(AppError::MalformedResponse(
            "Response missing 'roadmap' field".to_string(),
        ));
    }

    Ok(Roadmap::from_object(object))
}
