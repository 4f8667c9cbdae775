//! Explicit schema check for roadmap requests.
//!
//! Requests arrive as untyped JSON so that every shape problem maps to a precise
//! 400 message instead of a generic deserialization rejection.

use serde_json::{Number, Value};

use crate::errors::AppError;
use crate::roadmap::models::{truncate_count, SkillProfile};

/// Validates a `{weak_topics, total_solved}` request body.
///
/// Runs before any pipeline stage; a failure here means the model is never called.
pub fn parse_roadmap_request(body: &Value) -> Result<SkillProfile, AppError> {
    let weak_topics = parse_weak_topics(body.get("weak_topics"))?;
    let total_solved = parse_number(body.get("total_solved"), "total_solved")?;

    Ok(SkillProfile {
        weak_topics,
        total_solved,
    })
}

fn parse_weak_topics(value: Option<&Value>) -> Result<Vec<String>, AppError> {
    let missing = match value {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
    };
    if missing {
        return Err(AppError::Validation(
            "weak_topics is required and cannot be empty".to_string(),
        ));
    }

    parse_string_list(value, "weak_topics")
}

/// Reads a JSON array of strings. Absent and non-array values are both rejected.
pub fn parse_string_list(value: Option<&Value>, field: &str) -> Result<Vec<String>, AppError> {
    let Some(Value::Array(items)) = value else {
        return Err(AppError::Validation(format!("{field} must be a list")));
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation(format!("{field} must be a list of strings")))
        })
        .collect()
}

/// Reads a JSON number exactly as sent.
pub fn parse_number(value: Option<&Value>, field: &str) -> Result<Number, AppError> {
    match value {
        Some(Value::Number(n)) => Ok(n.clone()),
        _ => Err(AppError::Validation(format!("{field} must be a number"))),
    }
}

/// Reads a JSON number as a count, truncating fractions toward zero.
pub fn parse_count(value: Option<&Value>, field: &str) -> Result<i64, AppError> {
    parse_number(value, field).map(|n| truncate_count(&n))
}
