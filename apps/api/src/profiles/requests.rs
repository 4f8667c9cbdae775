use serde_json::Value;

use crate::errors::AppError;
use crate::profiles::store::ProfileData;
use crate::roadmap::input::{parse_count, parse_string_list};

/// A validated `{user_id, profile_data}` store request.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreProfileRequest {
    pub user_id: String,
    pub data: ProfileData,
}

/// Validates a store request body. Checks run in field order and stop at the first failure.
pub fn parse_store_request(body: &Value) -> Result<StoreProfileRequest, AppError> {
    let user_id = parse_user_id(body.get("user_id"))?;

    let profile_data = match body.get("profile_data") {
        Some(Value::Object(map)) if !map.is_empty() => map,
        Some(Value::Object(_)) | Some(Value::Null) | None => {
            return Err(AppError::Validation("profile_data is required".to_string()))
        }
        Some(_) => {
            return Err(AppError::Validation(
                "profile_data must be an object".to_string(),
            ))
        }
    };

    let weak_topics = parse_string_list(profile_data.get("weak_topics"), "weak_topics")?;
    let strong_topics = parse_string_list(profile_data.get("strong_topics"), "strong_topics")?;
    let total_solved = parse_count(profile_data.get("total_solved"), "total_solved")?;

    Ok(StoreProfileRequest {
        user_id,
        data: ProfileData {
            weak_topics,
            strong_topics,
            total_solved,
        },
    })
}

/// Null, `false`, zero and `""` count as absent. Other non-strings are rejected.
fn parse_user_id(value: Option<&Value>) -> Result<String, AppError> {
    match value {
        Some(Value::String(s)) => require_user_id(s),
        None | Some(Value::Null) | Some(Value::Bool(false)) => require_user_id(""),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => require_user_id(""),
        Some(_) => Err(AppError::Validation("user_id must be a string".to_string())),
    }
}

/// User ids are opaque: kept byte-for-byte, only the empty string is refused.
pub fn require_user_id(user_id: &str) -> Result<String, AppError> {
    if user_id.is_empty() {
        return Err(AppError::Validation("user_id is required".to_string()));
    }
    Ok(user_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(body: Value) -> String {
        match parse_store_request(&body) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_store_request() {
        let request = parse_store_request(&json!({
            "user_id": "leet-42",
            "profile_data": {
                "weak_topics": ["Array", "Dynamic Programming"],
                "strong_topics": ["Hash Table", "String"],
                "total_solved": 150.7
            }
        }))
        .unwrap();

        assert_eq!(request.user_id, "leet-42");
        assert_eq!(request.data.strong_topics, vec!["Hash Table", "String"]);
        assert_eq!(request.data.total_solved, 150);
    }

    #[test]
    fn test_empty_topic_lists_are_allowed() {
        let request = parse_store_request(&json!({
            "user_id": "new-user",
            "profile_data": {"weak_topics": [], "strong_topics": [], "total_solved": 0}
        }))
        .unwrap();
        assert!(request.data.weak_topics.is_empty());
    }

    #[test]
    fn test_user_id_required() {
        assert_eq!(
            validation_message(json!({"profile_data": {"total_solved": 1}})),
            "user_id is required"
        );
        for user_id in [json!(null), json!(""), json!(false), json!(0)] {
            assert_eq!(
                validation_message(json!({"user_id": user_id, "profile_data": {}})),
                "user_id is required"
            );
        }
    }

    #[test]
    fn test_non_string_user_id_rejected() {
        for user_id in [json!(42), json!(true), json!(["u1"]), json!({"id": "u1"})] {
            assert_eq!(
                validation_message(json!({
                    "user_id": user_id,
                    "profile_data": {"weak_topics": [], "strong_topics": [], "total_solved": 1}
                })),
                "user_id must be a string"
            );
        }
    }

    #[test]
    fn test_user_id_kept_as_given() {
        let request = parse_store_request(&json!({
            "user_id": "  leet-42 ",
            "profile_data": {"weak_topics": [], "strong_topics": [], "total_solved": 1}
        }))
        .unwrap();
        assert_eq!(request.user_id, "  leet-42 ");
    }

    #[test]
    fn test_profile_data_required() {
        assert_eq!(
            validation_message(json!({"user_id": "u1"})),
            "profile_data is required"
        );
        assert_eq!(
            validation_message(json!({"user_id": "u1", "profile_data": {}})),
            "profile_data is required"
        );
    }

    #[test]
    fn test_field_checks_in_order() {
        assert_eq!(
            validation_message(json!({
                "user_id": "u1",
                "profile_data": {"weak_topics": "Array", "strong_topics": 3}
            })),
            "weak_topics must be a list"
        );
        assert_eq!(
            validation_message(json!({
                "user_id": "u1",
                "profile_data": {"weak_topics": [], "total_solved": 3}
            })),
            "strong_topics must be a list"
        );
        assert_eq!(
            validation_message(json!({
                "user_id": "u1",
                "profile_data": {"weak_topics": [], "strong_topics": [], "total_solved": "3"}
            })),
            "total_solved must be a number"
        );
    }
}
