use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Pipeline input: the parts of a user's skill profile that drive roadmap generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub weak_topics: Vec<String>,
    /// Kept as the caller sent it; echoed back unchanged in the report.
    pub total_solved: Number,
}

impl SkillProfile {
    /// Whole-problem count used for level classification.
    pub fn solved_count(&self) -> i64 {
        truncate_count(&self.total_solved)
    }
}

/// Reads a JSON number as a count, truncating fractions toward zero and saturating at the i64 range.
pub fn truncate_count(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if let Some(u) = n.as_u64() {
        i64::try_from(u).unwrap_or(i64::MAX)
    } else {
        n.as_f64().map(|f| f.trunc() as i64).unwrap_or_default()
    }
}

/// Discrete skill tier derived from the solved-problem count. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl UserLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLevel::Beginner => "Beginner",
            UserLevel::Intermediate => "Intermediate",
            UserLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated model reply.
///
/// Only the envelope is guaranteed: a JSON object with a top-level `roadmap` key.
/// Everything inside is kept exactly as the model produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roadmap(Map<String, Value>);

impl Roadmap {
    /// Wraps a parsed object. Callers outside the validator should go through `validate`.
    pub(crate) fn from_object(object: Map<String, Value>) -> Self {
        Self(object)
    }

    /// The raw `roadmap` field. Present on every validated value.
    pub fn days_raw(&self) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get("roadmap").unwrap_or(&NULL)
    }

    /// Strict typed view of the day entries, for callers that need more than the envelope.
    pub fn day_plans(&self) -> Result<Vec<DayPlan>, serde_json::Error> {
        Vec::<DayPlan>::deserialize(self.days_raw())
    }
}

/// One day of the plan, as requested from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: i64,
    pub focus_topic: String,
    pub daily_goal: String,
    #[serde(default)]
    pub problems: Vec<ProblemRecommendation>,
    #[serde(default)]
    pub study_resources: Vec<String>,
}

/// A recommended practice problem. `difficulty` is Easy/Medium/Hard by convention only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecommendation {
    pub title: String,
    pub difficulty: String,
    pub key_concept: String,
    /// Conceptual guidance; the prompt forbids solution code here.
    pub approach_hint: String,
}
