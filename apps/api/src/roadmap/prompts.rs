// Prompt template for roadmap generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::roadmap::models::UserLevel;

/// Roadmap prompt template.
/// Replace: {user_level}, {weak_topics}, {json_only_instruction}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are an expert competitive programming mentor specializing in LeetCode preparation.

User Profile:
- Skill Level: {user_level}
- Weak Topics: {weak_topics}

Task: Generate a structured 7-day learning roadmap to help this user improve their weak topics.

Requirements:
1. Focus on the weak topics provided
2. Provide 2-3 specific problem recommendations per day
3. Include topic-wise recommendations (which concepts to study)
4. Provide learning resources (no full solutions, only conceptual guidance)
5. Ensure progressive difficulty (start easier, build up)
6. Include daily goals and milestones

Return your response in the following JSON format:
{
  "roadmap": [
    {
      "day": 1,
      "focus_topic": "Topic name",
      "daily_goal": "What to achieve today",
      "problems": [
        {
          "title": "Problem name",
          "difficulty": "Easy/Medium/Hard",
          "key_concept": "Main concept to learn",
          "approach_hint": "High-level approach (no code)"
        }
      ],
      "study_resources": [
        "Resource 1: Brief description",
        "Resource 2: Brief description"
      ]
    }
  ],
  "overall_strategy": "Brief overview of the 7-day plan",
  "success_metrics": "How to measure progress"
}

{json_only_instruction}"#;

/// Renders the roadmap prompt. Pure; the same inputs always give the same text.
///
/// Caller-supplied topics are substituted last so their text is never rescanned.
pub fn build_prompt(weak_topics: &[String], level: UserLevel) -> String {
    ROADMAP_PROMPT_TEMPLATE
        .replace("{user_level}", level.as_str())
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
        .replace("{weak_topics}", &weak_topics.join(", "))
}
