use crate::roadmap::models::UserLevel;

const INTERMEDIATE_FLOOR: i64 = 50;
const ADVANCED_FLOOR: i64 = 200;

/// Maps a solved-problem count to a skill tier.
///
/// `< 50` Beginner, `50..200` Intermediate, `>= 200` Advanced.
/// Negative counts are not rejected; they land in Beginner.
pub fn classify(total_solved: i64) -> UserLevel {
    if total_solved < INTERMEDIATE_FLOOR {
        UserLevel::Beginner
    } else if total_solved < ADVANCED_FLOOR {
        UserLevel::Intermediate
    } else {
        UserLevel::Advanced
    }
}
