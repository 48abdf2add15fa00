//! Urgency/importance scoring and quadrant classification
//!
//! Everything here is pure: no state, no I/O. Scores live in [0, 10]; the
//! threshold for "urgent" and "important" is 5 inclusive.

use chrono::NaiveDate;

use super::task::Quadrant;
use crate::error::{MatrixError, MatrixResult};

/// Keywords that mark a task as important when found in its details
pub const DEFAULT_KEYWORDS: [&str; 4] = ["critical", "important", "key", "essential"];

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Score at or above which an axis counts as urgent / important
pub const THRESHOLD: f64 = 5.0;

/// Importance contributed by each keyword hit
pub const KEYWORD_WEIGHT: f64 = 2.5;

/// Urgency from deadline proximity
///
/// No deadline scores 0. Otherwise `10 - days_until_deadline`, bounded to
/// [0, 10]: today or overdue is 10, ten or more days out is 0.
pub fn score_urgency(deadline: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(deadline) = deadline else {
        return MIN_SCORE;
    };
    let days_until = (deadline - today).num_days();
    (10 - days_until).clamp(0, 10) as f64
}

/// Importance from keywords found in free text
///
/// Each keyword found as a case-insensitive substring counts once, however
/// often it repeats, and contributes 2.5. Not capped; a longer keyword list
/// can exceed 10, so callers clamp before mixing with manual scores.
pub fn score_importance<S: AsRef<str>>(details: &str, keywords: &[S]) -> f64 {
    if details.is_empty() {
        return MIN_SCORE;
    }
    let haystack = details.to_lowercase();
    let hits = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty() && haystack.contains(k.as_str()))
        .count();
    hits as f64 * KEYWORD_WEIGHT
}

/// Check that a score is within [0, 10]
pub fn validate_score(field: &'static str, value: f64) -> MatrixResult<f64> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(value)
    } else {
        Err(MatrixError::InvalidScoreRange { field, value })
    }
}

/// Map an importance/urgency pair to its quadrant
///
/// First match wins: both high is quadrant 1, then important-only is 2, then
/// urgent-only is 3, else 4.
pub fn classify(importance: f64, urgency: f64) -> MatrixResult<Quadrant> {
    let importance = validate_score("importance", importance)?;
    let urgency = validate_score("urgency", urgency)?;
    Ok(decide(importance, urgency))
}

// Scores must already be validated.
fn decide(importance: f64, urgency: f64) -> Quadrant {
    if importance >= THRESHOLD && urgency >= THRESHOLD {
        Quadrant::UrgentImportant
    } else if importance >= THRESHOLD {
        Quadrant::Important
    } else if urgency >= THRESHOLD {
        Quadrant::Urgent
    } else {
        Quadrant::Neither
    }
}

/// Where a single axis score comes from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScoreInput {
    /// Derived from details (importance) or deadline (urgency)
    #[default]
    Automatic,
    /// Slider value in [0, 10]; overrides the automatic score entirely
    Manual(f64),
}

impl ScoreInput {
    pub fn is_manual(&self) -> bool {
        matches!(self, ScoreInput::Manual(_))
    }
}

/// Importance for one task, from the chosen input mode
///
/// The automatic value is clamped into [0, 10]; a manual value must already
/// be in range.
pub fn resolve_importance<S: AsRef<str>>(
    input: ScoreInput,
    details: Option<&str>,
    keywords: &[S],
) -> MatrixResult<f64> {
    match input {
        ScoreInput::Manual(value) => validate_score("importance", value),
        ScoreInput::Automatic => Ok(score_importance(details.unwrap_or_default(), keywords)
            .clamp(MIN_SCORE, MAX_SCORE)),
    }
}

/// Urgency for one task, from the chosen input mode
pub fn resolve_urgency(
    input: ScoreInput,
    deadline: Option<NaiveDate>,
    today: NaiveDate,
) -> MatrixResult<f64> {
    match input {
        ScoreInput::Manual(value) => validate_score("urgency", value),
        ScoreInput::Automatic => Ok(score_urgency(deadline, today)),
    }
}

/// Automatic scores and the quadrant they suggest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion {
    pub importance: f64,
    pub urgency: f64,
    pub quadrant: Quadrant,
}

/// Live preview while a task is being composed
///
/// Always uses the automatic scores. Total: the clamped scores are in range.
pub fn suggest<S: AsRef<str>>(
    details: Option<&str>,
    deadline: Option<NaiveDate>,
    today: NaiveDate,
    keywords: &[S],
) -> Suggestion {
    let importance = score_importance(details.unwrap_or_default(), keywords)
        .clamp(MIN_SCORE, MAX_SCORE);
    let urgency = score_urgency(deadline, today);
    let quadrant = decide(importance, urgency);
    log::debug!(
        "Suggested quadrant {} (importance {}, urgency {})",
        quadrant,
        importance,
        urgency
    );
    Suggestion {
        importance,
        urgency,
        quadrant,
    }
}
