use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::classifier::{classify, validate_score};
use super::tags::Tags;
use crate::error::{MatrixError, MatrixResult};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Title shown for tasks saved without one
pub const UNTITLED: &str = "Untitled";

/// Quadrant of the Eisenhower Matrix
///
/// Persisted as its number (1..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Quadrant {
    /// Quadrant 1: urgent and important
    UrgentImportant,
    /// Quadrant 2: important, not urgent
    Important,
    /// Quadrant 3: urgent, not important
    Urgent,
    /// Quadrant 4: neither urgent nor important
    Neither,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::Important,
        Quadrant::Urgent,
        Quadrant::Neither,
    ];

    pub fn number(self) -> u8 {
        match self {
            Quadrant::UrgentImportant => 1,
            Quadrant::Important => 2,
            Quadrant::Urgent => 3,
            Quadrant::Neither => 4,
        }
    }

    /// Zero-based position, for indexing per-quadrant arrays
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent & important",
            Quadrant::Important => "important, not urgent",
            Quadrant::Urgent => "urgent, not important",
            Quadrant::Neither => "neither urgent nor important",
        }
    }
}

impl TryFrom<i64> for Quadrant {
    type Error = MatrixError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quadrant::UrgentImportant),
            2 => Ok(Quadrant::Important),
            3 => Ok(Quadrant::Urgent),
            4 => Ok(Quadrant::Neither),
            _ => Err(MatrixError::InvalidQuadrant { value }),
        }
    }
}

impl From<Quadrant> for i64 {
    fn from(quadrant: Quadrant) -> Self {
        i64::from(quadrant.number())
    }
}

impl FromStr for Quadrant {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);
        match digits.parse::<i64>() {
            Ok(value) => Quadrant::try_from(value),
            Err(_) => Err(MatrixError::InvalidQuadrant { value: 0 }),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A task placed in the Eisenhower Matrix
///
/// Scores and quadrant are private: the quadrant is always the one derived from
/// the current scores, and scores only change through [`Task::set_scores`].
/// Deserialization re-derives the quadrant from the stored scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: String,
    /// Title; the input boundary requires it, display falls back to "Untitled"
    pub title: Option<String>,
    /// Free text scanned for importance keywords
    pub details: Option<String>,
    /// Optional due date driving the automatic urgency score
    pub deadline: Option<NaiveDate>,
    importance_score: f64,
    urgency_score: f64,
    quadrant: Quadrant,
    pub is_completed: bool,
    pub tags: Tags,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl Task {
    /// Create a task with validated scores; the quadrant is derived from them
    pub fn new(id: impl Into<String>, importance: f64, urgency: f64) -> MatrixResult<Self> {
        let quadrant = classify(importance, urgency)?;
        let today = local_date_today();
        Ok(Self {
            id: id.into(),
            title: None,
            details: None,
            deadline: None,
            importance_score: importance,
            urgency_score: urgency,
            quadrant,
            is_completed: false,
            tags: Tags::default(),
            created_at: today,
            updated_at: today,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn importance_score(&self) -> f64 {
        self.importance_score
    }

    pub fn urgency_score(&self) -> f64 {
        self.urgency_score
    }

    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Replace both scores and re-derive the quadrant
    ///
    /// Rejects out-of-range scores without touching the task.
    pub fn set_scores(&mut self, importance: f64, urgency: f64) -> MatrixResult<()> {
        let quadrant = classify(importance, urgency)?;
        self.importance_score = importance;
        self.urgency_score = urgency;
        self.quadrant = quadrant;
        Ok(())
    }

    /// Title for display, "Untitled" when absent or empty
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED,
        }
    }

    /// Details that carry text; empty strings count as absent
    pub fn non_empty_details(&self) -> Option<&str> {
        self.details.as_deref().filter(|d| !d.is_empty())
    }
}

/// On-disk shape of a task
///
/// The stored quadrant is informational only; loading always re-derives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskRecord {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deadline: Option<NaiveDate>,
    #[serde(default)]
    importance_score: f64,
    #[serde(default)]
    urgency_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quadrant: Option<Quadrant>,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    tags: Tags,
    #[serde(default = "local_date_today")]
    created_at: NaiveDate,
    #[serde(default = "local_date_today")]
    updated_at: NaiveDate,
}

impl TryFrom<TaskRecord> for Task {
    type Error = MatrixError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let importance = validate_score("importance", record.importance_score)?;
        let urgency = validate_score("urgency", record.urgency_score)?;
        let quadrant = classify(importance, urgency)?;

        if let Some(stored) = record.quadrant
            && stored != quadrant
        {
            log::warn!(
                "Task '{}' was stored in quadrant {} but its scores ({}, {}) place it in quadrant {}; using {}",
                record.id,
                stored,
                importance,
                urgency,
                quadrant,
                quadrant
            );
        }

        Ok(Self {
            id: record.id,
            title: record.title,
            details: record.details,
            deadline: record.deadline,
            importance_score: importance,
            urgency_score: urgency,
            quadrant,
            is_completed: record.is_completed,
            tags: record.tags,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            details: task.details,
            deadline: task.deadline,
            importance_score: task.importance_score,
            urgency_score: task.urgency_score,
            quadrant: Some(task.quadrant),
            is_completed: task.is_completed,
            tags: task.tags,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
