//! Eisenhower Matrix domain model and business logic
//!
//! This module contains the core task structures and their rules.
//! It is split into submodules:
//! - `task`: the `Task` record and `Quadrant`
//! - `tags`: tag tokenization and membership
//! - `classifier`: urgency/importance scoring and quadrant classification
//! - `queries`: filtered and sorted views over a task snapshot
//! - `task_store`: the in-memory task collection
//! - `draft`: field edits that become a saved task

mod classifier;
mod draft;
mod queries;
mod tags;
mod task;
mod task_store;

// Re-export all public types
pub use classifier::{
    DEFAULT_KEYWORDS, KEYWORD_WEIGHT, MAX_SCORE, MIN_SCORE, ScoreInput, Suggestion, THRESHOLD,
    classify, resolve_importance, resolve_urgency, score_importance, score_urgency, suggest,
    validate_score,
};
pub use draft::TaskDraft;
pub use queries::{filter_by_quadrant, filter_by_tag, sort_by_deadline, tasks_in_quadrant};
pub use tags::{TAG_DELIMITER, TagMatch, Tags};
pub use task::{Quadrant, Task, UNTITLED, local_date_today};
pub use task_store::TaskStore;
