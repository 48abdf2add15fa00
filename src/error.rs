//! Error types for the quadrant engine.
//!
//! Classification rejects out-of-range input instead of clamping it, query
//! functions never fail, and persistence failures are passed through opaque.

use thiserror::Error;

/// Result alias used across the crate
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Errors raised by the classifier, the task store and the persistence boundary
#[derive(Error, Debug)]
pub enum MatrixError {
    /// A score outside [0, 10] (or NaN) reached `classify` or a manual score setter
    #[error("Invalid {field} score {value}: scores must be within 0..=10")]
    InvalidScoreRange { field: &'static str, value: f64 },

    /// A tag query cannot be split into tokens and falls back to whole-string equality
    #[error("Ambiguous tag format '{tag}': contains the delimiter, matching the whole tag string")]
    AmbiguousTagFormat { tag: String },

    #[error("Invalid quadrant {value}: expected 1, 2, 3 or 4")]
    InvalidQuadrant { value: i64 },

    #[error("Task '{id}' not found")]
    TaskNotFound { id: String },

    #[error("Task ID '{id}' already exists")]
    DuplicateId { id: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Opaque failure reported by a persistence collaborator
///
/// The core never interprets or retries it; it is surfaced to the caller as is.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct PersistenceError(#[from] anyhow::Error);

impl PersistenceError {
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::msg(message))
    }
}
