//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use quadrant_mcp::error::PersistenceError;
use quadrant_mcp::matrix::{DEFAULT_KEYWORDS, local_date_today};
use quadrant_mcp::{MemoryStorage, QuadrantServerHandler, Task, TaskRepository};
use tempfile::NamedTempFile;

/// Create a test handler with temporary TOML storage
pub fn get_test_handler() -> (QuadrantServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = QuadrantServerHandler::new(temp_file.path().to_str().unwrap()).unwrap();
    (handler, temp_file)
}

/// Create a test handler with in-memory storage
pub fn get_memory_handler() -> QuadrantServerHandler {
    QuadrantServerHandler::with_repository(Box::new(MemoryStorage::new()), default_keywords())
        .unwrap()
}

pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Extract task ID from add() response message
/// Response format: "Task created with ID: <id> (quadrant: N)"
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        if let Some(end) = id_part.find(" (") {
            return id_part[..end].trim().to_string();
        }
    }
    response
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_end_matches(')')
        .to_string()
}

/// Date string `days` from today, as the tools expect it
pub fn days_from_today(days: i64) -> String {
    (local_date_today() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create a test task with given scores
pub fn create_test_task(id: &str, importance: f64, urgency: f64) -> Task {
    let mut task = Task::new(id, importance, urgency).unwrap();
    task.title = Some(format!("Task {}", id));
    task
}

/// Repository whose writes always fail
pub struct FailingStorage;

impl TaskRepository for FailingStorage {
    fn load_all(&self) -> Result<Vec<Task>, PersistenceError> {
        Ok(Vec::new())
    }

    fn save(&self, _task: &Task) -> Result<(), PersistenceError> {
        Err(PersistenceError::msg("disk is read-only"))
    }

    fn delete(&self, _id: &str) -> Result<bool, PersistenceError> {
        Err(PersistenceError::msg("disk is read-only"))
    }
}
