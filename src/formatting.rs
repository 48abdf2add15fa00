//! Formatting helper functions for the quadrant MCP server
//!
//! Plain-text output for tool responses. An empty view is "No tasks found",
//! never an error.

use crate::matrix::{Quadrant, Suggestion, Task};

/// Placeholder shown for tasks without details
pub const NO_DETAILS: &str = "No details";

/// Format a single task as a list entry
pub fn format_task(task: &Task) -> String {
    let mut result = format!(
        "- [{}] {} (quadrant: {}, importance: {}, urgency: {}{})\n",
        task.id(),
        task.display_title(),
        task.quadrant(),
        task.importance_score(),
        task.urgency_score(),
        if task.is_completed { ", completed" } else { "" }
    );

    result.push_str(&format!(
        "  Details: {}\n",
        task.non_empty_details().unwrap_or(NO_DETAILS)
    ));
    if let Some(deadline) = task.deadline {
        result.push_str(&format!("  Deadline: {}\n", deadline));
    }
    if !task.tags.is_empty() {
        result.push_str(&format!("  Tags: {}\n", task.tags.joined()));
    }
    result
}

/// Format tasks into a display string
pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str(&format_task(task));
    }
    result
}

/// Format the four-quadrant board
pub fn format_matrix(board: &[Vec<Task>; 4]) -> String {
    let mut result = String::new();
    for quadrant in Quadrant::ALL {
        let tasks = &board[quadrant.index()];
        result.push_str(&format!(
            "Quadrant {} ({}): {} task(s)\n",
            quadrant,
            quadrant.label(),
            tasks.len()
        ));
        for task in tasks {
            result.push_str(&format_task(task));
        }
        result.push('\n');
    }
    result
}

/// Format a suggested quadrant preview
pub fn format_suggestion(suggestion: &Suggestion) -> String {
    format!(
        "Suggested quadrant: {} ({})\nImportance: {}\nUrgency: {}",
        suggestion.quadrant,
        suggestion.quadrant.label(),
        suggestion.importance,
        suggestion.urgency
    )
}
