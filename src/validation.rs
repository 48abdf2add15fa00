//! Validation helper functions for the quadrant MCP server
//!
//! This module turns raw tool parameters (strings, slider numbers) into
//! domain values, reporting bad input as MCP invalid-params errors.

use crate::error::MatrixError;
use crate::matrix::{Quadrant, ScoreInput, Tags, validate_score};
use chrono::NaiveDate;
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Convert a domain error into an MCP error visible to the client
pub fn to_mcp_error(err: MatrixError) -> mcp_attr::Error {
    invalid_params(err.to_string())
}

/// Parse and validate quadrant filter parameter
///
/// # Arguments
/// * `quadrant_str` - "1".."4" (a "Q" prefix is accepted)
pub fn parse_quadrant(quadrant_str: &str) -> McpResult<Quadrant> {
    quadrant_str.parse::<Quadrant>().map_err(|_| {
        invalid_params(format!(
            "Invalid quadrant '{}'. Valid quadrants: 1 (urgent & important), 2 (important), 3 (urgent), 4 (neither)",
            quadrant_str
        ))
    })
}

/// Parse and validate a deadline parameter
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Parse an optional deadline where "" means "no deadline"
pub fn parse_optional_date(date_str: &str) -> McpResult<Option<NaiveDate>> {
    if date_str.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(date_str).map(Some)
    }
}

/// Turn an optional slider value into a score input
///
/// `None` selects the automatic score; a value must lie within 0..=10.
pub fn parse_score(field: &'static str, value: Option<f64>) -> McpResult<ScoreInput> {
    match value {
        None => Ok(ScoreInput::Automatic),
        Some(v) => validate_score(field, v)
            .map(ScoreInput::Manual)
            .map_err(to_mcp_error),
    }
}

/// Parse a comma-delimited tag list ("Work, Personal")
pub fn parse_tags(tags_str: &str) -> Tags {
    Tags::parse(tags_str.trim())
}

/// Normalize task ID by trimming surrounding whitespace
pub fn normalize_task_id(task_id: &str) -> String {
    task_id.trim().to_string()
}
