//! Suggest handler for the quadrant MCP server

use crate::QuadrantServerHandler;
use crate::formatting;
use crate::matrix;
use crate::validation;
use mcp_attr::Result as McpResult;

impl QuadrantServerHandler {
    /// Previews the automatic scores and quadrant without touching any task.
    pub async fn handle_suggest(
        &self,
        details: Option<String>,
        deadline: Option<String>,
    ) -> McpResult<String> {
        let deadline = match deadline {
            Some(ref date_str) => validation::parse_optional_date(date_str)?,
            None => None,
        };
        let suggestion = matrix::suggest(
            details.as_deref(),
            deadline,
            matrix::local_date_today(),
            &self.keywords,
        );
        Ok(formatting::format_suggestion(&suggestion))
    }
}
