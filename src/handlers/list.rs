//! List and matrix handlers for the quadrant MCP server

use crate::QuadrantServerHandler;
use crate::formatting;
use crate::matrix;
use crate::validation;
use mcp_attr::Result as McpResult;

/// Empty tag parameter means "no tag filter"
fn tag_filter(tag: &Option<String>) -> Option<&str> {
    tag.as_deref().filter(|t| !t.is_empty())
}

impl QuadrantServerHandler {
    /// Handles list operations: tag filter, then quadrant filter, then deadline sort.
    pub async fn handle_list(
        &self,
        quadrant: Option<String>,
        tag: Option<String>,
        descending: Option<bool>,
    ) -> McpResult<String> {
        let quadrant_filter = match quadrant {
            Some(ref quadrant_str) => Some(validation::parse_quadrant(quadrant_str)?),
            None => None,
        };
        let tag = tag_filter(&tag);
        let descending = descending.unwrap_or(false);

        let data = self.data();
        let tasks = match quadrant_filter {
            Some(q) if !descending => data.tasks_in_quadrant(q, tag),
            Some(q) => {
                let tagged = matrix::filter_by_tag(data.tasks(), tag);
                let in_quadrant = matrix::filter_by_quadrant(&tagged, q);
                matrix::sort_by_deadline(&in_quadrant, false)
            }
            None => {
                let tagged = matrix::filter_by_tag(data.tasks(), tag);
                matrix::sort_by_deadline(&tagged, !descending)
            }
        };
        drop(data);

        Ok(formatting::format_tasks(&tasks))
    }

    /// Handles the board view: every quadrant, each sorted by deadline.
    pub async fn handle_matrix(&self, tag: Option<String>) -> McpResult<String> {
        let board = self.data().matrix(tag_filter(&tag));
        Ok(formatting::format_matrix(&board))
    }
}
