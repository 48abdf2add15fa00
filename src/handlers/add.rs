//! Add handler for the quadrant MCP server

use crate::QuadrantServerHandler;
use crate::matrix::{self, TaskDraft};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl QuadrantServerHandler {
    /// Creates a task from raw fields: manual scores where given, automatic otherwise.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_add(
        &self,
        title: String,
        details: Option<String>,
        deadline: Option<String>,
        importance: Option<f64>,
        urgency: Option<f64>,
        tags: Option<String>,
    ) -> McpResult<String> {
        let title = title.trim().to_string();
        if title.is_empty() {
            bail_public!(_, "Title must not be empty");
        }

        let mut draft = TaskDraft::new(title);
        draft.details = details.filter(|d| !d.is_empty());
        draft.deadline = match deadline {
            Some(ref date_str) => validation::parse_optional_date(date_str)?,
            None => None,
        };
        draft.importance = validation::parse_score("importance", importance)?;
        draft.urgency = validation::parse_score("urgency", urgency)?;
        if let Some(ref tags_str) = tags {
            draft.tags = validation::parse_tags(tags_str);
        }

        let today = matrix::local_date_today();
        let mut data = self.data();
        let id = data.generate_task_id();
        let task = draft
            .build(id, today, &self.keywords)
            .map_err(validation::to_mcp_error)?;
        data.add(task.clone()).map_err(validation::to_mcp_error)?;

        log::info!("Added task '{}' to quadrant {}", task.id(), task.quadrant());
        self.persist(&task)?;
        drop(data);

        Ok(format!(
            "Task created with ID: {} (quadrant: {})",
            task.id(),
            task.quadrant()
        ))
    }
}
