//! Update handler for the quadrant MCP server

use crate::QuadrantServerHandler;
use crate::matrix::{self, TaskDraft};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl QuadrantServerHandler {
    /// **Edit**: Change task fields in place and re-derive the quadrant.
    /// **Note**: Task ID cannot be changed - IDs are immutable. Completion is kept.
    /// **Scores**: Stored scores act as slider values and stay authoritative;
    /// with `auto_score`, axes without an explicit value switch back to automatic.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update(
        &self,
        id: String,
        title: Option<String>,
        details: Option<String>,
        deadline: Option<String>,
        importance: Option<f64>,
        urgency: Option<f64>,
        tags: Option<String>,
        auto_score: Option<bool>,
    ) -> McpResult<String> {
        let id = validation::normalize_task_id(&id);

        // Parse everything before touching the task
        let new_deadline = match deadline {
            Some(ref date_str) => Some(validation::parse_optional_date(date_str)?),
            None => None,
        };
        let importance_input = validation::parse_score("importance", importance)?;
        let urgency_input = validation::parse_score("urgency", urgency)?;
        let auto_score = auto_score.unwrap_or(false);

        let new_title = match title {
            Some(t) if t.trim().is_empty() => {
                bail_public!(_, "Title must not be empty");
            }
            Some(t) => Some(t.trim().to_string()),
            None => None,
        };

        let mut data = self.data();
        let Some(task) = data.find_by_id_mut(&id) else {
            bail_public!(
                _,
                "Task not found: Task '{}' does not exist. Use list() to see available tasks.",
                id
            );
        };

        let mut draft = TaskDraft::from_task(task);
        if let Some(t) = new_title {
            draft.title = Some(t);
        }
        if let Some(d) = details {
            draft.details = if d.is_empty() { None } else { Some(d) };
        }
        if let Some(d) = new_deadline {
            draft.deadline = d;
        }
        if let Some(ref tags_str) = tags {
            draft.tags = validation::parse_tags(tags_str);
        }

        if importance_input.is_manual() || auto_score {
            draft.importance = importance_input;
        }
        if urgency_input.is_manual() || auto_score {
            draft.urgency = urgency_input;
        }

        draft
            .apply_to(task, matrix::local_date_today(), &self.keywords)
            .map_err(validation::to_mcp_error)?;
        let task = task.clone();

        log::info!("Updated task '{}' (quadrant {})", task.id(), task.quadrant());
        self.persist(&task)?;
        drop(data);

        Ok(format!(
            "Task {} updated successfully (quadrant: {})",
            id,
            task.quadrant()
        ))
    }
}
