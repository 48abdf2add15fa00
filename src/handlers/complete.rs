//! Complete handler for the quadrant MCP server

use crate::QuadrantServerHandler;
use crate::matrix;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl QuadrantServerHandler {
    /// Sets the completion flag, or toggles it when `completed` is omitted.
    pub async fn handle_complete(&self, id: String, completed: Option<bool>) -> McpResult<String> {
        let id = validation::normalize_task_id(&id);
        let mut data = self.data();

        let Some(task) = data.find_by_id_mut(&id) else {
            bail_public!(
                _,
                "Task not found: Task '{}' does not exist. Use list() to see available tasks.",
                id
            );
        };

        task.is_completed = completed.unwrap_or(!task.is_completed);
        task.updated_at = matrix::local_date_today();
        let task = task.clone();
        self.persist(&task)?;
        drop(data);

        Ok(format!(
            "Task {} marked {}",
            id,
            if task.is_completed {
                "completed"
            } else {
                "incomplete"
            }
        ))
    }
}
