//! Delete handler for the quadrant MCP server

use crate::QuadrantServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl QuadrantServerHandler {
    /// Removes a task from storage, then from the in-memory store, under one lock.
    pub async fn handle_delete(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_task_id(&id);
        let mut data = self.data();

        if data.find_by_id(&id).is_none() {
            bail_public!(
                _,
                "Task not found: Task '{}' does not exist. Use list() to see available tasks.",
                id
            );
        }

        if let Err(e) = self.storage.delete(&id) {
            log::error!("Failed to delete task '{}': {}", id, e);
            bail_public!(_, "Failed to delete task '{}': {}", id, e);
        }
        data.remove(&id);
        drop(data);

        log::info!("Deleted task '{}'", id);
        Ok(format!("Task {} deleted", id))
    }
}
