//! Quadrant MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server that sorts tasks
//! into the four quadrants of the Eisenhower Matrix (urgent & important,
//! important, urgent, neither) and answers filtered views of them.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `QuadrantServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `matrix` module - Classification rules and task queries
//! - **Persistence Layer**: `storage` module - `TaskRepository` with a TOML file backend
//!
//! # Example
//!
//! ```no_run
//! use quadrant_mcp::QuadrantServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = QuadrantServerHandler::new("tasks.toml")?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatting;
mod handlers;
pub mod logging;
pub mod matrix;
pub mod storage;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::bail_public;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export commonly used types
pub use config::Config;
pub use error::{MatrixError, MatrixResult, PersistenceError};
pub use matrix::{Quadrant, ScoreInput, Tags, Task, TaskDraft, TaskStore};
pub use storage::{MemoryStorage, TaskRepository, TomlStorage};

/// MCP Server handler for Eisenhower Matrix task management
///
/// Holds the in-memory task snapshot and the persistence collaborator. Every
/// committed change is applied in memory first, then saved while the store
/// lock is still held, so saves reach the repository in commit order. A failed
/// save leaves the change in memory so it can be retried.
pub struct QuadrantServerHandler {
    pub(crate) data: Mutex<TaskStore>,
    pub(crate) storage: Box<dyn TaskRepository>,
    pub(crate) keywords: Vec<String>,
}

impl QuadrantServerHandler {
    /// Create a new handler backed by a TOML file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the task data file (TOML format)
    ///
    /// # Example
    /// ```no_run
    /// # use quadrant_mcp::QuadrantServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = QuadrantServerHandler::new("tasks.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: &str) -> Result<Self> {
        Self::with_repository(
            Box::new(TomlStorage::new(storage_path)),
            Config::default().keywords,
        )
    }

    /// Create a handler over any repository, with the importance keywords to use
    pub fn with_repository(storage: Box<dyn TaskRepository>, keywords: Vec<String>) -> Result<Self> {
        let tasks = storage.load_all()?;
        let data = Mutex::new(TaskStore::from_tasks(tasks));
        Ok(Self {
            data,
            storage,
            keywords,
        })
    }

    pub(crate) fn data(&self) -> MutexGuard<'_, TaskStore> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current in-memory tasks
    pub fn snapshot(&self) -> Vec<Task> {
        self.data().tasks().to_vec()
    }

    /// Save one task through the repository
    ///
    /// Call with the store guard held. The in-memory store already holds the
    /// change; on failure it stays there.
    fn persist(&self, task: &Task) -> McpResult<()> {
        if let Err(e) = self.storage.save(task) {
            log::error!("Failed to save task '{}': {}", task.id(), e);
            bail_public!(
                _,
                "Failed to save task '{}': {}. The change is kept in memory; retry with update() to save it again.",
                task.id(),
                e
            );
        }
        Ok(())
    }
}

/// Eisenhower Matrix task server.
///
/// Tasks are placed in one of four quadrants derived from an importance score and
/// an urgency score (each 0-10, "high" means >= 5):
/// - **1**: urgent & important - do first
/// - **2**: important, not urgent - schedule
/// - **3**: urgent, not important - delegate
/// - **4**: neither - drop
///
/// Scores are either set manually (slider values 0-10) or derived automatically:
/// importance from keywords in the details (critical, important, key, essential; 2.5 each),
/// urgency from the deadline (10 minus days left, today or overdue = 10).
///
/// Task IDs are generated: task-1, task-2, ...
#[mcp_server]
impl McpServer for QuadrantServerHandler {
    /// **Add**: Create a task and place it in a quadrant.
    /// **Scores**: Give importance/urgency (0-10) to set them manually; omit them to derive automatically.
    /// **Next**: Use matrix() to see the board, list(quadrant=...) for one quadrant.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn add(
        &self,
        /// Title: brief description (required, non-empty)
        title: String,
        /// Details: free text, scanned for importance keywords (optional)
        details: Option<String>,
        /// Deadline: YYYY-MM-DD (optional)
        deadline: Option<String>,
        /// Importance 0-10, omit for automatic (optional)
        importance: Option<f64>,
        /// Urgency 0-10, omit for automatic (optional)
        urgency: Option<f64>,
        /// Tags/spaces, comma separated: "Work, Personal" (optional)
        tags: Option<String>,
    ) -> McpResult<String> {
        self.handle_add(title, details, deadline, importance, urgency, tags)
            .await
    }

    /// **Suggest**: Preview the quadrant that details and deadline alone would give. Nothing is saved.
    #[tool]
    async fn suggest(
        &self,
        /// Details text to scan for importance keywords (optional)
        details: Option<String>,
        /// Deadline: YYYY-MM-DD (optional)
        deadline: Option<String>,
    ) -> McpResult<String> {
        self.handle_suggest(details, deadline).await
    }

    /// **Update**: Edit a task in place. The ID never changes and completion is kept.
    /// **Scores**: Stored scores are kept unless importance/urgency are given; auto_score=true re-derives the others.
    /// **Tip**: Use "" to clear details, deadline or tags.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update(
        &self,
        /// ID of task to update
        id: String,
        /// New title (optional, non-empty)
        title: Option<String>,
        /// New details, ""=clear (optional)
        details: Option<String>,
        /// Deadline YYYY-MM-DD, ""=clear (optional)
        deadline: Option<String>,
        /// Importance 0-10 (optional)
        importance: Option<f64>,
        /// Urgency 0-10 (optional)
        urgency: Option<f64>,
        /// Tags, comma separated, ""=clear (optional)
        tags: Option<String>,
        /// Re-derive scores not given explicitly from details/deadline (optional)
        auto_score: Option<bool>,
    ) -> McpResult<String> {
        self.handle_update(
            id, title, details, deadline, importance, urgency, tags, auto_score,
        )
        .await
    }

    /// **Complete**: Mark a task completed or not. Omit `completed` to toggle.
    #[tool]
    async fn complete(
        &self,
        /// Task ID
        id: String,
        /// true=completed, false=open, omit=toggle
        completed: Option<bool>,
    ) -> McpResult<String> {
        self.handle_complete(id, completed).await
    }

    /// **List**: Tasks filtered by tag then quadrant, sorted by deadline (no deadline last).
    /// **Use**: quadrant="1".."4" for one quadrant; omit for all tasks.
    #[tool]
    async fn list(
        &self,
        /// Quadrant 1-4 (optional)
        quadrant: Option<String>,
        /// Tag/space to filter by, exact match (optional)
        tag: Option<String>,
        /// Latest deadline first (optional, default false)
        descending: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list(quadrant, tag, descending).await
    }

    /// **Matrix**: The four-quadrant board, each quadrant sorted by deadline.
    #[tool]
    async fn matrix(
        &self,
        /// Tag/space to filter by, exact match (optional)
        tag: Option<String>,
    ) -> McpResult<String> {
        self.handle_matrix(tag).await
    }

    /// **Delete**: Permanently remove a task by ID.
    #[tool]
    async fn delete(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete(id).await
    }
}
