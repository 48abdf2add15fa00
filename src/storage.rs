//! Persistence collaborators
//!
//! The core never calls these directly; the server loads a snapshot with
//! `load_all` and hands each committed task to `save`. Writes are serialized
//! inside each repository.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::PersistenceError;
use crate::matrix::Task;

/// Current version of the TOML document layout
pub const FORMAT_VERSION: u32 = 1;

/// Load/save boundary for tasks
pub trait TaskRepository: Send + Sync {
    /// Load every stored task, in stored order
    fn load_all(&self) -> Result<Vec<Task>, PersistenceError>;

    /// Insert or replace a task by ID
    fn save(&self, task: &Task) -> Result<(), PersistenceError>;

    /// Remove a task by ID; `Ok(false)` when it was not stored
    fn delete(&self, id: &str) -> Result<bool, PersistenceError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(default = "default_format_version")]
    format_version: u32,
    #[serde(default)]
    tasks: Vec<Task>,
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

impl Default for TaskDocument {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            tasks: Vec::new(),
        }
    }
}

/// Tasks stored in a single TOML file
pub struct TomlStorage {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlStorage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_document(&self) -> Result<TaskDocument> {
        if !self.file_path.exists() {
            return Ok(TaskDocument::default());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(TaskDocument::default());
        }
        let document: TaskDocument = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(document)
    }

    fn write_document(&self, document: &TaskDocument) -> Result<()> {
        let content = toml::to_string_pretty(document).context("Failed to serialize tasks")?;
        let tmp_path = self.file_path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;
        Ok(())
    }
}

impl TaskRepository for TomlStorage {
    fn load_all(&self) -> Result<Vec<Task>, PersistenceError> {
        let _guard = self.lock();
        let document = self.read_document()?;
        log::info!(
            "Loaded {} task(s) from {}",
            document.tasks.len(),
            self.file_path.display()
        );
        Ok(document.tasks)
    }

    fn save(&self, task: &Task) -> Result<(), PersistenceError> {
        let _guard = self.lock();
        let mut document = self.read_document()?;
        match document.tasks.iter_mut().find(|t| t.id() == task.id()) {
            Some(existing) => *existing = task.clone(),
            None => document.tasks.push(task.clone()),
        }
        document.format_version = FORMAT_VERSION;
        self.write_document(&document)?;
        log::info!("Saved task '{}' to {}", task.id(), self.file_path.display());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, PersistenceError> {
        let _guard = self.lock();
        let mut document = self.read_document()?;
        let before = document.tasks.len();
        document.tasks.retain(|t| t.id() != id);
        if document.tasks.len() == before {
            return Ok(false);
        }
        self.write_document(&document)?;
        log::info!("Deleted task '{}' from {}", id, self.file_path.display());
        Ok(true)
    }
}

/// Tasks kept only in memory, lost on exit
#[derive(Default)]
pub struct MemoryStorage {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskRepository for MemoryStorage {
    fn load_all(&self) -> Result<Vec<Task>, PersistenceError> {
        Ok(self.lock().clone())
    }

    fn save(&self, task: &Task) -> Result<(), PersistenceError> {
        let mut tasks = self.lock();
        match tasks.iter_mut().find(|t| t.id() == task.id()) {
            Some(existing) => *existing = task.clone(),
            None => tasks.push(task.clone()),
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, PersistenceError> {
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|t| t.id() != id);
        Ok(tasks.len() != before)
    }
}
