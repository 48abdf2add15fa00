use super::queries;
use super::task::{Quadrant, Task};
use crate::error::{MatrixError, MatrixResult};

/// In-memory task collection
///
/// Holds the snapshot loaded from a persistence collaborator and answers the
/// board and quadrant views. It never touches storage itself.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    /// All tasks, in insertion order
    ///
    /// A Vec keeps the order stable for display and for the stable filters
    /// and sorts built on top of it.
    tasks: Vec<Task>,

    /// Counter for generating unique task IDs
    task_counter: u32,
}

impl TaskStore {
    /// Create a new empty TaskStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a loaded snapshot
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            task_counter: 0,
        }
    }

    /// Generate a new unique task ID (`task-N`)
    pub fn generate_task_id(&mut self) -> String {
        loop {
            self.task_counter += 1;
            let id = format!("task-{}", self.task_counter);
            if self.find_by_id(&id).is_none() {
                return id;
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    /// Add a task, rejecting a duplicate ID
    pub fn add(&mut self, task: Task) -> MatrixResult<()> {
        if self.find_by_id(task.id()).is_some() {
            return Err(MatrixError::DuplicateId {
                id: task.id().to_string(),
            });
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Replace the task with the same ID in place, or append it
    pub fn upsert(&mut self, task: Task) {
        match self.find_by_id_mut(task.id()) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Remove a task by ID and return it
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id() == id)?;
        Some(self.tasks.remove(pos))
    }

    pub fn filter_by_quadrant(&self, quadrant: Quadrant) -> Vec<Task> {
        queries::filter_by_quadrant(&self.tasks, quadrant)
    }

    pub fn filter_by_tag(&self, tag: Option<&str>) -> Vec<Task> {
        queries::filter_by_tag(&self.tasks, tag)
    }

    pub fn sort_by_deadline(&self, ascending: bool) -> Vec<Task> {
        queries::sort_by_deadline(&self.tasks, ascending)
    }

    pub fn tasks_in_quadrant(&self, quadrant: Quadrant, tag: Option<&str>) -> Vec<Task> {
        queries::tasks_in_quadrant(&self.tasks, quadrant, tag)
    }

    /// The board view: one deadline-sorted list per quadrant, indexed by
    /// [`Quadrant::index`]
    pub fn matrix(&self, tag: Option<&str>) -> [Vec<Task>; 4] {
        let tagged = queries::filter_by_tag(&self.tasks, tag);
        Quadrant::ALL.map(|quadrant| queries::tasks_in_quadrant(&tagged, quadrant, None))
    }

    /// Number of tasks per quadrant, indexed by [`Quadrant::index`]
    pub fn count_by_quadrant(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for task in &self.tasks {
            counts[task.quadrant().index()] += 1;
        }
        counts
    }
}
