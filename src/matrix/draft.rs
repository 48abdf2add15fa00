//! Raw field edits for a task that is being created or edited
//!
//! A draft gives a live, advisory quadrant suggestion while it changes and
//! the authoritative scores when it is committed. Per axis, a manual slider
//! value wins over the automatic score.

use chrono::NaiveDate;

use super::classifier::{self, ScoreInput, Suggestion};
use super::tags::Tags;
use super::task::Task;
use crate::error::MatrixResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: Option<String>,
    pub details: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub importance: ScoreInput,
    pub urgency: ScoreInput,
    pub tags: Tags,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Pre-fill a draft from a stored task; its scores become slider values
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            details: task.details.clone(),
            deadline: task.deadline,
            importance: ScoreInput::Manual(task.importance_score()),
            urgency: ScoreInput::Manual(task.urgency_score()),
            tags: task.tags.clone(),
        }
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn importance(mut self, input: ScoreInput) -> Self {
        self.importance = input;
        self
    }

    pub fn urgency(mut self, input: ScoreInput) -> Self {
        self.urgency = input;
        self
    }

    pub fn tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Suggested quadrant from details and deadline alone
    pub fn suggestion<S: AsRef<str>>(&self, today: NaiveDate, keywords: &[S]) -> Suggestion {
        classifier::suggest(self.non_empty_details(), self.deadline, today, keywords)
    }

    /// Importance and urgency that will be saved
    pub fn resolve_scores<S: AsRef<str>>(
        &self,
        today: NaiveDate,
        keywords: &[S],
    ) -> MatrixResult<(f64, f64)> {
        let importance =
            classifier::resolve_importance(self.importance, self.non_empty_details(), keywords)?;
        let urgency = classifier::resolve_urgency(self.urgency, self.deadline, today)?;
        Ok((importance, urgency))
    }

    /// Commit the draft as a new task
    pub fn build<S: AsRef<str>>(
        &self,
        id: impl Into<String>,
        today: NaiveDate,
        keywords: &[S],
    ) -> MatrixResult<Task> {
        let (importance, urgency) = self.resolve_scores(today, keywords)?;
        let mut task = Task::new(id, importance, urgency)?;
        task.title = self.title.clone();
        task.details = self.details.clone();
        task.deadline = self.deadline;
        task.tags = self.tags.clone();
        task.created_at = today;
        task.updated_at = today;
        log::debug!("Built task '{}' in quadrant {}", task.id(), task.quadrant());
        Ok(task)
    }

    /// Commit the draft onto an existing task
    ///
    /// ID, completion flag and creation date are kept. On error the task is
    /// left unchanged.
    pub fn apply_to<S: AsRef<str>>(
        &self,
        task: &mut Task,
        today: NaiveDate,
        keywords: &[S],
    ) -> MatrixResult<()> {
        let (importance, urgency) = self.resolve_scores(today, keywords)?;
        task.set_scores(importance, urgency)?;
        task.title = self.title.clone();
        task.details = self.details.clone();
        task.deadline = self.deadline;
        task.tags = self.tags.clone();
        task.updated_at = today;
        Ok(())
    }

    fn non_empty_details(&self) -> Option<&str> {
        self.details.as_deref().filter(|d| !d.is_empty())
    }
}
