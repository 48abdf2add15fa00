//! Filtered and sorted views over a task snapshot
//!
//! Every function borrows its input and returns a new vector, so several views
//! can be computed from the same snapshot. None of them fail: an unmatched
//! filter yields an empty vector.

use std::cmp::Ordering;

use super::tags::Tags;
use super::task::{Quadrant, Task};

/// Tasks in `quadrant`, in input order
pub fn filter_by_quadrant(tasks: &[Task], quadrant: Quadrant) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.quadrant() == quadrant)
        .cloned()
        .collect()
}

/// Tasks carrying `tag`, in input order; `None` keeps every task
///
/// Matching is exact and case-sensitive per token ("Work" never matches
/// "Homework"). A tag containing the delimiter is matched against the whole
/// joined tag string and logged as a degraded match.
pub fn filter_by_tag(tasks: &[Task], tag: Option<&str>) -> Vec<Task> {
    let Some(tag) = tag else {
        return tasks.to_vec();
    };

    if let Some(ambiguity) = Tags::ambiguity(tag) {
        log::warn!("{}", ambiguity);
    }

    tasks
        .iter()
        .filter(|task| task.tags.contains(tag).is_match())
        .cloned()
        .collect()
}

/// Tasks ordered by deadline; tasks without one always come last
///
/// The sort is stable: equal deadlines, and deadline-less tasks, keep their
/// input order in either direction.
pub fn sort_by_deadline(tasks: &[Task], ascending: bool) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| match (a.deadline, b.deadline) {
        (Some(x), Some(y)) if ascending => x.cmp(&y),
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// The quadrant detail view: tag filter, then quadrant filter, then ascending
/// deadline sort
pub fn tasks_in_quadrant(tasks: &[Task], quadrant: Quadrant, tag: Option<&str>) -> Vec<Task> {
    let tagged = filter_by_tag(tasks, tag);
    let in_quadrant = filter_by_quadrant(&tagged, quadrant);
    sort_by_deadline(&in_quadrant, true)
}
