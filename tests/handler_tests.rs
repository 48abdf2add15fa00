//! MCP tool handler tests
mod common;

use common::{
    FailingStorage, create_test_task, days_from_today, default_keywords,
    extract_id_from_response, get_memory_handler, get_test_handler,
};
use quadrant_mcp::error::PersistenceError;
use quadrant_mcp::{Quadrant, QuadrantServerHandler, Task, TaskRepository, TomlStorage};
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;
use tempfile::NamedTempFile;

/// `mcp_attr::Error` does not implement `Display`; expose its message as a string.
trait ErrorMessage {
    fn to_string(&self) -> String;
}

impl ErrorMessage for mcp_attr::Error {
    fn to_string(&self) -> String {
        self.to_error_object(true).message
    }
}

#[tokio::test]
async fn test_add_with_manual_scores() {
    let handler = get_memory_handler();

    let response = handler
        .handle_add(
            "Plan the offsite".to_string(),
            None,
            None,
            Some(7.0),
            Some(2.0),
            None,
        )
        .await
        .unwrap();
    assert!(response.contains("quadrant: 2"));

    let id = extract_id_from_response(&response);
    let tasks = handler.snapshot();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id(), id);
    assert_eq!(tasks[0].quadrant(), Quadrant::Important);
}

#[tokio::test]
async fn test_add_with_automatic_scores() {
    let handler = get_memory_handler();

    let response = handler
        .handle_add(
            "Tax return".to_string(),
            Some("critical and essential".to_string()),
            Some(days_from_today(1)),
            None,
            None,
            Some("Home".to_string()),
        )
        .await
        .unwrap();
    assert!(response.contains("quadrant: 1"));
}

#[tokio::test]
async fn test_add_rejects_empty_title_and_bad_input() {
    let handler = get_memory_handler();

    let result = handler
        .handle_add("   ".to_string(), None, None, None, None, None)
        .await;
    assert!(result.is_err());

    let result = handler
        .handle_add("Bad".to_string(), None, Some("tomorrow".to_string()), None, None, None)
        .await;
    assert!(result.is_err());

    let result = handler
        .handle_add("Bad".to_string(), None, None, Some(10.5), None, None)
        .await;
    assert!(result.is_err());

    assert!(handler.snapshot().is_empty());
}

#[tokio::test]
async fn test_suggest_does_not_store() {
    let handler = get_memory_handler();

    let response = handler
        .handle_suggest(
            Some("key deliverable, critical".to_string()),
            Some(days_from_today(20)),
        )
        .await
        .unwrap();
    assert!(response.contains("Suggested quadrant: 2"));
    assert!(response.contains("Importance: 5"));
    assert!(response.contains("Urgency: 0"));
    assert!(handler.snapshot().is_empty());
}

#[tokio::test]
async fn test_update_keeps_identity_completion_and_manual_scores() {
    let handler = get_memory_handler();
    let response = handler
        .handle_add("Write report".to_string(), None, None, Some(7.0), Some(2.0), None)
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    handler.handle_complete(id.clone(), Some(true)).await.unwrap();

    // New details would suggest quadrant 1, but stored sliders stay authoritative
    handler
        .handle_update(
            id.clone(),
            Some("Write final report".to_string()),
            Some("critical essential".to_string()),
            Some(days_from_today(0)),
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let tasks = handler.snapshot();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.id(), id);
    assert!(task.is_completed);
    assert_eq!(task.title.as_deref(), Some("Write final report"));
    assert_eq!(task.importance_score(), 7.0);
    assert_eq!(task.urgency_score(), 2.0);
    assert_eq!(task.quadrant(), Quadrant::Important);
}

#[tokio::test]
async fn test_update_with_auto_score_rederives() {
    let handler = get_memory_handler();
    let response = handler
        .handle_add("Deploy".to_string(), None, None, Some(0.0), Some(0.0), None)
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    handler
        .handle_update(
            id.clone(),
            None,
            Some("critical and essential".to_string()),
            Some(days_from_today(0)),
            None,
            None,
            None,
            Some(true),
        )
        .await
        .unwrap();

    let tasks = handler.snapshot();
    assert_eq!(tasks[0].quadrant(), Quadrant::UrgentImportant);
    assert_eq!(tasks[0].urgency_score(), 10.0);
}

#[tokio::test]
async fn test_update_clears_fields_and_rejects_unknown_id() {
    let handler = get_memory_handler();
    let response = handler
        .handle_add(
            "Groceries".to_string(),
            Some("milk".to_string()),
            Some(days_from_today(3)),
            Some(1.0),
            Some(1.0),
            Some("Home".to_string()),
        )
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    handler
        .handle_update(
            id,
            None,
            Some(String::new()),
            Some(String::new()),
            None,
            None,
            Some(String::new()),
            None,
        )
        .await
        .unwrap();
    let tasks = handler.snapshot();
    let task = &tasks[0];
    assert!(task.details.is_none());
    assert!(task.deadline.is_none());
    assert!(task.tags.is_empty());

    let result = handler
        .handle_update(
            "missing".to_string(),
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_complete_toggles() {
    let handler = get_memory_handler();
    let response = handler
        .handle_add("Call mom".to_string(), None, None, None, None, None)
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    let response = handler.handle_complete(id.clone(), None).await.unwrap();
    assert!(response.contains("completed"));
    assert!(handler.snapshot()[0].is_completed);

    handler.handle_complete(id.clone(), None).await.unwrap();
    assert!(!handler.snapshot()[0].is_completed);

    assert!(handler.handle_complete("nope".to_string(), None).await.is_err());
}

#[tokio::test]
async fn test_list_quadrant_filters_by_tag_and_sorts() {
    let handler = get_memory_handler();
    for (title, deadline, tags) in [
        ("later", Some(days_from_today(5)), "Work"),
        ("sooner", Some(days_from_today(2)), "Work, Personal"),
        ("homework", Some(days_from_today(1)), "Homework"),
        ("undated", None, "Work"),
    ] {
        handler
            .handle_add(
                title.to_string(),
                None,
                deadline,
                Some(9.0),
                Some(9.0),
                Some(tags.to_string()),
            )
            .await
            .unwrap();
    }

    let list = handler
        .handle_list(Some("1".to_string()), Some("Work".to_string()), None)
        .await
        .unwrap();
    assert!(list.starts_with("Found 3 task(s)"));
    assert!(!list.contains("homework"));
    let sooner = list.find("sooner").unwrap();
    let later = list.find("later").unwrap();
    let undated = list.find("undated").unwrap();
    assert!(sooner < later && later < undated);

    let empty = handler
        .handle_list(Some("3".to_string()), None, None)
        .await
        .unwrap();
    assert_eq!(empty, "No tasks found");

    assert!(
        handler
            .handle_list(Some("7".to_string()), None, None)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_matrix_overview() {
    let handler = get_memory_handler();
    handler
        .handle_add("q1".to_string(), None, None, Some(9.0), Some(9.0), None)
        .await
        .unwrap();
    handler
        .handle_add("q4".to_string(), None, None, Some(0.0), Some(0.0), None)
        .await
        .unwrap();

    let board = handler.handle_matrix(None).await.unwrap();
    assert!(board.contains("Quadrant 1 (urgent & important): 1 task(s)"));
    assert!(board.contains("Quadrant 2 (important, not urgent): 0 task(s)"));
    assert!(board.contains("Quadrant 4 (neither urgent nor important): 1 task(s)"));
}

#[tokio::test]
async fn test_delete() {
    let handler = get_memory_handler();
    let response = handler
        .handle_add("Old".to_string(), None, None, None, None, None)
        .await
        .unwrap();
    let id = extract_id_from_response(&response);

    handler.handle_delete(id.clone()).await.unwrap();
    assert!(handler.snapshot().is_empty());
    assert!(handler.handle_delete(id).await.is_err());
}

#[tokio::test]
async fn test_failed_save_keeps_task_in_memory() {
    let handler =
        QuadrantServerHandler::with_repository(Box::new(FailingStorage), default_keywords())
            .unwrap();

    let result = handler
        .handle_add("Unsaved".to_string(), None, None, Some(6.0), Some(6.0), None)
        .await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("kept in memory"));

    let tasks = handler.snapshot();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].display_title(), "Unsaved");
}

#[tokio::test]
async fn test_failed_delete_keeps_task_in_memory() {
    let handler =
        QuadrantServerHandler::with_repository(Box::new(FailingStorage), default_keywords())
            .unwrap();

    // The save fails too, but the task stays in memory
    let response = handler
        .handle_add("Pinned".to_string(), None, None, None, None, None)
        .await;
    assert!(response.is_err());
    let id = handler.snapshot()[0].id().to_string();

    let err = handler.handle_delete(id.clone()).await.unwrap_err();
    assert!(err.to_string().contains("Failed to delete"));

    let tasks = handler.snapshot();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id(), id);
}

/// TOML repository that holds back the save of one title until another save
/// arrives (or a short timeout passes)
struct GatedStorage {
    inner: TomlStorage,
    held_title: &'static str,
    entered: Mutex<mpsc::Sender<()>>,
    release_tx: Mutex<mpsc::Sender<()>>,
    release_rx: Mutex<mpsc::Receiver<()>>,
}

impl TaskRepository for GatedStorage {
    fn load_all(&self) -> Result<Vec<Task>, PersistenceError> {
        self.inner.load_all()
    }

    fn save(&self, task: &Task) -> Result<(), PersistenceError> {
        if task.title.as_deref() == Some(self.held_title) {
            let _ = self.entered.lock().unwrap().send(());
            let _ = self
                .release_rx
                .lock()
                .unwrap()
                .recv_timeout(Duration::from_millis(300));
        } else {
            let _ = self.release_tx.lock().unwrap().send(());
        }
        self.inner.save(task)
    }

    fn delete(&self, id: &str) -> Result<bool, PersistenceError> {
        self.inner.delete(id)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_overlapping_updates_persist_latest_edit() {
    let temp_file = NamedTempFile::new().unwrap();
    TomlStorage::new(temp_file.path())
        .save(&create_test_task("task-1", 6.0, 6.0))
        .unwrap();

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let storage = GatedStorage {
        inner: TomlStorage::new(temp_file.path()),
        held_title: "v1",
        entered: Mutex::new(entered_tx),
        release_tx: Mutex::new(release_tx),
        release_rx: Mutex::new(release_rx),
    };
    let handler = Arc::new(
        QuadrantServerHandler::with_repository(Box::new(storage), default_keywords()).unwrap(),
    );

    let rename = |title: &'static str| {
        let handler = Arc::clone(&handler);
        async move {
            handler
                .handle_update(
                    "task-1".to_string(),
                    Some(title.to_string()),
                    None,
                    None,
                    None,
                    None,
                    None,
                    None,
                )
                .await
                .is_ok()
        }
    };

    let first = tokio::spawn(rename("v1"));
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let second = tokio::spawn(rename("v2"));
    assert!(first.await.unwrap());
    assert!(second.await.unwrap());

    let in_memory = handler.snapshot();
    assert_eq!(in_memory[0].title.as_deref(), Some("v2"));
    let persisted = TomlStorage::new(temp_file.path()).load_all().unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].title.as_deref(), Some("v2"));
}

#[tokio::test]
async fn test_tasks_survive_restart() {
    let (handler, temp_file) = get_test_handler();
    handler
        .handle_add(
            "Persisted".to_string(),
            None,
            None,
            Some(7.0),
            Some(2.0),
            Some("Work".to_string()),
        )
        .await
        .unwrap();
    drop(handler);

    let reloaded = QuadrantServerHandler::new(temp_file.path().to_str().unwrap()).unwrap();
    let tasks = reloaded.snapshot();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].quadrant(), Quadrant::Important);
    assert_eq!(tasks[0].importance_score(), 7.0);
    assert_eq!(tasks[0].urgency_score(), 2.0);
    assert_eq!(tasks[0].tags.joined(), "Work");

    let response = reloaded
        .handle_add("Next".to_string(), None, None, None, None, None)
        .await
        .unwrap();
    assert_eq!(extract_id_from_response(&response), "task-2");
}
