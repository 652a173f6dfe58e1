//! Integration tests for task store synchronization.
//!
//! Exercises the `TaskStore` against the in-process backend double:
//! fetch ordering, create/update reconciliation, failure behavior, and
//! board grouping over the resulting mirror.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::similar_names)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;
use zudio::backend::{BackendError, MemoryBackend};
use zudio::board;
use zudio::tasks::TaskStore;
use zudio_types::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn make_store() -> (Arc<MemoryBackend>, TaskStore<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let store = TaskStore::new(Arc::clone(&backend));
    (backend, store)
}

fn make_task(title: &str, status: TaskStatus, minutes_ago: i64) -> Task {
    Task {
        id: TaskId::new(),
        title: title.to_string(),
        description: None,
        priority: TaskPriority::Medium,
        status,
        due_date: None,
        created_by: Uuid::nil(),
        assigned_to: None,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

// ---------------------------------------------------------------------------
// Fetch ordering and loading flag
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_newest_first() {
    let (backend, mut store) = make_store();
    backend.seed_task(make_task("a", TaskStatus::Todo, 60)).await;
    backend.seed_task(make_task("b", TaskStatus::Todo, 5)).await;
    backend.seed_task(make_task("c", TaskStatus::Done, 30)).await;

    store.fetch_tasks().await.expect("fetch");

    let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn fetch_replaces_rather_than_merges() {
    let (backend, mut store) = make_store();
    backend.seed_task(make_task("first", TaskStatus::Todo, 1)).await;
    store.fetch_tasks().await.expect("fetch");

    // The backend's row set changes out from under the client.
    backend.seed_task(make_task("second", TaskStatus::Todo, 0)).await;
    store.fetch_tasks().await.expect("refetch");

    assert_eq!(store.tasks().len(), 2);
}

#[tokio::test]
async fn loading_flag_released_on_failure() {
    let (backend, mut store) = make_store();
    backend.fail_next_request(503, "unavailable").await;

    let err = store.fetch_tasks().await.expect_err("should fail");
    assert!(matches!(err, BackendError::Api { status: 503, .. }));
    assert!(!store.is_loading());
}

// ---------------------------------------------------------------------------
// Create and update reconciliation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_task_carries_backend_defaults() {
    let (_, mut store) = make_store();
    let created = store
        .create_task(&NewTask {
            title: "just a title".to_string(),
            ..NewTask::default()
        })
        .await
        .expect("create");

    // The backend fills id, timestamp, and column defaults.
    assert_eq!(created.priority, TaskPriority::Medium);
    assert_eq!(created.status, TaskStatus::Todo);
    assert_eq!(store.tasks().last().expect("present"), &created);
}

#[tokio::test]
async fn created_task_sits_at_tail_until_refetch() {
    let (backend, mut store) = make_store();
    backend.seed_task(make_task("old", TaskStatus::Todo, 10)).await;
    store.fetch_tasks().await.expect("fetch");

    store
        .create_task(&NewTask {
            title: "new".to_string(),
            ..NewTask::default()
        })
        .await
        .expect("create");
    assert_eq!(store.tasks()[1].title, "new");

    store.fetch_tasks().await.expect("refetch");
    assert_eq!(store.tasks()[0].title, "new");
}

#[tokio::test]
async fn update_patches_only_named_fields() {
    let (backend, mut store) = make_store();
    let task = make_task("keep my title", TaskStatus::Todo, 1);
    let id = task.id;
    backend.seed_task(task).await;
    store.fetch_tasks().await.expect("fetch");

    let patch = TaskPatch {
        status: Some(TaskStatus::InProgress),
        priority: Some(TaskPriority::Urgent),
        ..TaskPatch::default()
    };
    store.update_task(id, &patch).await.expect("update");

    let row = &store.tasks()[0];
    assert_eq!(row.title, "keep my title");
    assert_eq!(row.status, TaskStatus::InProgress);
    assert_eq!(row.priority, TaskPriority::Urgent);
}

#[tokio::test]
async fn update_against_missing_row_succeeds_remotely() {
    // A filter that matches no row is a successful empty update.
    let (_, mut store) = make_store();
    store
        .update_task(TaskId::new(), &TaskPatch::status(TaskStatus::Done))
        .await
        .expect("zero-row update is not an error");
    assert!(store.tasks().is_empty());
}

#[tokio::test]
async fn failed_mutation_leaves_mirror_untouched() {
    let (backend, mut store) = make_store();
    let task = make_task("stable", TaskStatus::Todo, 1);
    let id = task.id;
    backend.seed_task(task).await;
    store.fetch_tasks().await.expect("fetch");
    let before = store.tasks().to_vec();

    backend.fail_next_request(403, "row-level security").await;
    let err = store
        .update_task(id, &TaskPatch::status(TaskStatus::Done))
        .await
        .expect_err("should fail");
    assert!(matches!(err, BackendError::Api { status: 403, .. }));
    assert_eq!(store.tasks(), before.as_slice());
}

// ---------------------------------------------------------------------------
// Board grouping over the mirror
// ---------------------------------------------------------------------------

#[tokio::test]
async fn board_groups_fetched_tasks_without_losing_rows() {
    let (backend, mut store) = make_store();
    backend.seed_task(make_task("a", TaskStatus::Todo, 4)).await;
    backend.seed_task(make_task("b", TaskStatus::InProgress, 3)).await;
    backend.seed_task(make_task("c", TaskStatus::Done, 2)).await;
    backend.seed_task(make_task("d", TaskStatus::Unknown, 1)).await;
    store.fetch_tasks().await.expect("fetch");

    let columns = board::group_by_status(store.tasks());
    let grouped: usize = columns.iter().map(|c| c.tasks.len()).sum();
    assert_eq!(grouped, 4);
    assert_eq!(columns.last().expect("columns").status, TaskStatus::Unknown);
}

#[tokio::test]
async fn status_cycle_moves_task_across_columns() {
    let (backend, mut store) = make_store();
    let task = make_task("mover", TaskStatus::Todo, 1);
    let id = task.id;
    backend.seed_task(task).await;
    store.fetch_tasks().await.expect("fetch");

    // Walk the task through the full workflow.
    for expected in [
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
        TaskStatus::Todo,
    ] {
        let current = store.tasks()[0].status;
        store
            .update_task(id, &TaskPatch::status(current.next()))
            .await
            .expect("update");
        assert_eq!(store.tasks()[0].status, expected);
    }
}
