//! Store coordinator for wiring the TUI to the async backend stores.
//!
//! Bridges the poll-based TUI event loop with the async [`SessionStore`] /
//! [`TaskStore`] pair. A single background tokio task owns both stores and
//! processes commands one at a time, so the local task list is only ever
//! mutated from one execution context.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  <-- StoreEvent ---  store worker task
//!                     --- StoreCommand ->
//! ```
//!
//! The main thread sends [`StoreCommand`]s (fetch, create, update) and
//! drains [`StoreEvent`]s on each tick of the poll-based event loop. Store
//! errors become [`StoreEvent::Error`] values: the UI displays them, nothing
//! is retried, and no failure is swallowed.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;
use zudio_types::{CollabRole, NewTask, Task, TaskId, TaskPatch, User};

use crate::backend::Backend;
use crate::session::SessionStore;
use crate::tasks::TaskStore;

/// Commands sent from the TUI main loop to the store worker.
#[derive(Debug)]
pub enum StoreCommand {
    /// Re-fetch the full task list from the backend.
    FetchTasks,
    /// Insert a new task; `created_by` is filled from the session when
    /// absent.
    CreateTask(NewTask),
    /// Patch one task.
    UpdateTask {
        /// Task to patch.
        id: TaskId,
        /// Fields to change.
        patch: TaskPatch,
    },
    /// Insert a collaborator association for a task.
    AddCollaborator {
        /// Task to share.
        task_id: TaskId,
        /// User to add.
        user_id: Uuid,
        /// Access level.
        role: CollabRole,
    },
    /// Terminate the session and clear the local task list.
    SignOut,
    /// Gracefully shut down the worker.
    Shutdown,
}

/// Events sent from the store worker to the TUI main loop.
#[derive(Debug)]
pub enum StoreEvent {
    /// Session initialization resolved.
    SessionResolved {
        /// The signed-in user, or `None` when no session exists.
        user: Option<User>,
    },
    /// A fetch went out; the UI may show its loading indicator.
    FetchStarted,
    /// The local task list changed; this is the new mirror.
    TasksChanged {
        /// Snapshot of the store's task list.
        tasks: Vec<Task>,
    },
    /// Sign-out completed and the task list was cleared.
    SignedOut,
    /// A non-error notice worth surfacing to the user.
    Notice(String),
    /// A store operation failed; the caller decides how to display it.
    Error(String),
}

/// Default channel capacity for commands and events.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Spawns the store worker and returns channel handles.
///
/// The worker initializes the session first and emits
/// [`StoreEvent::SessionResolved`], then serves commands until
/// [`StoreCommand::Shutdown`] arrives or the command channel closes. A
/// failed initialization emits [`StoreEvent::Error`] followed by
/// `SessionResolved { user: None }`, so the UI always leaves its loading
/// screen.
#[must_use]
pub fn spawn_stores<B>(backend: Arc<B>) -> (mpsc::Sender<StoreCommand>, mpsc::Receiver<StoreEvent>)
where
    B: Backend + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<StoreCommand>(DEFAULT_CHANNEL_CAPACITY);
    let (evt_tx, evt_rx) = mpsc::channel::<StoreEvent>(DEFAULT_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        worker(backend, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: owns the stores and serves commands sequentially.
async fn worker<B: Backend>(
    backend: Arc<B>,
    mut cmd_rx: mpsc::Receiver<StoreCommand>,
    evt_tx: mpsc::Sender<StoreEvent>,
) {
    let mut session = SessionStore::new(Arc::clone(&backend));
    let mut tasks = TaskStore::new(backend);

    if let Err(e) = session.initialize().await {
        let _ = evt_tx.send(StoreEvent::Error(e.to_string())).await;
    }
    let _ = evt_tx
        .send(StoreEvent::SessionResolved {
            user: session.user().cloned(),
        })
        .await;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            StoreCommand::FetchTasks => {
                let _ = evt_tx.send(StoreEvent::FetchStarted).await;
                match tasks.fetch_tasks().await {
                    Ok(()) => {
                        let _ = evt_tx
                            .send(StoreEvent::TasksChanged {
                                tasks: tasks.tasks().to_vec(),
                            })
                            .await;
                    }
                    Err(e) => {
                        let _ = evt_tx
                            .send(StoreEvent::Error(format!("Fetch failed: {e}")))
                            .await;
                    }
                }
            }
            StoreCommand::CreateTask(mut new) => {
                if new.created_by.is_none() {
                    new.created_by = session.user().map(|u| u.id);
                }
                match tasks.create_task(&new).await {
                    Ok(_) => {
                        let _ = evt_tx
                            .send(StoreEvent::TasksChanged {
                                tasks: tasks.tasks().to_vec(),
                            })
                            .await;
                    }
                    Err(e) => {
                        let _ = evt_tx
                            .send(StoreEvent::Error(format!("Create failed: {e}")))
                            .await;
                    }
                }
            }
            StoreCommand::UpdateTask { id, patch } => match tasks.update_task(id, &patch).await {
                Ok(()) => {
                    let _ = evt_tx
                        .send(StoreEvent::TasksChanged {
                            tasks: tasks.tasks().to_vec(),
                        })
                        .await;
                }
                Err(e) => {
                    let _ = evt_tx
                        .send(StoreEvent::Error(format!("Update failed: {e}")))
                        .await;
                }
            },
            StoreCommand::AddCollaborator {
                task_id,
                user_id,
                role,
            } => match tasks.add_collaborator(task_id, user_id, role).await {
                Ok(()) => {
                    let _ = evt_tx
                        .send(StoreEvent::Notice(format!("Added {role} to task")))
                        .await;
                }
                Err(e) => {
                    let _ = evt_tx
                        .send(StoreEvent::Error(format!("Share failed: {e}")))
                        .await;
                }
            },
            StoreCommand::SignOut => match session.sign_out().await {
                Ok(()) => {
                    tasks.clear();
                    let _ = evt_tx.send(StoreEvent::SignedOut).await;
                }
                Err(e) => {
                    let _ = evt_tx
                        .send(StoreEvent::Error(format!("Sign out failed: {e}")))
                        .await;
                }
            },
            StoreCommand::Shutdown => {
                tracing::info!("store worker shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    async fn next_event(rx: &mut mpsc::Receiver<StoreEvent>) -> StoreEvent {
        rx.recv().await.expect("worker dropped event channel")
    }

    #[tokio::test]
    async fn worker_resolves_session_first() {
        let (_, mut evt_rx) = spawn_stores(Arc::new(MemoryBackend::demo()));
        let event = next_event(&mut evt_rx).await;
        assert!(matches!(
            event,
            StoreEvent::SessionResolved { user: Some(_) }
        ));
    }

    #[tokio::test]
    async fn worker_reports_missing_session() {
        let (_, mut evt_rx) = spawn_stores(Arc::new(MemoryBackend::new()));
        let event = next_event(&mut evt_rx).await;
        assert!(matches!(event, StoreEvent::SessionResolved { user: None }));
    }

    #[tokio::test]
    async fn fetch_emits_started_then_changed() {
        let (cmd_tx, mut evt_rx) = spawn_stores(Arc::new(MemoryBackend::demo()));
        let _ = next_event(&mut evt_rx).await; // SessionResolved

        cmd_tx.send(StoreCommand::FetchTasks).await.unwrap();
        assert!(matches!(next_event(&mut evt_rx).await, StoreEvent::FetchStarted));
        match next_event(&mut evt_rx).await {
            StoreEvent::TasksChanged { tasks } => assert!(!tasks.is_empty()),
            other => panic!("expected TasksChanged, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_fetch_becomes_error_event() {
        let backend = Arc::new(MemoryBackend::demo());
        let (cmd_tx, mut evt_rx) = spawn_stores(Arc::clone(&backend));
        let _ = next_event(&mut evt_rx).await;

        backend.fail_next_request(500, "boom").await;
        cmd_tx.send(StoreCommand::FetchTasks).await.unwrap();
        let _ = next_event(&mut evt_rx).await; // FetchStarted
        assert!(matches!(next_event(&mut evt_rx).await, StoreEvent::Error(_)));
    }

    #[tokio::test]
    async fn create_fills_created_by_from_session() {
        let backend = Arc::new(MemoryBackend::demo());
        let (cmd_tx, mut evt_rx) = spawn_stores(Arc::clone(&backend));
        let user = match next_event(&mut evt_rx).await {
            StoreEvent::SessionResolved { user: Some(user) } => user,
            other => panic!("expected session, got {other:?}"),
        };

        cmd_tx
            .send(StoreCommand::CreateTask(NewTask {
                title: "from worker".to_string(),
                ..NewTask::default()
            }))
            .await
            .unwrap();
        let _ = next_event(&mut evt_rx).await; // TasksChanged

        let stored = backend.stored_tasks().await;
        let created = stored.iter().find(|t| t.title == "from worker").unwrap();
        assert_eq!(created.created_by, user.id);
    }

    #[tokio::test]
    async fn sign_out_clears_and_reports() {
        let (cmd_tx, mut evt_rx) = spawn_stores(Arc::new(MemoryBackend::demo()));
        let _ = next_event(&mut evt_rx).await;

        cmd_tx.send(StoreCommand::SignOut).await.unwrap();
        assert!(matches!(next_event(&mut evt_rx).await, StoreEvent::SignedOut));
    }
}
