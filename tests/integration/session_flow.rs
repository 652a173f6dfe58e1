//! Integration tests for the session lifecycle.
//!
//! Covers session resolution, sign-out, and the store worker wiring that
//! drives the route gate: every path out of the loading state must emit a
//! `SessionResolved` event.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use uuid::Uuid;
use zudio::backend::MemoryBackend;
use zudio::remote::{StoreCommand, StoreEvent, spawn_stores};
use zudio::session::{SessionState, SessionStore};
use zudio_types::{NewTask, User, UserRole};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn make_user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        full_name: None,
        avatar_url: None,
        role: UserRole::Member,
        created_at: Utc::now(),
    }
}

async fn next_event(rx: &mut mpsc::Receiver<StoreEvent>) -> StoreEvent {
    rx.recv().await.expect("worker dropped event channel")
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_starts_loading_and_resolves_to_authenticated() {
    let backend = Arc::new(MemoryBackend::with_user(make_user("ada@example.com")));
    let mut session = SessionStore::new(backend);
    assert!(matches!(session.state(), SessionState::Loading));

    session.initialize().await.expect("initialize");
    match session.state() {
        SessionState::Authenticated(user) => assert_eq!(user.email, "ada@example.com"),
        other => panic!("expected authenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_session_resolves_to_unauthenticated() {
    let backend = Arc::new(MemoryBackend::new());
    let mut session = SessionStore::new(backend);
    session.initialize().await.expect("initialize");
    assert!(matches!(session.state(), SessionState::Unauthenticated));
}

#[tokio::test]
async fn failed_initialization_still_leaves_loading_state() {
    let backend = Arc::new(MemoryBackend::with_user(make_user("ada@example.com")));
    backend.fail_next_request(500, "auth service down").await;

    let mut session = SessionStore::new(backend);
    let result = session.initialize().await;
    assert!(result.is_err());
    // The gate must not stay on the loading screen after a failure.
    assert!(matches!(session.state(), SessionState::Unauthenticated));
}

#[tokio::test]
async fn sign_out_failure_keeps_the_session() {
    let backend = Arc::new(MemoryBackend::with_user(make_user("ada@example.com")));
    let mut session = SessionStore::new(Arc::clone(&backend));
    session.initialize().await.expect("initialize");

    backend.fail_next_request(500, "logout failed").await;
    assert!(session.sign_out().await.is_err());
    assert!(matches!(session.state(), SessionState::Authenticated(_)));
}

// ---------------------------------------------------------------------------
// Worker wiring: session gate end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn worker_emits_session_before_anything_else() {
    let (_, mut evt_rx) = spawn_stores(Arc::new(MemoryBackend::demo()));
    assert!(matches!(
        next_event(&mut evt_rx).await,
        StoreEvent::SessionResolved { user: Some(_) }
    ));
}

#[tokio::test]
async fn failed_session_init_emits_error_then_resolution() {
    let backend = Arc::new(MemoryBackend::with_user(make_user("ada@example.com")));
    backend.fail_next_request(500, "auth down").await;

    let (_, mut evt_rx) = spawn_stores(backend);
    assert!(matches!(next_event(&mut evt_rx).await, StoreEvent::Error(_)));
    assert!(matches!(
        next_event(&mut evt_rx).await,
        StoreEvent::SessionResolved { user: None }
    ));
}

#[tokio::test]
async fn full_flow_fetch_create_sign_out() {
    let backend = Arc::new(MemoryBackend::demo());
    let (cmd_tx, mut evt_rx) = spawn_stores(Arc::clone(&backend));

    let user = match next_event(&mut evt_rx).await {
        StoreEvent::SessionResolved { user: Some(user) } => user,
        other => panic!("expected session, got {other:?}"),
    };

    cmd_tx.send(StoreCommand::FetchTasks).await.unwrap();
    assert!(matches!(next_event(&mut evt_rx).await, StoreEvent::FetchStarted));
    let initial = match next_event(&mut evt_rx).await {
        StoreEvent::TasksChanged { tasks } => tasks.len(),
        other => panic!("expected tasks, got {other:?}"),
    };
    assert!(initial > 0);

    cmd_tx
        .send(StoreCommand::CreateTask(NewTask {
            title: "end to end".to_string(),
            ..NewTask::default()
        }))
        .await
        .unwrap();
    match next_event(&mut evt_rx).await {
        StoreEvent::TasksChanged { tasks } => {
            assert_eq!(tasks.len(), initial + 1);
            let created = tasks.last().unwrap();
            assert_eq!(created.created_by, user.id);
        }
        other => panic!("expected tasks, got {other:?}"),
    }

    cmd_tx.send(StoreCommand::SignOut).await.unwrap();
    assert!(matches!(next_event(&mut evt_rx).await, StoreEvent::SignedOut));
    assert!(backend.stored_tasks().await.len() > initial); // rows survive sign-out
}
