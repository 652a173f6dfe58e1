//! In-process backend for tests and offline demo mode.
//!
//! Mimics the hosted service's observable behavior: it assigns ids and
//! timestamps on insert, applies column defaults, returns task lists ordered
//! by creation time descending, and treats a patch that matches no row as a
//! zero-row success. Failure injection lets tests exercise the error paths
//! without a network.

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;
use zudio_types::{
    CollabRole, NewCollaborator, NewTask, Task, TaskCollaborator, TaskId, TaskPatch, TaskPriority,
    TaskStatus, User, UserRole,
};

use super::{Backend, BackendError};

/// In-memory backend double.
///
/// The session user is fixed at construction: `Some` simulates a signed-in
/// session, `None` simulates no session. Sign-out flips the session off for
/// subsequent `current_user` calls.
pub struct MemoryBackend {
    /// Current session user, if any.
    user: Mutex<Option<User>>,
    /// Stored task rows, in insertion order.
    tasks: Mutex<Vec<Task>>,
    /// Stored collaborator rows, in insertion order.
    collaborators: Mutex<Vec<TaskCollaborator>>,
    /// When set, the next request fails with this API error.
    fail_next: Mutex<Option<(u16, String)>>,
}

impl MemoryBackend {
    /// Creates an empty backend with no session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: Mutex::new(None),
            tasks: Mutex::new(Vec::new()),
            collaborators: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Creates an empty backend with a signed-in session.
    #[must_use]
    pub fn with_user(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
            tasks: Mutex::new(Vec::new()),
            collaborators: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Creates a backend preloaded with a demo user and a handful of demo
    /// tasks, for running the client without any backend configuration.
    #[must_use]
    pub fn demo() -> Self {
        let user = demo_user();
        let user_id = user.id;
        let now = Utc::now();

        let seeds = [
            ("Sketch the onboarding flow", TaskStatus::Todo, TaskPriority::Medium, Some(3)),
            ("Wire up invoice export", TaskStatus::Todo, TaskPriority::High, Some(-1)),
            ("Refactor notification settings", TaskStatus::InProgress, TaskPriority::Low, None),
            ("Fix the search pagination bug", TaskStatus::Review, TaskPriority::Urgent, Some(1)),
            ("Ship the Q2 report template", TaskStatus::Done, TaskPriority::Medium, None),
        ];

        let mut tasks = Vec::with_capacity(seeds.len());
        for (i, (title, status, priority, due_in_days)) in seeds.into_iter().enumerate() {
            tasks.push(Task {
                id: TaskId::new(),
                title: title.to_string(),
                description: None,
                priority,
                status,
                due_date: due_in_days.map(|days| now + Duration::days(days)),
                created_by: user_id,
                assigned_to: None,
                // Spread creation times so descending order is observable.
                created_at: now - Duration::minutes(i64::try_from(i).unwrap_or(0)),
            });
        }

        Self {
            user: Mutex::new(Some(user)),
            tasks: Mutex::new(tasks),
            collaborators: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Seeds a task row directly, bypassing id/timestamp assignment.
    pub async fn seed_task(&self, task: Task) {
        self.tasks.lock().await.push(task);
    }

    /// Makes the next request fail with the given API error.
    pub async fn fail_next_request(&self, status: u16, message: &str) {
        *self.fail_next.lock().await = Some((status, message.to_string()));
    }

    /// Returns a copy of the stored task rows, in insertion order.
    pub async fn stored_tasks(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }

    /// Returns a copy of the stored collaborator rows.
    pub async fn stored_collaborators(&self) -> Vec<TaskCollaborator> {
        self.collaborators.lock().await.clone()
    }

    /// Consumes a pending injected failure, if any.
    async fn take_failure(&self) -> Result<(), BackendError> {
        match self.fail_next.lock().await.take() {
            Some((status, message)) => Err(BackendError::Api { status, message }),
            None => Ok(()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    async fn current_user(&self) -> Result<Option<User>, BackendError> {
        self.take_failure().await?;
        Ok(self.user.lock().await.clone())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.take_failure().await?;
        *self.user.lock().await = None;
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.take_failure().await?;
        let mut tasks = self.tasks.lock().await.clone();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn insert_task(&self, new: &NewTask) -> Result<Task, BackendError> {
        self.take_failure().await?;
        let session_user = self.user.lock().await.as_ref().map(|u| u.id);
        let task = Task {
            id: TaskId::new(),
            title: new.title.clone(),
            description: new.description.clone(),
            priority: new.priority.unwrap_or(TaskPriority::Medium),
            status: new.status.unwrap_or(TaskStatus::Todo),
            due_date: new.due_date,
            created_by: new
                .created_by
                .or(session_user)
                .unwrap_or_else(Uuid::nil),
            assigned_to: new.assigned_to,
            created_at: Utc::now(),
        };
        self.tasks.lock().await.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<(), BackendError> {
        self.take_failure().await?;
        let mut tasks = self.tasks.lock().await;
        // Zero-row match is a success, like a REST patch with an id filter.
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            patch.apply(task);
        }
        Ok(())
    }

    async fn insert_collaborator(&self, new: &NewCollaborator) -> Result<(), BackendError> {
        self.take_failure().await?;
        self.collaborators.lock().await.push(TaskCollaborator {
            task_id: new.task_id,
            user_id: new.user_id,
            role: new.role,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

/// Builds the demo session user.
fn demo_user() -> User {
    User {
        id: Uuid::new_v4(),
        email: "demo@zudio.local".to_string(),
        full_name: Some("Demo User".to_string()),
        avatar_url: None,
        role: UserRole::Member,
        created_at: Utc::now(),
    }
}
