//! The task store: local mirror plus remote mutations.

use std::sync::Arc;

use uuid::Uuid;
use zudio_types::{CollabRole, NewCollaborator, NewTask, Task, TaskId, TaskPatch};

use crate::backend::{Backend, BackendError};

/// Maintains the visible task list and applies mutations against the
/// backend.
///
/// Every operation is one remote call followed by a local reconcile that
/// assumes the call's outcome is final. There is no retry, no rollback (no
/// operation mutates locally before the backend confirms), and no
/// sequencing between overlapping calls: if two updates race, the local
/// merge order is last-response-wins.
pub struct TaskStore<B> {
    backend: Arc<B>,
    tasks: Vec<Task>,
    loading: bool,
}

impl<B: Backend> TaskStore<B> {
    /// Creates an empty store.
    pub const fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            tasks: Vec::new(),
            loading: false,
        }
    }

    /// Replaces the local list with the backend's rows, ordered by creation
    /// time descending.
    ///
    /// The loading flag is set for the duration of the request and released
    /// on every exit path, including failure.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`]; the local list is left unchanged on
    /// failure.
    pub async fn fetch_tasks(&mut self) -> Result<(), BackendError> {
        self.loading = true;
        let result = self.backend.list_tasks().await;
        self.loading = false;
        self.tasks = result?;
        tracing::debug!(count = self.tasks.len(), "task list replaced");
        Ok(())
    }

    /// Inserts a new task and appends the backend's canonical row to the
    /// local list.
    ///
    /// The row is appended, not re-inserted at the head, so the list's
    /// descending creation order is only restored by the next fetch.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`]; the local list is unchanged on
    /// failure.
    pub async fn create_task(&mut self, new: &NewTask) -> Result<Task, BackendError> {
        let task = self.backend.insert_task(new).await?;
        tracing::debug!(id = %task.id, "task created");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Patches the task matching `id` and shallow-merges the patch into the
    /// matching local row.
    ///
    /// Backend-computed side effects of the update are not reflected locally
    /// until the next fetch. If the id is absent from the local mirror the
    /// merge is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`]; the local list is unchanged on
    /// failure.
    pub async fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<(), BackendError> {
        self.backend.update_task(id, patch).await?;
        tracing::debug!(id = %id, "task patched");
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            patch.apply(task);
        }
        Ok(())
    }

    /// Inserts a collaborator association row.
    ///
    /// Collaborators are write-only in this client; no local state is
    /// mirrored.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`].
    pub async fn add_collaborator(
        &mut self,
        task_id: TaskId,
        user_id: Uuid,
        role: CollabRole,
    ) -> Result<(), BackendError> {
        self.backend
            .insert_collaborator(&NewCollaborator {
                task_id,
                user_id,
                role,
            })
            .await?;
        tracing::debug!(task = %task_id, "collaborator added");
        Ok(())
    }

    /// Empties the local mirror (sign-out path).
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// The current local task list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether a fetch is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
}
