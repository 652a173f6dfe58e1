//! Collaborator rows.
//!
//! Collaborators are write-only from the client: the board inserts
//! association rows but never lists them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::TaskId;

/// What a collaborator may do with a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollabRole {
    /// Read-only access.
    Viewer,
    /// May edit the task.
    Editor,
}

impl std::fmt::Display for CollabRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Viewer => write!(f, "viewer"),
            Self::Editor => write!(f, "editor"),
        }
    }
}

/// One row of the backend's `task_collaborators` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCollaborator {
    /// Task the collaboration applies to.
    pub task_id: TaskId,
    /// Collaborating user.
    pub user_id: Uuid,
    /// Access level.
    pub role: CollabRole,
    /// When the association was created.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a collaborator association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCollaborator {
    /// Task the collaboration applies to.
    pub task_id: TaskId,
    /// Collaborating user.
    pub user_id: Uuid,
    /// Access level.
    pub role: CollabRole,
}
