//! Comment rows.
//!
//! Comments live in the backend's `task_comments` table. The client declares
//! the row type for schema parity; no client operation reads or writes
//! comments yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::TaskId;

/// One row of the backend's `task_comments` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    /// Unique identifier, assigned by the backend.
    pub id: Uuid,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Commenting user.
    pub user_id: Uuid,
    /// Comment body.
    pub content: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}
