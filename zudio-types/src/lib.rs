//! Data model for the Zudio task client.
//!
//! Every type here mirrors a row (or a write payload) of the hosted backend's
//! schema. The backend owns the data: ids, creation timestamps, and column
//! defaults are assigned server-side, and the client only ever holds copies.
//! Everything serializes to the backend's JSON wire shape (snake_case enum
//! strings, RFC 3339 timestamps).

pub mod collab;
pub mod comment;
pub mod task;
pub mod user;

pub use collab::{CollabRole, NewCollaborator, TaskCollaborator};
pub use comment::TaskComment;
pub use task::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
pub use user::{User, UserRole};
