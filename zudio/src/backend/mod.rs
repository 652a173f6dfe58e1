//! Backend abstraction for the hosted task service.
//!
//! Defines the [`Backend`] trait that the stores talk to. Concrete
//! implementations:
//! - [`http::HttpBackend`] - REST client for the hosted service
//! - [`memory::MemoryBackend`] - in-process double for tests and offline mode
//!
//! The backend owns all persistence, authentication, and querying. The
//! client never enforces invariants beyond type shape: ids, timestamps,
//! column defaults, ordering, and row-level security all live server-side.

pub mod http;
pub mod memory;

pub use http::{HttpBackend, HttpConfig};
pub use memory::MemoryBackend;

use zudio_types::{NewCollaborator, NewTask, Task, TaskId, TaskPatch, User};

/// Errors that can occur when talking to the backend.
///
/// This is the single failure taxonomy of the client: every store operation
/// that hits the backend fails with one of these, with no retry and no
/// categorization by cause beyond what the variant carries.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a usable response (connect, timeout, TLS).
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The response arrived but its body did not match the expected shape.
    #[error("could not decode backend response: {0}")]
    Decode(String),

    /// The configured backend URL could not be parsed or joined.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Async contract with the hosted task service.
///
/// One method per remote operation the client performs. Every call is a
/// single request with no de-duplication, debouncing, or cancellation;
/// overlapping calls resolve in whatever order the backend responds.
pub trait Backend: Send + Sync {
    /// Asks the backend for the current session's user profile.
    ///
    /// Returns `Ok(None)` when no session exists (not an error).
    fn current_user(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<User>, BackendError>> + Send;

    /// Terminates the current session.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Lists all tasks visible to the current user, ordered by creation
    /// time descending.
    fn list_tasks(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, BackendError>> + Send;

    /// Inserts a partial task row and returns the canonical row with
    /// backend-assigned id, timestamp, and column defaults.
    fn insert_task(
        &self,
        new: &NewTask,
    ) -> impl std::future::Future<Output = Result<Task, BackendError>> + Send;

    /// Patches the row matching `id`. Fields absent from the patch are left
    /// untouched. A filter that matches no row is not an error.
    fn update_task(
        &self,
        id: TaskId,
        patch: &TaskPatch,
    ) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Inserts a collaborator association row. The client keeps no local
    /// mirror of collaborators.
    fn insert_collaborator(
        &self,
        new: &NewCollaborator,
    ) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;
}
