//! Session state for the current user.
//!
//! Tracks whether a user is signed in and exposes the profile to the rest of
//! the client. The store is an explicit context object constructed once at
//! startup and threaded through, not an ambient singleton; the backend owns
//! the actual session, this is the client-side view of it.

use std::sync::Arc;

use zudio_types::User;

use crate::backend::{Backend, BackendError};

/// Client-side view of the backend session.
///
/// Transitions: `Loading` -> `Authenticated` (session found), `Loading` ->
/// `Unauthenticated` (no session), `Authenticated` -> `Unauthenticated`
/// (sign-out). There is no way back to `Loading` without a fresh
/// [`SessionStore::initialize`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Initialization has not resolved yet.
    Loading,
    /// No session exists.
    Unauthenticated,
    /// A user is signed in.
    Authenticated(User),
}

/// Holds the authenticated user and mediates sign-out.
pub struct SessionStore<B> {
    backend: Arc<B>,
    state: SessionState,
}

impl<B: Backend> SessionStore<B> {
    /// Creates a store in the `Loading` state.
    pub const fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: SessionState::Loading,
        }
    }

    /// Asks the backend for the current session and resolves the loading
    /// state. Safe to call once at application start.
    ///
    /// The loading state is released on every exit path: a backend failure
    /// resolves to `Unauthenticated` and the error is returned to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`] from the session lookup.
    pub async fn initialize(&mut self) -> Result<(), BackendError> {
        match self.backend.current_user().await {
            Ok(Some(user)) => {
                tracing::info!(user = %user.display_name(), "session resolved");
                self.state = SessionState::Authenticated(user);
                Ok(())
            }
            Ok(None) => {
                tracing::info!("no active session");
                self.state = SessionState::Unauthenticated;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Terminates the backend session, then clears the local user.
    ///
    /// # Errors
    ///
    /// Propagates any [`BackendError`]; on failure the local user is kept,
    /// since the backend session may still be alive.
    pub async fn sign_out(&mut self) -> Result<(), BackendError> {
        self.backend.sign_out().await?;
        tracing::info!("signed out");
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    /// Current session state.
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in user, if any.
    pub const fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Loading | SessionState::Unauthenticated => None,
        }
    }
}
