//! User profile rows.
//!
//! The backend owns user rows entirely; the client only holds a read-only
//! copy of the current session's profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user within the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Can manage other members' tasks.
    Manager,
    /// Regular member.
    Member,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// One row of the backend's user profile table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the backend.
    pub id: Uuid,
    /// Sign-in email address.
    pub email: String,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Optional avatar image reference.
    pub avatar_url: Option<String>,
    /// Workspace role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name to show in the header: display name if set, else the email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}
