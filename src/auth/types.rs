/*
 * Responsibility
 * - Identity record produced by a UserLoader
 * - Admission: what the gate hands downstream once a session is accepted
 *
 * Notes
 * - A missing user (None) is not a failure: the session was verified, there is
 *   just no identity attached to it
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Outcome of a session that passed verification.
///
/// Stored in request extensions by the HTTP middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Verified, but no user was resolved (or no loader is wired).
    Verified { session: String },
    /// Verified and resolved to a user.
    Authorized { session: String, user: User },
}

impl Admission {
    pub fn session(&self) -> &str {
        match self {
            Self::Verified { session } | Self::Authorized { session, .. } => session,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Verified { .. } => None,
            Self::Authorized { user, .. } => Some(user),
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized { .. })
    }
}
