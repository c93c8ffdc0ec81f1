//! In-memory session store.
//!
//! Backs the demo application: `open` issues a token, `revoke` drops it, and
//! the store itself is both the `SessionVerifier` and the `UserLoader` the
//! gate is wired with.
//!
//! Notes:
//! - Tokens live until revoked or the process exits.
//! - Paths with an `admin` segment additionally require the `admin` role.

use std::collections::HashMap;

use async_trait::async_trait;
use session_gate::{SessionVerifier, User, UserLoader};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Default)]
pub struct MemorySessions {
    // token -> user (None for guest sessions)
    sessions: RwLock<HashMap<String, Option<User>>>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session and returns its token.
    pub async fn open(&self, user: Option<User>) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.write().await.insert(token.clone(), user);
        token
    }

    /// Returns whether the token existed.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

fn is_admin_path(path: &str) -> bool {
    path.split('/').any(|segment| segment == ADMIN_ROLE)
}

#[async_trait]
impl SessionVerifier for MemorySessions {
    async fn verify_session(&self, method: &str, path: &str, session: &str) -> bool {
        let sessions = self.sessions.read().await;
        let Some(user) = sessions.get(session) else {
            tracing::debug!(method, path, "unknown session");
            return false;
        };

        if !is_admin_path(path) {
            return true;
        }
        let allowed = user.as_ref().is_some_and(|u| u.has_role(ADMIN_ROLE));
        if !allowed {
            tracing::debug!(method, path, "session lacks admin role");
        }
        allowed
    }
}

#[async_trait]
impl UserLoader for MemorySessions {
    async fn load_user(&self, _method: &str, _path: &str, session: &str) -> Option<User> {
        self.sessions.read().await.get(session).cloned().flatten()
    }
}
