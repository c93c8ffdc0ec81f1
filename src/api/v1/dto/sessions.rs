/*
 * Responsibility
 * - Request/response DTOs for the session endpoints
 * - validate() checks shape only; the store decides everything else
 */
use serde::{Deserialize, Serialize};
use session_gate::User;

/// Login inputs as read from the body. An empty `user_id` opens a guest
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginRequest {
    pub user_id: String,
    pub role: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id.is_empty() && !self.role.is_empty() {
            return Err("user.role requires user.id");
        }
        if self.user_id.len() > 64 {
            return Err("user.id must be <= 64 chars");
        }
        if self.user_id.chars().any(char::is_whitespace) {
            return Err("user.id must not contain whitespace");
        }

        Ok(())
    }

    pub fn into_user(self) -> Option<User> {
        if self.user_id.is_empty() {
            return None;
        }
        let roles = (!self.role.is_empty()).then_some(self.role);
        Some(User::new(self.user_id, roles))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: Option<User>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStatusResponse {
    pub status: String,
    pub admin: String,
}
