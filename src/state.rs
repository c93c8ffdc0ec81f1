/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to clone (everything behind Arc)
 */
use std::sync::Arc;

use session_gate::{BodyExtractor, SessionGate};

use crate::services::sessions::MemorySessions;

#[derive(Clone, Debug)]
pub struct AppState {
    pub sessions: Arc<MemorySessions>,
    pub gate: Arc<SessionGate>,
    pub login: LoginFields,
    pub cookie_name: String,
    /// Cap for handler-side body reads, same as the transport limit.
    pub body_limit: usize,
}

/// Where POST /login finds its inputs in the JSON body.
#[derive(Clone, Debug)]
pub struct LoginFields {
    pub user_id: BodyExtractor,
    pub role: BodyExtractor,
}

impl Default for LoginFields {
    fn default() -> Self {
        Self {
            user_id: BodyExtractor::new("user.id"),
            role: BodyExtractor::new("user.role"),
        }
    }
}

impl AppState {
    pub fn new(
        sessions: Arc<MemorySessions>,
        gate: Arc<SessionGate>,
        cookie_name: impl Into<String>,
        body_limit: usize,
    ) -> Self {
        Self {
            sessions,
            gate,
            login: LoginFields::default(),
            cookie_name: cookie_name.into(),
            body_limit,
        }
    }
}
