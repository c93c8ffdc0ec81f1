//! Injected capabilities the gate delegates authentication policy to.
//!
//! Implementations are shared across concurrent requests (`Arc<dyn ...>`), so
//! they must be `Send + Sync` and keep no per-request state.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::User;

/// Decides whether `session` may access `method` + `path`.
///
/// Only ever called with a non-empty session.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify_session(&self, method: &str, path: &str, session: &str) -> bool;
}

/// Resolves a verified session into a user. `None` means "no identity", not
/// an error.
#[async_trait]
pub trait UserLoader: Send + Sync {
    async fn load_user(&self, method: &str, path: &str, session: &str) -> Option<User>;
}

#[async_trait]
impl<T: SessionVerifier + ?Sized> SessionVerifier for Arc<T> {
    async fn verify_session(&self, method: &str, path: &str, session: &str) -> bool {
        (**self).verify_session(method, path, session).await
    }
}

#[async_trait]
impl<T: UserLoader + ?Sized> UserLoader for Arc<T> {
    async fn load_user(&self, method: &str, path: &str, session: &str) -> Option<User> {
        (**self).load_user(method, path, session).await
    }
}
