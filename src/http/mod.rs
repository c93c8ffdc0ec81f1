/*!
 * axum adapter for the session gate
 *
 * Responsibility:
 * - Middleware that admits or rejects requests (middleware)
 * - Handler-side access to the admitted session and user (extractors)
 *
 * Public API:
 * - apply, require_session
 * - CurrentUser, SessionToken
 */

mod extractors;
mod middleware;

pub use extractors::{CurrentUser, SessionToken};
pub use middleware::{apply, require_session};
