/*!
 * Session authentication pipeline
 *
 * Responsibility:
 * - Capabilities injected by the application (SessionVerifier, UserLoader)
 * - SessionGate: extraction → verification → user loading, with uniform 401 replies
 *
 * Public API:
 * - User, Admission
 * - SessionVerifier, UserLoader
 * - SessionGate
 */

mod capability;
mod gate;
mod types;

pub use capability::{SessionVerifier, UserLoader};
pub use gate::{INVALID_SESSION, MISSING_SESSION, SessionGate};
pub use types::{Admission, User};
