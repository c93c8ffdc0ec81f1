/*
 * Responsibility
 * - URL layout for v1
 * - Which routes sit behind the session gate (protected) and which do not
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    health::health,
    sessions::{admin_status, login, logout, me},
};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route("/admin/status", get(admin_status));
    let protected = session_gate::http::apply(protected, state.gate);

    public.merge(protected)
}
