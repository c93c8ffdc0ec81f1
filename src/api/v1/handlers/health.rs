/*
 * Responsibility
 * - GET /health (liveness, outside the session gate)
 */
use serde_json::json;
use session_gate::Reply;

pub async fn health() -> Reply {
    Reply::ok(json!({ "status": "ok" }))
}
