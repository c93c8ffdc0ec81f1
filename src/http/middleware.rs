//! Session gate as an axum middleware.
//!
//! Builds an `HttpContext` from the request, runs the gate, and either
//! renders the 401 reply or stores the `Admission` (and the `User`, if any)
//! in request extensions before calling the next service.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::auth::SessionGate;
use crate::extract::HttpContext;

/// Puts every route of `router` behind `gate`.
///
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = session_gate::http::apply(protected, gate.clone());
/// app = app.nest("/api/v1", public.merge(protected));
/// ```
pub fn apply<S>(router: Router<S>, gate: Arc<SessionGate>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(gate, require_session))
}

pub async fn require_session(
    State(gate): State<Arc<SessionGate>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut ctx = HttpContext::new(req);

    let admission = match gate.admit_http(&ctx).await {
        Ok(admission) => admission,
        Err(reply) => return reply.into_response(),
    };

    // middleware → extractor handoff
    if let Some(user) = admission.user() {
        ctx.extensions_mut().insert(user.clone());
    }
    ctx.extensions_mut().insert(admission);

    next.run(ctx.into_request()).await
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Extension,
        http::{StatusCode, header},
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::{Admission, SessionVerifier, User, UserLoader};
    use crate::extract::{BodyExtractor, CachedBody, CookieExtractor, HeaderExtractor};
    use crate::reply::Reply;

    struct Fixed;

    #[async_trait]
    impl SessionVerifier for Fixed {
        async fn verify_session(&self, _method: &str, path: &str, session: &str) -> bool {
            session == "abc123" || (session == "guest" && path != "/admin")
        }
    }

    #[async_trait]
    impl UserLoader for Fixed {
        async fn load_user(&self, _method: &str, _path: &str, session: &str) -> Option<User> {
            (session == "abc123").then(|| User::new("u1", ["admin"]))
        }
    }

    fn router() -> Router {
        let gate = SessionGate::new()
            .with_source(CookieExtractor::new("session"))
            .with_source(HeaderExtractor::new("authorization").with_prefix("Token "))
            .with_verifier(Fixed)
            .with_loader(Fixed);

        let protected = Router::new()
            .route(
                "/whoami",
                get(|Extension(admission): Extension<Admission>| async move {
                    Reply::ok(json!({
                        "session": admission.session(),
                        "user": admission.user(),
                    }))
                }),
            )
            .route("/admin", get(|| async { Reply::ok("admin area") }))
            .route(
                "/echo",
                post(|mut ctx: HttpContext| async move {
                    let note = BodyExtractor::new("note").read_http(&mut ctx).await;
                    let cached = ctx.cached_body().is_some();
                    Reply::ok(json!({ "note": note, "cached": cached }))
                }),
            );

        apply(protected, Arc::new(gate))
    }

    async fn call(req: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(req).await.unwrap();
        let status = response.status();
        let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&raw).unwrap())
    }

    fn get_req(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_session_is_401_with_error_dto() {
        let (status, body) = call(get_req("/whoami", &[])).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "missing session" }));
    }

    #[tokio::test]
    async fn rejected_session_is_401() {
        let (status, body) = call(get_req("/admin", &[("cookie", "session=guest")])).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "invalid session" }));
    }

    #[tokio::test]
    async fn admitted_request_sees_admission_and_user() {
        let (status, body) =
            call(get_req("/whoami", &[("authorization", "Token abc123")])).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "session": "abc123", "user": { "id": "u1", "roles": ["admin"] } })
        );
    }

    #[tokio::test]
    async fn verified_session_without_user_reaches_handler() {
        let (status, body) = call(get_req("/whoami", &[("cookie", "session=guest")])).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "session": "guest", "user": null }));
    }

    #[tokio::test]
    async fn body_is_untouched_by_the_gate() {
        let req = Request::builder()
            .method("POST")
            .uri("/echo")
            .header(header::COOKIE, "session=abc123")
            .body(Body::from(r#"{"note":"hi"}"#))
            .unwrap();

        let (status, body) = call(req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "note": "hi", "cached": true }));
    }

    #[tokio::test]
    async fn cached_body_survives_into_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from(r#"{"note":"again"}"#))
            .unwrap();
        let mut ctx = HttpContext::new(req);
        BodyExtractor::new("note").read_http(&mut ctx).await;

        let req = ctx.into_request();
        assert!(req.extensions().get::<CachedBody>().is_some());
        let again = HttpContext::new(req);
        assert_eq!(
            again.cached_body().map(|b| &b[..]),
            Some(&br#"{"note":"again"}"#[..])
        );
    }
}
