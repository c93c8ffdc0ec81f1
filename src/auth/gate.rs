/*
 * Responsibility
 * - Session pipeline: extract → verify → load user
 * - Uniform rejection (401 + ErrorDto) for empty or rejected sessions
 *
 * Rules
 * - Empty session: reject without calling the verifier
 * - No verifier wired: fail closed (reject everything)
 * - Loader only runs after successful verification; None is not a rejection
 */
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::extract::{Envelope, HeaderExtractor, HttpContext, SessionExtractor};
use crate::reply::Reply;

use super::capability::{SessionVerifier, UserLoader};
use super::types::Admission;

pub const MISSING_SESSION: &str = "missing session";
pub const INVALID_SESSION: &str = "invalid session";

/// Shared, immutable session pipeline. Build once, wrap in `Arc`, reuse for
/// every request.
#[derive(Clone, Default)]
pub struct SessionGate {
    sources: Vec<SessionExtractor>,
    message_source: Option<HeaderExtractor>,
    verifier: Option<Arc<dyn SessionVerifier>>,
    loader: Option<Arc<dyn UserLoader>>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an HTTP session source. Sources are tried in insertion order and
    /// the first non-empty value wins.
    pub fn with_source(mut self, source: impl Into<SessionExtractor>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Session source for the message transport (headers only).
    pub fn with_message_source(mut self, source: HeaderExtractor) -> Self {
        self.message_source = Some(source);
        self
    }

    pub fn with_verifier(mut self, verifier: impl SessionVerifier + 'static) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    pub fn with_loader(mut self, loader: impl UserLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn session_from_http(&self, ctx: &HttpContext) -> String {
        self.sources
            .iter()
            .map(|source| source.read_http(ctx))
            .find(|session| !session.is_empty())
            .unwrap_or_default()
    }

    pub fn session_from_message(&self, envelope: &Envelope) -> String {
        self.message_source
            .as_ref()
            .map(|source| source.read_message(envelope))
            .unwrap_or_default()
    }

    /// Runs verification and user loading for an already extracted session.
    pub async fn admit<C>(
        &self,
        method: &str,
        path: &str,
        session: &str,
    ) -> Result<Admission, Reply<C>> {
        if session.is_empty() {
            tracing::debug!(method, path, "no session on request");
            return Err(Reply::unauthorized(MISSING_SESSION));
        }

        let Some(verifier) = &self.verifier else {
            tracing::warn!(method, path, "no session verifier wired, rejecting");
            return Err(Reply::unauthorized(INVALID_SESSION));
        };

        if !verifier.verify_session(method, path, session).await {
            tracing::warn!(method, path, "session verification failed");
            return Err(Reply::unauthorized(INVALID_SESSION));
        }

        let user = match &self.loader {
            Some(loader) => loader.load_user(method, path, session).await,
            None => None,
        };

        let session = session.to_string();
        let admission = match user {
            Some(user) => Admission::Authorized { session, user },
            None => Admission::Verified { session },
        };
        tracing::debug!(
            method,
            path,
            user_id = admission.user().map(|u| u.id.as_str()),
            "session admitted"
        );

        Ok(admission)
    }

    /// Reads everything it needs from `ctx` up front; the returned future does
    /// not hold the context, which is `!Sync` because of its body.
    pub fn admit_http(
        &self,
        ctx: &HttpContext,
    ) -> impl Future<Output = Result<Admission, Reply>> + Send + '_ {
        let session = self.session_from_http(ctx);
        let method = ctx.method().as_str().to_string();
        let path = ctx.path().to_string();
        async move { self.admit(&method, &path, &session).await }
    }

    /// `method` and `path` are whatever the message transport uses to name the
    /// operation (e.g. a verb and a subject).
    pub async fn admit_message<C>(
        &self,
        method: &str,
        path: &str,
        envelope: &Envelope,
    ) -> Result<Admission, Reply<C>> {
        let session = self.session_from_message(envelope);
        self.admit(method, path, &session).await
    }
}

impl fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("sources", &self.sources)
            .field("message_source", &self.message_source)
            .field("verifier", &self.verifier.is_some())
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };

    use super::*;
    use crate::auth::User;
    use crate::extract::CookieExtractor;

    #[derive(Default)]
    struct Recorder {
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String, String)>>,
    }

    struct AllowList {
        allowed: &'static [&'static str],
        recorder: Arc<Recorder>,
    }

    #[async_trait]
    impl SessionVerifier for AllowList {
        async fn verify_session(&self, method: &str, path: &str, session: &str) -> bool {
            self.recorder.calls.fetch_add(1, Ordering::SeqCst);
            self.recorder
                .seen
                .lock()
                .unwrap()
                .push((method.into(), path.into(), session.into()));
            self.allowed.contains(&session)
        }
    }

    struct Users {
        users: HashMap<&'static str, User>,
        recorder: Arc<Recorder>,
    }

    #[async_trait]
    impl UserLoader for Users {
        async fn load_user(&self, _method: &str, _path: &str, session: &str) -> Option<User> {
            self.recorder.calls.fetch_add(1, Ordering::SeqCst);
            self.users.get(session).cloned()
        }
    }

    struct Fixture {
        gate: SessionGate,
        verifier: Arc<Recorder>,
        loader: Arc<Recorder>,
    }

    fn fixture() -> Fixture {
        let verifier = Arc::new(Recorder::default());
        let loader = Arc::new(Recorder::default());
        let gate = SessionGate::new()
            .with_source(CookieExtractor::new("session"))
            .with_source(HeaderExtractor::new("Authorization").with_prefix("Token "))
            .with_message_source(HeaderExtractor::new("session"))
            .with_verifier(AllowList {
                allowed: &["abc123", "guest"],
                recorder: verifier.clone(),
            })
            .with_loader(Users {
                users: HashMap::from([("abc123", User::new("u1", ["admin"]))]),
                recorder: loader.clone(),
            });
        Fixture {
            gate,
            verifier,
            loader,
        }
    }

    fn http(headers: &[(&str, &str)]) -> HttpContext {
        let mut builder = Request::builder().method("GET").uri("/reports/1");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        HttpContext::new(builder.body(Body::empty()).unwrap())
    }

    #[tokio::test]
    async fn header_session_is_verified_and_loaded() {
        let f = fixture();
        let ctx = http(&[("Authorization", "Token abc123")]);

        let admission = f.gate.admit_http(&ctx).await.unwrap();

        assert_eq!(
            admission,
            Admission::Authorized {
                session: "abc123".into(),
                user: User::new("u1", ["admin"]),
            }
        );
        assert_eq!(
            f.verifier.seen.lock().unwrap().as_slice(),
            &[("GET".to_string(), "/reports/1".to_string(), "abc123".to_string())]
        );
        assert_eq!(f.loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cookie_source_wins_over_header() {
        let f = fixture();
        let ctx = http(&[("Cookie", "session=guest"), ("Authorization", "Token abc123")]);

        assert_eq!(f.gate.session_from_http(&ctx), "guest");
    }

    #[tokio::test]
    async fn empty_session_skips_capabilities() {
        let f = fixture();
        let ctx = http(&[]);

        let reply = f.gate.admit_http(&ctx).await.unwrap_err();

        assert_eq!(reply.code, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.error_message(), Some(MISSING_SESSION));
        assert_eq!(f.verifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_session_skips_loader() {
        let f = fixture();
        let ctx = http(&[("Cookie", "session=forged")]);

        let reply = f.gate.admit_http(&ctx).await.unwrap_err();

        assert_eq!(reply.code, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.error_message(), Some(INVALID_SESSION));
        assert_eq!(f.verifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn verified_session_without_user_is_admitted() {
        let f = fixture();
        let ctx = http(&[("Cookie", "session=guest")]);

        let admission = f.gate.admit_http(&ctx).await.unwrap();

        assert_eq!(
            admission,
            Admission::Verified {
                session: "guest".into()
            }
        );
        assert!(admission.user().is_none());
        assert_eq!(f.loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gate_without_verifier_fails_closed() {
        let gate = SessionGate::new().with_source(CookieExtractor::new("session"));
        let ctx = http(&[("Cookie", "session=abc123")]);

        let reply = gate.admit_http(&ctx).await.unwrap_err();

        assert_eq!(reply.code, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn gate_without_loader_admits_verified() {
        let verifier = Arc::new(Recorder::default());
        let gate = SessionGate::new()
            .with_source(CookieExtractor::new("session"))
            .with_verifier(AllowList {
                allowed: &["abc123"],
                recorder: verifier,
            });
        let ctx = http(&[("Cookie", "session=abc123")]);

        let admission = gate.admit_http(&ctx).await.unwrap();

        assert!(!admission.is_authorized());
        assert_eq!(admission.session(), "abc123");
    }

    #[tokio::test]
    async fn message_session_comes_from_envelope_header() {
        let f = fixture();
        let env = Envelope::new(
            HashMap::from([("session".to_string(), "abc123".to_string())]),
            "{}",
        );

        let admission = f
            .gate
            .admit_message::<()>("PUBLISH", "reports.created", &env)
            .await
            .unwrap();

        assert!(admission.is_authorized());
        assert_eq!(
            f.verifier.seen.lock().unwrap()[0],
            (
                "PUBLISH".to_string(),
                "reports.created".to_string(),
                "abc123".to_string()
            )
        );
    }

    #[tokio::test]
    async fn message_without_source_is_unauthenticated() {
        let gate = SessionGate::new();
        let env = Envelope::new(
            HashMap::from([("session".to_string(), "abc123".to_string())]),
            "",
        );

        let reply = gate
            .admit_message::<()>("PUBLISH", "reports.created", &env)
            .await
            .unwrap_err();

        assert_eq!(reply.error_message(), Some(MISSING_SESSION));
    }
}
