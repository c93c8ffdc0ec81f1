use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{Admission, MISSING_SESSION, User};
use crate::reply::Reply;

/// The user attached by the session middleware, if one was resolved.
///
/// Rejects with 401 when the request never went through the middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

/// The session token accepted by the session middleware.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

fn admission(parts: &Parts) -> Result<&Admission, Reply> {
    parts.extensions.get::<Admission>().ok_or_else(|| {
        tracing::error!(
            path = parts.uri.path(),
            "handler expects an admitted session but the session middleware is not applied"
        );
        Reply::unauthorized(MISSING_SESSION)
    })
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Reply;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        admission(parts).map(|a| CurrentUser(a.user().cloned()))
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Reply;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        admission(parts).map(|a| SessionToken(a.session().to_string()))
    }
}
