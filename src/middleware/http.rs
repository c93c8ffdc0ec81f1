//! HTTP-level middleware (cross-cutting concerns).
//!
//! Applies to every route, in front of the session gate.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits (from `Config`)
//! - Global timeouts

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply HTTP-level middleware to the given Router.
///
/// - Request-Id header: `x-request-id`
/// - Body limit: `body_limit_bytes` (`BODY_LIMIT_BYTES`, 1 MiB by default)
/// - Timeout: 30 seconds
pub fn apply(router: Router, body_limit_bytes: usize) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // Turn layer errors (timeouts) into plain status responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        // Generate a request id if missing, then echo it on the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        // Declared lengths over the limit get 413 before routing; undeclared
        // bodies are capped while streaming.
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        // Bound total request time.
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        // Access log for every request.
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}
