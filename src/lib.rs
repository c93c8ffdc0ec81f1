//! Transport-agnostic session extraction and verification.
//!
//! - [`extract`]: cookie / header / body extractors over an HTTP request
//!   context or a message envelope
//! - [`auth`]: the session gate (extract → verify → load user) with injected
//!   [`SessionVerifier`] / [`UserLoader`] capabilities
//! - [`reply`]: [`Reply`] and [`ErrorDto`], the uniform outcome of handler code
//! - [`http`]: axum middleware and extractors wiring the gate into a router

pub mod auth;
pub mod error;
pub mod extract;
pub mod http;
pub mod reply;

pub use auth::{Admission, SessionGate, SessionVerifier, User, UserLoader};
pub use error::AppError;
pub use extract::{
    BodyExtractor, CookieExtractor, Envelope, FieldExtractor, HeaderExtractor, HttpContext,
    MessageExtractor, SessionExtractor,
};
pub use reply::{ErrorDto, Hook, Reply};
