/*!
 * Value extraction from requests
 *
 * Responsibility:
 * - Reading one named value (cookie / header / JSON body field) from either
 *   request shape: HttpContext (axum) or Envelope (message transport)
 * - Absence is not an error; every read degrades to ""
 *
 * Public API:
 * - CookieExtractor, HeaderExtractor, BodyExtractor
 * - FieldExtractor, MessageExtractor, SessionExtractor
 * - HttpContext, CachedBody, Envelope
 */

mod context;
mod core;
pub mod path;
mod types;

pub use context::{BODY_ATTRIBUTE, CachedBody, DEFAULT_BODY_LIMIT, Envelope, HttpContext};
pub use self::core::{BodyExtractor, CookieExtractor, HeaderExtractor};
pub use types::{FieldExtractor, MessageExtractor, SessionExtractor};
