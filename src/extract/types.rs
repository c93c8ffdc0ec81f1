/*
 * Responsibility
 * - The closed sets of extractor variants handed to the rest of the crate
 *   - FieldExtractor: any source, HTTP
 *   - MessageExtractor: header/body, message transport
 *   - SessionExtractor: cookie/header, where sessions are expected to live
 */
use super::context::{Envelope, HttpContext};
use super::core::{BodyExtractor, CookieExtractor, HeaderExtractor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldExtractor {
    Cookie(CookieExtractor),
    Header(HeaderExtractor),
    Body(BodyExtractor),
}

impl FieldExtractor {
    pub async fn read_http(&self, ctx: &mut HttpContext) -> String {
        match self {
            Self::Cookie(e) => e.read_http(ctx),
            Self::Header(e) => e.read_http(ctx),
            Self::Body(e) => e.read_http(ctx).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageExtractor {
    Header(HeaderExtractor),
    Body(BodyExtractor),
}

impl MessageExtractor {
    pub fn read_message(&self, envelope: &Envelope) -> String {
        match self {
            Self::Header(e) => e.read_message(envelope),
            Self::Body(e) => e.read_message(envelope),
        }
    }
}

/// Where a session token may be read from. Bodies are not a session source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionExtractor {
    Cookie(CookieExtractor),
    Header(HeaderExtractor),
}

impl SessionExtractor {
    pub fn read_http(&self, ctx: &HttpContext) -> String {
        match self {
            Self::Cookie(e) => e.read_http(ctx),
            Self::Header(e) => e.read_http(ctx),
        }
    }
}

impl From<CookieExtractor> for FieldExtractor {
    fn from(e: CookieExtractor) -> Self {
        Self::Cookie(e)
    }
}

impl From<HeaderExtractor> for FieldExtractor {
    fn from(e: HeaderExtractor) -> Self {
        Self::Header(e)
    }
}

impl From<BodyExtractor> for FieldExtractor {
    fn from(e: BodyExtractor) -> Self {
        Self::Body(e)
    }
}

impl From<HeaderExtractor> for MessageExtractor {
    fn from(e: HeaderExtractor) -> Self {
        Self::Header(e)
    }
}

impl From<BodyExtractor> for MessageExtractor {
    fn from(e: BodyExtractor) -> Self {
        Self::Body(e)
    }
}

impl From<CookieExtractor> for SessionExtractor {
    fn from(e: CookieExtractor) -> Self {
        Self::Cookie(e)
    }
}

impl From<HeaderExtractor> for SessionExtractor {
    fn from(e: HeaderExtractor) -> Self {
        Self::Header(e)
    }
}

impl From<SessionExtractor> for FieldExtractor {
    fn from(e: SessionExtractor) -> Self {
        match e {
            SessionExtractor::Cookie(e) => Self::Cookie(e),
            SessionExtractor::Header(e) => Self::Header(e),
        }
    }
}
