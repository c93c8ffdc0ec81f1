/*
 * Responsibility
 * - Cookie / header / body extractors and how each one reads its value
 * - HTTP read path (HttpContext) and message read path (Envelope)
 *
 * Rules
 * - Extraction never fails: anything absent or unreadable reads as ""
 * - Cookies only exist on HTTP, so CookieExtractor has no message read path
 */
use super::context::{Envelope, HttpContext};
use super::path;

/// Reads a cookie by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieExtractor {
    pub field: String,
}

/// Reads a header by name, optionally removing a prefix such as `"Bearer "`.
///
/// The prefix is removed wherever it occurs in the value, not only at the
/// start: `"Bearer Bearer abc"` with prefix `"Bearer "` reads as `"abc"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderExtractor {
    pub header: String,
    pub prefix: String,
}

/// Reads a field from a JSON body through a dot path (see [`path`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyExtractor {
    pub field: String,
}

impl CookieExtractor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn read_http(&self, ctx: &HttpContext) -> String {
        ctx.cookie(&self.field).unwrap_or_default()
    }
}

impl HeaderExtractor {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn read_http(&self, ctx: &HttpContext) -> String {
        self.strip(ctx.header(&self.header).unwrap_or_default())
    }

    pub fn read_message(&self, envelope: &Envelope) -> String {
        self.strip(envelope.header(&self.header).unwrap_or_default())
    }

    fn strip(&self, value: &str) -> String {
        if self.prefix.is_empty() {
            value.to_string()
        } else {
            value.replace(&self.prefix, "")
        }
    }
}

impl BodyExtractor {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Consumes the body on first use (caching it on the context) and queries
    /// the cached bytes on every later use.
    pub async fn read_http(&self, ctx: &mut HttpContext) -> String {
        match ctx.read_body().await {
            Ok(raw) => path::query(&raw, &self.field),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    method = %ctx.method(),
                    path = ctx.path(),
                    field = %self.field,
                    "failed to read request body"
                );
                String::new()
            }
        }
    }

    pub fn read_message(&self, envelope: &Envelope) -> String {
        path::query(&envelope.body, &self.field)
    }
}
