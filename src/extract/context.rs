/*
 * Responsibility
 * - The two request shapes extractors read from
 *   - HttpContext: axum request head + a body that can be consumed once
 *   - Envelope: message transport (header map + raw bytes)
 * - Caching the consumed HTTP body so later stages never touch the stream again
 */
use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    body::Body,
    extract::FromRequest,
    http::{Extensions, HeaderMap, Method, Request, Uri, header, request::Parts},
};
use bytes::Bytes;
use cookie::Cookie;
use percent_encoding::percent_decode_str;

/// Name of the request attribute that holds the consumed body.
///
/// The attribute itself is stored as the typed [`CachedBody`] extension.
pub const BODY_ATTRIBUTE: &str = "body";

/// Upper bound used when the context was built without an explicit limit.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Raw request body, exactly as it was consumed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBody(pub Bytes);

/// HTTP request context.
///
/// Owns the request head and the not yet consumed body. The body can be
/// consumed once; the bytes are then kept in the request extensions and every
/// later read is served from there.
#[derive(Debug)]
pub struct HttpContext {
    parts: Parts,
    body: Option<Body>,
    body_limit: usize,
}

impl HttpContext {
    pub fn new(req: Request<Body>) -> Self {
        Self::with_body_limit(req, DEFAULT_BODY_LIMIT)
    }

    pub fn with_body_limit(req: Request<Body>, body_limit: usize) -> Self {
        let (parts, body) = req.into_parts();
        Self {
            parts,
            body: Some(body),
            body_limit,
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.parts.extensions
    }

    /// First value of the header `name` (case-insensitive). Non UTF-8 values
    /// and invalid header names read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Value of the cookie `name`.
    ///
    /// Surrounding double quotes are dropped, then the value is unescaped as a
    /// query component (`%XX` sequences, `+` as space). A value with a
    /// malformed escape reads as absent.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|c| c.name() == name)
            .and_then(|c| query_unescape(c.value_trimmed()))
    }

    pub fn cached_body(&self) -> Option<&Bytes> {
        self.parts
            .extensions
            .get::<CachedBody>()
            .map(|CachedBody(raw)| raw)
    }

    /// True once the underlying body stream has been taken.
    pub fn body_consumed(&self) -> bool {
        self.body.is_none()
    }

    /// Reads the whole body.
    ///
    /// The first call drains the stream and caches the bytes under
    /// [`BODY_ATTRIBUTE`]. Later calls return the cached copy. If the first read
    /// failed the stream is gone and later calls see an empty body.
    pub async fn read_body(&mut self) -> Result<Bytes, axum::Error> {
        if let Some(raw) = self.cached_body() {
            return Ok(raw.clone());
        }

        let Some(body) = self.body.take() else {
            return Ok(Bytes::new());
        };

        let raw = axum::body::to_bytes(body, self.body_limit).await?;
        self.parts.extensions.insert(CachedBody(raw.clone()));
        Ok(raw)
    }

    /// Rebuilds a request for downstream services.
    ///
    /// A consumed body is replayed from the cache; an untouched body is passed
    /// through as is.
    pub fn into_request(self) -> Request<Body> {
        let body = match (self.parts.extensions.get::<CachedBody>(), self.body) {
            (Some(CachedBody(raw)), _) => Body::from(raw.clone()),
            (None, Some(body)) => body,
            (None, None) => Body::empty(),
        };
        Request::from_parts(self.parts, body)
    }
}

impl From<Request<Body>> for HttpContext {
    fn from(req: Request<Body>) -> Self {
        Self::new(req)
    }
}

impl<S> FromRequest<S> for HttpContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(req))
    }
}

fn query_unescape(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }

    let spaced = raw.replace('+', " ");
    Some(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

/// Message transport request: header map plus raw body bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl Envelope {
    pub fn new(headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self {
            headers,
            body: body.into(),
        }
    }

    /// Header lookup by exact key; message headers carry no case rules.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
