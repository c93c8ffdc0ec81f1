/*
 * Responsibility
 * - Reply: the one return type of handler-level code, success and failure alike
 *   (status code + JSON body + optional post-response hook)
 * - ErrorDto: the only error payload shape, `{"message": "..."}`
 * - Rendering a Reply as an axum Response; other transports take it apart
 *   with `into_parts()` and run the hook themselves
 */
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Post-response callback. Receives only the transport's own context
/// (for HTTP, the rendered response), never the reply body.
pub type Hook<C> = Box<dyn FnOnce(&mut C) + Send + 'static>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub message: String,
}

impl ErrorDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ErrorDto> for Value {
    fn from(dto: ErrorDto) -> Self {
        json!({ "message": dto.message })
    }
}

/// Uniform outcome of a handler.
///
/// `code` uses HTTP status semantics on every transport. Errors are replies
/// whose body is an [`ErrorDto`]; there is no separate error channel.
///
/// `C` is the context the hook runs against. It defaults to the axum
/// [`Response`], which is what the HTTP adapter hands to the hook.
pub struct Reply<C = Response> {
    pub code: StatusCode,
    pub body: Value,
    pub hook: Option<Hook<C>>,
}

impl<C> Reply<C> {
    /// Builds a reply from any serializable body. A body that cannot be
    /// encoded becomes a 500 error reply.
    pub fn new<T: Serialize>(code: StatusCode, body: T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self {
                code,
                body,
                hook: None,
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to encode reply body");
                Self::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to encode response body",
                )
            }
        }
    }

    pub fn ok<T: Serialize>(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Reply with a `null` body.
    pub fn empty(code: StatusCode) -> Self {
        Self {
            code,
            body: Value::Null,
            hook: None,
        }
    }

    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            body: ErrorDto::new(message).into(),
            hook: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// 2xx codes; message adapters map this to ack vs. reject.
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// The `message` of an [`ErrorDto`] body, if the body has that shape.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    pub fn into_parts(self) -> (StatusCode, Value, Option<Hook<C>>) {
        (self.code, self.body, self.hook)
    }

    /// Runs the hook, if any, against the adapter-owned context.
    pub fn run_hook(hook: Option<Hook<C>>, ctx: &mut C) {
        if let Some(hook) = hook {
            hook(ctx);
        }
    }
}

impl<C> fmt::Debug for Reply<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reply")
            .field("code", &self.code)
            .field("body", &self.body)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Writes status + JSON body, then runs the hook on the finished response.
impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let (code, body, hook) = self.into_parts();
        let mut response = (code, Json(body)).into_response();
        Self::run_hook(hook, &mut response);
        response
    }
}
