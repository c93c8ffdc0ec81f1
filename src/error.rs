/*
 * Responsibility
 * - Application error enum for handler code that prefers `?`
 * - Every AppError becomes a Reply with an ErrorDto body, so failures keep the
 *   same wire shape as everything else (`{"message": "..."}`)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::reply::Reply;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<C> From<AppError> for Reply<C> {
    fn from(err: AppError) -> Self {
        Reply::error(err.status(), err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        Reply::<Response>::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn maps_to_status_and_error_dto() {
        let reply: Reply = AppError::not_found("session").into();
        assert_eq!(reply.code, StatusCode::NOT_FOUND);
        assert_eq!(reply.body, json!({ "message": "session not found" }));

        let reply: Reply = AppError::bad_request("user is required").into();
        assert_eq!(reply.code, StatusCode::BAD_REQUEST);
        assert_eq!(reply.error_message(), Some("user is required"));

        let reply: Reply = AppError::Internal.into();
        assert_eq!(reply.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn renders_like_any_other_reply() {
        let response = AppError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
