//! API response envelope and error mapping.
//!
//! # Responsibilities
//! - Uniform `{ code, message, data }` envelope for every controller reply
//! - Map service errors to HTTP status codes
//!
//! # Design Decisions
//! - Invalid input → 400, missing record → 404, duplicate → 409
//! - The dispatcher itself never produces an error; declines fall through
//!   to the host 404, outside this envelope

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Successful reply envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    pub data: Value,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: "ok".to_string(),
            data,
        }
    }

    pub fn created(data: Value) -> Self {
        Self {
            code: StatusCode::CREATED.as_u16(),
            message: "created".to_string(),
            data,
        }
    }

    pub fn empty() -> Self {
        Self::ok(Value::Null)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Errors surfaced by controllers and services.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Invalid(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("request body is not valid JSON")]
    BadBody,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) | ApiError::BadBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse {
            code: status.as_u16(),
            message: self.to_string(),
            data: Value::Null,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        assert_eq!(
            ApiError::Invalid("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("group").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::BadBody.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(ApiError::NotFound("group").to_string(), "group not found");
    }
}
