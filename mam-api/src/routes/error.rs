use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::HoursError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidUserId,
    InvalidDateRange,
    ValidationFailed,
    InvalidStatusTransition,
    EntryApproved,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<HoursError> for ApiError {
    fn from(err: HoursError) -> Self {
        match err {
            HoursError::InvalidUserId => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::InvalidUserId)
            }
            HoursError::InvalidDateRange => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::InvalidDateRange)
            }
            HoursError::Validation(_) => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::ValidationFailed)
            }
            HoursError::TimeEntryNotFound(_) | HoursError::ProjectNotFound(_) => {
                Self::not_found(err.to_string())
            }
            HoursError::InvalidStatusTransition { .. } => {
                Self::conflict(err.to_string()).with_code(ErrorCode::InvalidStatusTransition)
            }
            HoursError::EntryApproved(_) => {
                Self::conflict(err.to_string()).with_code(ErrorCode::EntryApproved)
            }
            // Already logged where the storage call failed.
            HoursError::Storage(_) => Self::internal("storage unavailable"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
