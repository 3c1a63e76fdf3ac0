//! API error type and its JSON error body

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::ErrorBody;
use crate::validation::ValidationError;

/// One or more required fields are missing or malformed
pub const CODE_MISSING_FIELD: u32 = 1032;
/// A port number is outside 1..=65535
pub const CODE_PORT_RANGE: u32 = 3020;
/// A deployment with the same id is already stored
pub const CODE_CONFLICT: u32 = 5000;
/// No deployment is stored under the requested id
pub const CODE_NOT_FOUND: u32 = 5;
/// The request body could not be decoded
pub const CODE_MALFORMED_BODY: u32 = 1001;

/// Errors surfaced to API callers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Deployment already found with this ID")]
    Conflict,

    #[error("Deployment not found")]
    NotFound,

    #[error("{0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ApiError::Validation(ValidationError::MissingFields(_)) => CODE_MISSING_FIELD,
            ApiError::Validation(ValidationError::PortOutOfRange { .. }) => CODE_PORT_RANGE,
            ApiError::Conflict => CODE_CONFLICT,
            ApiError::NotFound => CODE_NOT_FOUND,
            ApiError::MalformedBody(_) => CODE_MALFORMED_BODY,
        }
    }

    /// Build the error body sent to the caller
    pub fn body(&self) -> ErrorBody {
        let extras = match self {
            ApiError::Validation(ValidationError::MissingFields(fields)) => {
                let names: Vec<String> =
                    fields.iter().map(|f| f.as_str().to_string()).collect();
                Some(HashMap::from([("failed_fields".to_string(), names)]))
            }
            _ => None,
        };

        ErrorBody {
            message: self.to_string(),
            code: self.code(),
            extras,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}
