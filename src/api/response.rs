//! Response types for the payroll API.
//!
//! This module defines the success bodies that are not domain models, the
//! error body, and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Response body for `POST /work-hours/daily`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyHoursResponse {
    /// Hours between entry and exit, rounded to two decimal places.
    pub hours_worked: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidTaxTable { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Invalid tax table", message),
            ),
            EngineError::InvalidInput { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("Field '{}' is outside its allowed range", field),
                ),
            ),
            EngineError::InvalidWorkLog { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_WORK_LOG",
                    message,
                    "The work log contains invalid information",
                ),
            ),
            EngineError::InvalidTime { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_TIME", message, "Times must be formatted HH:MM"),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::WorkLogNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("WORK_LOG_NOT_FOUND", message),
            ),
            EngineError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            EngineError::StorageError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let response: ApiErrorResponse = EngineError::InvalidInput {
            field: "other_deductions".to_string(),
            message: "must not be negative, got -1".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_INPUT");
        assert!(response.error.message.contains("other_deductions"));
    }

    #[test]
    fn test_not_found_variants_are_404() {
        let employee: ApiErrorResponse = EngineError::EmployeeNotFound {
            id: "emp_404".to_string(),
        }
        .into();
        let log: ApiErrorResponse = EngineError::WorkLogNotFound {
            employee_id: "emp_001".to_string(),
            period: "2025-03".to_string(),
        }
        .into();

        assert_eq!(employee.status, StatusCode::NOT_FOUND);
        assert_eq!(employee.error.code, "EMPLOYEE_NOT_FOUND");
        assert_eq!(log.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_is_server_error() {
        let response: ApiErrorResponse = EngineError::StorageError {
            message: "lock poisoned".to_string(),
        }
        .into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.details.as_deref(), Some("Storage error: lock poisoned"));
    }
}
