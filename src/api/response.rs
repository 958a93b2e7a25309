//! Response types for the billing API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let code = error.code();
        let message = error.to_string();

        let (status, details) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The server's billing configuration could not be read",
            ),
            EngineError::MissingConfiguration { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Activate exactly one discount configuration before running billing",
            ),
            EngineError::InvalidConfiguration { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "The active billing configuration is inconsistent",
            ),
            EngineError::AmbiguousDateEncoding { .. } => (
                StatusCode::BAD_REQUEST,
                "Dates must be written as YYYY-MM-DD or DD/MM/YYYY",
            ),
            EngineError::InvalidEnrollment { .. } => (
                StatusCode::BAD_REQUEST,
                "The enrollment data contains invalid information",
            ),
            EngineError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                "The month must be between 1 and 12",
            ),
            EngineError::CalculationError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Billing failed")
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, message, details),
        }
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
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_missing_configuration_is_unprocessable() {
        let api_error: ApiErrorResponse = EngineError::MissingConfiguration {
            message: "0 of 2 discount rows are active".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "MISSING_CONFIGURATION");
        assert!(api_error.error.message.contains("0 of 2"));
    }

    #[test]
    fn test_invalid_period_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidPeriod {
            year: 2024,
            month: 13,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/etc/comedor/discounts.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_NOT_FOUND");
    }
}
