//! Typed error handling for the invoice dashboard
//!
//! Handlers return [`DashboardError`] so that every failure maps to a
//! specific HTTP status and a machine-readable code instead of a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: rejected form submissions
//! - [`StorageError`]: failures reported by a storage backend
//! - [`ConfigError`]: configuration parsing and validation
//! - [`RequestError`]: malformed requests (bad path parameters, bodies)
//!
//! # Example
//!
//! ```rust,ignore
//! match actions.create_invoice(form).await {
//!     Ok(nav) => nav.into_response(),
//!     Err(DashboardError::Validation(ValidationError::FieldErrors(fields))) => {
//!         render_form_with(fields)
//!     }
//!     Err(e) => e.into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the dashboard
#[derive(Debug)]
pub enum DashboardError {
    /// Form validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Validation(e) => write!(f, "{}", e),
            DashboardError::Storage(e) => write!(f, "{}", e),
            DashboardError::Config(e) => write!(f, "{}", e),
            DashboardError::Request(e) => write!(f, "{}", e),
            DashboardError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Validation(e) => Some(e),
            DashboardError::Storage(e) => Some(e),
            DashboardError::Config(e) => Some(e),
            DashboardError::Request(e) => Some(e),
            DashboardError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Request(e) => e.status_code(),
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Request(e) => e.error_code(),
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            DashboardError::Request(RequestError::InvalidInvoiceId { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to form validation
#[derive(Debug)]
pub enum ValidationError {
    /// Every field that failed, in form order
    FieldErrors(Vec<FieldValidationError>),

    /// The submitted body could not be decoded as a form
    InvalidForm { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Messages attached to `field`, empty when the field passed
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        match self {
            ValidationError::FieldErrors(errors) => errors
                .iter()
                .filter(|e| e.field == field)
                .map(|e| e.message.as_str())
                .collect(),
            ValidationError::InvalidForm { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidForm { message } => {
                write!(f, "Invalid form submission: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        DashboardError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Query execution error
    QueryError { backend: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for DashboardError {
    fn from(err: StorageError) -> Self {
        DashboardError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        DashboardError::Config(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Path parameter is not a valid invoice identifier
    InvalidInvoiceId { id: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidInvoiceId { id } => {
                write!(f, "Invalid invoice ID format: '{}'", id)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidInvoiceId { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidInvoiceId { .. } => "INVALID_INVOICE_ID",
        }
    }
}

impl From<RequestError> for DashboardError {
    fn from(err: RequestError) -> Self {
        DashboardError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        DashboardError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Internal(format!("JSON serialization failed: {}", err))
    }
}

/// Result type alias using DashboardError
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_render_in_details() {
        let err = DashboardError::Validation(ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "status".to_string(),
                message: "required".to_string(),
            },
        ]));

        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("field errors carry details");
        assert_eq!(details["fields"][0]["field"], "status");
    }

    #[test]
    fn test_messages_for_filters_by_field() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "amount".to_string(),
                message: "a".to_string(),
            },
            FieldValidationError {
                field: "status".to_string(),
                message: "b".to_string(),
            },
        ]);

        assert_eq!(err.messages_for("amount"), vec!["a"]);
        assert!(err.messages_for("customerId").is_empty());
    }
}
