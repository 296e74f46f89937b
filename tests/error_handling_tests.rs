//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses carry a stable code and useful details
//! - Conversions from external errors land in the right category

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use dashboard::core::error::ConfigError;
use dashboard::prelude::*;

fn field_error(field: &str, message: &str) -> FieldValidationError {
    FieldValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_field_errors_return_400() {
        let err = DashboardError::Validation(ValidationError::FieldErrors(vec![field_error(
            "amount",
            "Please enter an amount.",
        )]));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_undecodable_form_returns_400() {
        let err = DashboardError::Validation(ValidationError::InvalidForm {
            message: "bad encoding".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_invoice_id_returns_400() {
        let err = DashboardError::Request(RequestError::InvalidInvoiceId {
            id: "nope".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_returns_500() {
        let err = DashboardError::Storage(StorageError::QueryError {
            backend: "postgres".to_string(),
            message: "relation \"invoices\" does not exist".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_and_internal_errors_return_500() {
        let config = DashboardError::Config(ConfigError::IoError {
            message: "missing".to_string(),
        });
        let internal = DashboardError::Internal("boom".to_string());
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_codes_per_category() {
        let cases: Vec<(DashboardError, &str)> = vec![
            (
                ValidationError::FieldErrors(Vec::new()).into(),
                "VALIDATION_ERROR",
            ),
            (
                StorageError::QueryError {
                    backend: "in-memory".to_string(),
                    message: "x".to_string(),
                }
                .into(),
                "STORAGE_ERROR",
            ),
            (
                ConfigError::ParseError {
                    file: None,
                    message: "x".to_string(),
                }
                .into(),
                "CONFIG_ERROR",
            ),
            (
                RequestError::InvalidInvoiceId {
                    id: "x".to_string(),
                }
                .into(),
                "INVALID_INVOICE_ID",
            ),
            (DashboardError::Internal("x".to_string()), "INTERNAL_ERROR"),
        ];

        for (err, code) in cases {
            assert_eq!(err.error_code(), code, "for {}", err);
        }
    }
}

// =============================================================================
// Response Body Tests
// =============================================================================

mod response_tests {
    use super::*;

    async fn body_json(err: DashboardError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_field_errors_listed_in_details() {
        let err: DashboardError = ValidationError::FieldErrors(vec![
            field_error("customerId", "Please select a customer."),
            field_error("status", "Please select an invoice status."),
        ])
        .into();

        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"][0]["field"], "customerId");
        assert_eq!(
            body["details"]["fields"][1]["message"],
            "Please select an invoice status."
        );
    }

    #[tokio::test]
    async fn test_invalid_id_echoes_the_id() {
        let err: DashboardError = RequestError::InvalidInvoiceId {
            id: "abc".to_string(),
        }
        .into();

        let (_, body) = body_json(err).await;

        assert_eq!(body["details"]["id"], "abc");
        assert!(body["message"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn test_storage_error_has_no_details() {
        let err: DashboardError = StorageError::QueryError {
            backend: "postgres".to_string(),
            message: "timeout".to_string(),
        }
        .into();

        let (_, body) = body_json(err).await;

        assert_eq!(body["message"], "postgres query error: timeout");
        assert!(body.get("details").is_none());
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_yaml_error_becomes_config_error() {
        let yaml_err = serde_yaml::from_str::<AppConfig>("server: [").unwrap_err();
        let err: DashboardError = yaml_err.into();
        assert!(matches!(err, DashboardError::Config(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_json_error_becomes_internal() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Internal(_)));
    }

    #[test]
    fn test_source_chain_exposes_category() {
        let err: DashboardError = RequestError::InvalidInvoiceId {
            id: "x".to_string(),
        }
        .into();
        let source = std::error::Error::source(&err).expect("category error as source");
        assert_eq!(source.to_string(), "Invalid invoice ID format: 'x'");
    }
}
