//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly
//! - Error matching allows clients to handle specific cases

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use invoices::core::error::{
    ActionError, AuthError, ConfigError, FieldErrors, RequestError, StorageError, ValidationError,
};
use serde_json::Value;

fn amount_error() -> ValidationError {
    let mut errors = FieldErrors::new();
    errors.add("amount", "Please enter an amount greater than $0.");
    ValidationError::Fields(errors)
}

async fn body_json(err: ActionError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_validation_returns_422() {
        let err = ActionError::Validation(amount_error());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_storage_returns_500() {
        let err = ActionError::Storage(StorageError::Connection {
            backend: "PostgreSQL",
            message: "connection refused".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = ActionError::Request(RequestError::NotFound {
            resource: "invoice".to_string(),
            id: "x".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_returns_502() {
        let err = ActionError::Upstream(anyhow::anyhow!("provider down"));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_config_returns_500() {
        let err = ActionError::Config(ConfigError::FileNotFound {
            path: "invoices.yaml".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}

// =============================================================================
// Response Body Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let (status, body) = body_json(amount_error().into()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["details"]["fields"]["amount"][0],
            "Please enter an amount greater than $0."
        );
    }

    #[tokio::test]
    async fn test_storage_body_hides_driver_message() {
        let err: ActionError = StorageError::Query {
            backend: "PostgreSQL",
            message: "syntax error at or near \"INSERT\"".to_string(),
        }
        .into();

        let (_, body) = body_json(err).await;

        assert_eq!(body["code"], "STORAGE_ERROR");
        assert_eq!(body["message"], "Database error");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_not_found_body_has_details() {
        let err: ActionError = RequestError::NotFound {
            resource: "invoice".to_string(),
            id: "42".to_string(),
        }
        .into();

        let (_, body) = body_json(err).await;

        assert_eq!(body["details"]["resource"], "invoice");
        assert_eq!(body["details"]["id"], "42");
    }

    #[tokio::test]
    async fn test_upstream_body_is_generic() {
        let (_, body) = body_json(ActionError::Upstream(anyhow::anyhow!("secret detail"))).await;

        assert_eq!(body["message"], "Something went wrong");
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_question_mark_lifts_categories() {
        fn fails() -> Result<(), ActionError> {
            Err(StorageError::Unavailable { backend: "memory" })?
        }

        assert!(matches!(
            fails(),
            Err(ActionError::Storage(StorageError::Unavailable { .. }))
        ));
    }

    #[test]
    fn test_yaml_error_becomes_parse_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError { file: None, .. }));
    }

    #[test]
    fn test_auth_error_kinds_are_distinct() {
        assert_ne!(
            AuthError::CredentialsSignin,
            AuthError::Other("CredentialsSignin2".to_string())
        );
        assert_eq!(AuthError::Other("AccessDenied".to_string()).to_string(), "AccessDenied");
    }
}
