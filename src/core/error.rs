//! Typed error handling for invoice actions
//!
//! Errors are grouped by category so the HTTP layer (and tests) can match
//! on them precisely instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: form input rejected by the invoice schema
//! - [`StorageError`]: failures reported by an invoice repository backend
//! - [`AuthError`]: classified failures reported by a credential provider
//! - [`ConfigError`]: configuration parsing and validation
//! - [`RequestError`]: malformed or unresolvable HTTP requests
//!
//! # Example
//!
//! ```rust,ignore
//! match create_invoice_strict(&ctx, &form).await {
//!     Ok(outcome) => outcome.into_response(),
//!     Err(ActionError::Validation(ValidationError::Fields(errors))) => {
//!         println!("rejected fields: {}", errors);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The main error type for invoice actions
///
/// Lenient handlers never return this for validation or storage failures;
/// they fold those into a [`FormState`](crate::actions::FormState). The
/// strict create path and the HTTP extractors propagate it instead.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Form input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Repository backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Unclassified failure raised by an external collaborator
    #[error("upstream failure: {0}")]
    Upstream(anyhow::Error),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
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

impl ActionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ActionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::Request(e) => e.status_code(),
            ActionError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ActionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Validation(_) => "VALIDATION_ERROR",
            ActionError::Storage(_) => "STORAGE_ERROR",
            ActionError::Config(_) => "CONFIG_ERROR",
            ActionError::Request(e) => e.error_code(),
            ActionError::Upstream(_) => "UPSTREAM_ERROR",
            ActionError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Storage and upstream failures are reported with a fixed message so
    /// driver or provider detail never reaches the client.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ActionError::Storage(_) => "Database error".to_string(),
            ActionError::Upstream(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ActionError::Validation(ValidationError::Fields(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ActionError::Request(RequestError::NotFound { resource, id }) => {
                Some(serde_json::json!({ "resource": resource, "id": id }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        match &self {
            ActionError::Storage(e) => tracing::warn!(error = %e, "storage failure"),
            ActionError::Upstream(e) => tracing::error!(error = %e, "upstream failure"),
            ActionError::Internal(msg) => tracing::error!(%msg, "internal failure"),
            _ => {}
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Per-field validation messages keyed by form field name
///
/// Serialises as a plain JSON object, e.g.
/// `{"amount": ["Please enter an amount greater than $0."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for `field`, if any
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one message
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}

/// Errors related to input validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// One or more fields were rejected
    #[error("Validation errors: {0}")]
    Fields(FieldErrors),
}

impl ValidationError {
    /// Field errors carried by this error
    pub fn field_errors(&self) -> &FieldErrors {
        match self {
            ValidationError::Fields(errors) => errors,
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to repository backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    Connection {
        backend: &'static str,
        message: String,
    },

    /// Statement execution error
    #[error("{backend} query error: {message}")]
    Query {
        backend: &'static str,
        message: String,
    },

    /// Constraint violation or unreadable row
    #[error("Data integrity error: {message}")]
    Integrity { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: &'static str },
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Classified authentication failures reported by a credential provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The submitted credentials did not match a known user
    #[error("CredentialsSignin")]
    CredentialsSignin,

    /// Any other classified failure, named by its provider-specific type
    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Provider-facing failure type
    pub fn kind(&self) -> &str {
        match self {
            AuthError::CredentialsSignin => "CredentialsSignin",
            AuthError::Other(kind) => kind,
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Body could not be decoded as form data
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Addressed resource does not exist
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::NotFound { .. } => "NOT_FOUND",
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for invoice actions
pub type ActionResult<T> = Result<T, ActionError>;
