//! Values returned by the action handlers

use crate::core::auth::Session;
use crate::core::error::FieldErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

/// Error state handed back to a form for re-rendering
///
/// Serialises with a `kind` tag:
///
/// ```json
/// { "kind": "validation", "errors": { "amount": ["..."] }, "message": "..." }
/// { "kind": "database", "message": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormState {
    /// One or more fields were rejected; nothing was written
    Validation { errors: FieldErrors, message: String },
    /// The repository call failed; driver detail stays in the logs
    Database { message: String },
}

impl FormState {
    pub fn validation(errors: FieldErrors, message: impl Into<String>) -> Self {
        FormState::Validation {
            errors,
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        FormState::Database {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FormState::Validation { message, .. } | FormState::Database { message } => message,
        }
    }

    /// Field messages, empty for database failures
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            FormState::Validation { errors, .. } => Some(errors),
            FormState::Database { .. } => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            FormState::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            FormState::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// What the client should do after an invoice action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Navigate to `to`
    Redirect { to: String },
    /// Mutation applied, stay where you are
    Completed,
    /// Re-render the form with this state
    Failed(FormState),
}

impl ActionOutcome {
    pub fn redirect(to: impl Into<String>) -> Self {
        ActionOutcome::Redirect { to: to.into() }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ActionOutcome::Failed(_))
    }

    pub fn state(&self) -> Option<&FormState> {
        match self {
            ActionOutcome::Failed(state) => Some(state),
            _ => None,
        }
    }
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect { to } => Redirect::to(&to).into_response(),
            ActionOutcome::Completed => StatusCode::NO_CONTENT.into_response(),
            ActionOutcome::Failed(state) => (state.status_code(), Json(state)).into_response(),
        }
    }
}

/// Result of a sign-in attempt the login form can display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(Session),
    Rejected { message: String },
}

impl SignInOutcome {
    pub fn rejected(message: impl Into<String>) -> Self {
        SignInOutcome::Rejected {
            message: message.into(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SignInOutcome::Rejected { message } => Some(message),
            SignInOutcome::SignedIn(_) => None,
        }
    }
}

/// Body of a rejected login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginMessage {
    pub message: String,
}
