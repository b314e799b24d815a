//! Credential sign-in
//!
//! Sign-in is delegated to a [`CredentialProvider`]. Providers report
//! failures in two tiers:
//! - classified [`AuthError`]s, which the login action turns into a
//!   user-facing message
//! - unclassified errors (outages, corrupt data), which the login action
//!   propagates unchanged

use crate::core::error::AuthError;
use crate::core::form::FormData;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Strategy identifier for email + password sign-in
pub const CREDENTIALS_STRATEGY: &str = "credentials";

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Opaque result of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Failure reported by a credential provider
#[derive(Debug, Error)]
pub enum SignInError {
    /// Failure the provider could classify
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Anything else; callers must not swallow it
    #[error(transparent)]
    Unclassified(anyhow::Error),
}

/// External sign-in provider
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Attempt to sign in with `strategy` using the raw submitted form
    async fn sign_in(&self, strategy: &str, form: &FormData) -> Result<Session, SignInError>;
}

/// Provider over a fixed set of users with Argon2 PHC password hashes
///
/// Reads `email` and `password` from the form. Malformed input, unknown
/// users and wrong passwords all report [`AuthError::CredentialsSignin`]
/// so callers cannot tell which part was wrong.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    users: HashMap<String, String>,
}

impl StaticCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `email` with its Argon2 PHC `password_hash`
    pub fn with_user(mut self, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        self.users.insert(email.into(), password_hash.into());
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn verify(&self, email: &str, password: &str) -> Result<bool, SignInError> {
        let Some(stored) = self.users.get(email) else {
            return Ok(false);
        };

        let hash = PasswordHash::new(stored).map_err(|e| {
            SignInError::Unclassified(anyhow::anyhow!("invalid hash format for {}: {}", email, e))
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(SignInError::Unclassified(anyhow::anyhow!(
                "password verification failed: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn sign_in(&self, strategy: &str, form: &FormData) -> Result<Session, SignInError> {
        if strategy != CREDENTIALS_STRATEGY {
            return Err(AuthError::Other("InvalidProvider".to_string()).into());
        }

        let (Some(email), Some(password)) = (form.get("email"), form.get("password")) else {
            return Err(AuthError::CredentialsSignin.into());
        };

        if !is_valid_email(email) || password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::CredentialsSignin.into());
        }

        if self.verify(email, password)? {
            Ok(Session::new(email))
        } else {
            Err(AuthError::CredentialsSignin.into())
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    });
    regex.is_match(email)
}
