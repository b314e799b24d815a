//! Login action

use super::context::ActionContext;
use super::state::SignInOutcome;
use crate::core::auth::{CREDENTIALS_STRATEGY, SignInError};
use crate::core::error::{ActionError, ActionResult, AuthError};
use crate::core::form::FormData;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Sign in with the `credentials` strategy
///
/// Classified provider failures become a [`SignInOutcome::Rejected`]
/// message for the login form. Anything the provider could not classify
/// is returned as [`ActionError::Upstream`]. `previous_message` is what the
/// form last displayed and does not affect the result.
pub async fn authenticate(
    ctx: &ActionContext,
    _previous_message: Option<&str>,
    form: &FormData,
) -> ActionResult<SignInOutcome> {
    match ctx.credentials.sign_in(CREDENTIALS_STRATEGY, form).await {
        Ok(session) => {
            tracing::info!(email = %session.email, "signed in");
            Ok(SignInOutcome::SignedIn(session))
        }
        Err(SignInError::Auth(AuthError::CredentialsSignin)) => {
            tracing::debug!("sign-in rejected: invalid credentials");
            Ok(SignInOutcome::rejected(INVALID_CREDENTIALS_MESSAGE))
        }
        Err(SignInError::Auth(e)) => {
            tracing::debug!(kind = e.kind(), "sign-in rejected");
            Ok(SignInOutcome::rejected(GENERIC_FAILURE_MESSAGE))
        }
        Err(SignInError::Unclassified(e)) => {
            tracing::error!(error = %e, "credential provider failed");
            Err(ActionError::Upstream(e))
        }
    }
}
