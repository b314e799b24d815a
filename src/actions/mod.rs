//! Form actions invoked by the HTTP layer
//!
//! Each action is a stateless async function taking an explicit
//! [`ActionContext`].

pub mod auth;
pub mod context;
pub mod invoices;
pub mod state;

pub use auth::authenticate;
pub use context::ActionContext;
pub use invoices::{create_invoice, create_invoice_strict, delete_invoice, update_invoice};
pub use state::{ActionOutcome, FormState, LoginMessage, SignInOutcome};
