//! HTTP exposure of the invoice actions
//!
//! `ServerBuilder` wires an [`ActionContext`](crate::actions::ActionContext)
//! into an axum router with:
//! - health routes
//! - login and invoice form routes
//! - request tracing

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
