//! Validation of submitted invoice forms
//!
//! Field coercions and reusable rules live in [`validators`]; the invoice
//! shape and its strict/safe entry points live in [`schema`].

pub mod schema;
pub mod validators;

pub use schema::{InvoiceInput, InvoiceSchema, SafeParse};
