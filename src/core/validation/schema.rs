//! Invoice form schema
//!
//! Raw form text is coerced into [`InvoiceFields`], checked with the
//! `validator` derive, then converted into a typed [`InvoiceInput`].
//! Two entry points share that pipeline:
//!
//! - [`InvoiceSchema::parse`] fails with a [`ValidationError`] for callers
//!   that propagate with `?`
//! - [`InvoiceSchema::safe_parse`] never fails and hands back the per-field
//!   messages for re-rendering a form

use super::validators;
use crate::core::error::{FieldErrors, ValidationError};
use crate::core::form::FormData;
use crate::core::invoice::{InvoiceChanges, InvoiceStatus, NewInvoice};
use validator::{Validate, ValidationErrors};

/// Coerced but not yet validated form fields
#[derive(Debug, Validate)]
struct InvoiceFields {
    #[validate(length(min = 1, message = "Please select a customer"))]
    customer_id: String,

    #[validate(range(
        exclusive_min = 0.0,
        max = 1e13,
        message = "Please enter an amount greater than $0."
    ))]
    amount: f64,

    #[validate(custom(function = "validators::invoice_status"))]
    status: String,
}

impl InvoiceFields {
    fn from_form(form: &FormData) -> Self {
        Self {
            customer_id: validators::text(form.get("customerId")),
            amount: validators::number(form.get("amount")),
            status: validators::text(form.get("status")),
        }
    }
}

/// Validated invoice submission
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceInput {
    pub customer_id: String,
    /// Amount in dollars, always finite and positive
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceInput {
    /// Amount converted to whole cents
    pub fn amount_in_cents(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }

    pub fn into_new_invoice(self, date: String) -> NewInvoice {
        NewInvoice {
            amount_in_cents: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
            date,
        }
    }

    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            amount_in_cents: self.amount_in_cents(),
            customer_id: self.customer_id,
            status: self.status,
        }
    }
}

/// Result of a non-failing parse
#[derive(Debug, Clone, PartialEq)]
pub enum SafeParse<T> {
    Success { data: T },
    Failure { errors: FieldErrors },
}

impl<T> SafeParse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, SafeParse::Success { .. })
    }

    pub fn into_result(self) -> Result<T, ValidationError> {
        match self {
            SafeParse::Success { data } => Ok(data),
            SafeParse::Failure { errors } => Err(ValidationError::Fields(errors)),
        }
    }
}

/// Shape shared by the create and update forms
pub struct InvoiceSchema;

impl InvoiceSchema {
    /// Validate `form`, failing on the first rejected submission
    pub fn parse(form: &FormData) -> Result<InvoiceInput, ValidationError> {
        Self::safe_parse(form).into_result()
    }

    /// Validate `form`, collecting every field message
    pub fn safe_parse(form: &FormData) -> SafeParse<InvoiceInput> {
        let fields = InvoiceFields::from_form(form);

        if let Err(errors) = fields.validate() {
            return SafeParse::Failure {
                errors: flatten(&errors),
            };
        }

        match fields.status.parse::<InvoiceStatus>() {
            Ok(status) => SafeParse::Success {
                data: InvoiceInput {
                    customer_id: fields.customer_id,
                    amount: fields.amount,
                    status,
                },
            },
            Err(_) => {
                let mut errors = FieldErrors::new();
                errors.add("status", validators::STATUS_MESSAGE);
                SafeParse::Failure { errors }
            }
        }
    }
}

/// Key validator output by form field name
fn flatten(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let name = form_field_name(&field);
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| default_message(&name).to_string());
            out.add(name.clone(), message);
        }
    }
    out
}

fn form_field_name(field: &str) -> String {
    match field {
        "customer_id" => "customerId".to_string(),
        other => other.to_string(),
    }
}

fn default_message(field: &str) -> &'static str {
    match field {
        "customerId" => validators::CUSTOMER_MESSAGE,
        "amount" => validators::AMOUNT_MESSAGE,
        _ => validators::STATUS_MESSAGE,
    }
}
