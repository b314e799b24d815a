//! Invoice create, update and delete actions
//!
//! Every action runs the same pipeline:
//!
//! ```text
//! form ──▶ InvoiceSchema ──▶ InvoiceRepository ──▶ invalidate(dashboard/invoices) ──▶ redirect
//! ```
//!
//! The lenient actions fold validation and storage failures into a
//! [`FormState`]. [`create_invoice_strict`] propagates them instead.
//! The `previous` state some actions accept is what the form last rendered;
//! it never influences the result.

use super::context::ActionContext;
use super::state::{ActionOutcome, FormState};
use crate::core::error::ActionResult;
use crate::core::form::FormData;
use crate::core::revalidate::{INVOICES_PATH, INVOICES_ROUTE};
use crate::core::validation::{InvoiceSchema, SafeParse};

pub const CREATE_FIELDS_MESSAGE: &str = "Missing Fields. Failed to create Invoice.";
pub const UPDATE_FIELDS_MESSAGE: &str = "Missing Fields. Failed to update Invoice.";
pub const INSERT_FAILED_MESSAGE: &str = "Database error: cannot insert into invoices";
pub const UPDATE_FAILED_MESSAGE: &str = "Database error: cannot update the invoices";
pub const DELETE_FAILED_MESSAGE: &str = "Database error: Cannot delete invoice";

/// Create an invoice from a form submission
///
/// On success the new row carries today's date from the context's date
/// policy and the client is redirected to the invoice list.
pub async fn create_invoice(
    ctx: &ActionContext,
    _previous: Option<&FormState>,
    form: &FormData,
) -> ActionOutcome {
    let input = match InvoiceSchema::safe_parse(form) {
        SafeParse::Success { data } => data,
        SafeParse::Failure { errors } => {
            tracing::debug!(%errors, "create invoice rejected");
            return ActionOutcome::Failed(FormState::validation(errors, CREATE_FIELDS_MESSAGE));
        }
    };

    let invoice = input.into_new_invoice(ctx.dates.today());
    let customer_id = invoice.customer_id.clone();
    let amount = invoice.amount_in_cents;

    if let Err(e) = ctx.repository.insert(invoice).await {
        tracing::warn!(error = %e, "failed to insert invoice");
        return ActionOutcome::Failed(FormState::database(INSERT_FAILED_MESSAGE));
    }

    tracing::info!(%customer_id, amount, "invoice created");
    ctx.revalidation.invalidate(INVOICES_ROUTE);
    ActionOutcome::redirect(INVOICES_PATH)
}

/// Create an invoice, propagating every failure
///
/// Validation failures surface as
/// [`ActionError::Validation`](crate::core::error::ActionError::Validation)
/// and repository failures as
/// [`ActionError::Storage`](crate::core::error::ActionError::Storage).
pub async fn create_invoice_strict(ctx: &ActionContext, form: &FormData) -> ActionResult<ActionOutcome> {
    let input = InvoiceSchema::parse(form)?;

    let invoice = input.into_new_invoice(ctx.dates.today());
    let customer_id = invoice.customer_id.clone();
    let amount = invoice.amount_in_cents;

    ctx.repository.insert(invoice).await?;

    tracing::info!(%customer_id, amount, "invoice created");
    ctx.revalidation.invalidate(INVOICES_ROUTE);
    Ok(ActionOutcome::redirect(INVOICES_PATH))
}

/// Rewrite customer, amount and status of invoice `id`
///
/// The creation date is left untouched. An id matching no row still
/// redirects.
pub async fn update_invoice(
    ctx: &ActionContext,
    id: &str,
    _previous: Option<&FormState>,
    form: &FormData,
) -> ActionOutcome {
    let input = match InvoiceSchema::safe_parse(form) {
        SafeParse::Success { data } => data,
        SafeParse::Failure { errors } => {
            tracing::debug!(id, %errors, "update invoice rejected");
            return ActionOutcome::Failed(FormState::validation(errors, UPDATE_FIELDS_MESSAGE));
        }
    };

    if let Err(e) = ctx.repository.update(id, input.into_changes()).await {
        tracing::warn!(id, error = %e, "failed to update invoice");
        return ActionOutcome::Failed(FormState::database(UPDATE_FAILED_MESSAGE));
    }

    tracing::info!(id, "invoice updated");
    ctx.revalidation.invalidate(INVOICES_ROUTE);
    ActionOutcome::redirect(INVOICES_PATH)
}

/// Delete invoice `id`
///
/// Invalidates the list but does not navigate.
pub async fn delete_invoice(ctx: &ActionContext, id: &str) -> ActionOutcome {
    if let Err(e) = ctx.repository.delete(id).await {
        tracing::warn!(id, error = %e, "failed to delete invoice");
        return ActionOutcome::Failed(FormState::database(DELETE_FAILED_MESSAGE));
    }

    tracing::info!(id, "invoice deleted");
    ctx.revalidation.invalidate(INVOICES_ROUTE);
    ActionOutcome::Completed
}
