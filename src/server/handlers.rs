//! HTTP handlers mapping requests onto the invoice actions

use crate::actions::{
    self, ActionContext, ActionOutcome, LoginMessage, SignInOutcome,
};
use crate::core::error::{ActionResult, RequestError};
use crate::core::form::FormData;
use crate::core::invoice::Invoice;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;
use serde_json::{Value, json};

/// Where a signed-in user lands
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Response for listing invoices
#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
    pub invoices: Vec<Invoice>,
    pub count: usize,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-actions"
    }))
}

/// POST /login
pub async fn login(State(ctx): State<ActionContext>, form: FormData) -> ActionResult<Response> {
    match actions::authenticate(&ctx, None, &form).await? {
        SignInOutcome::SignedIn(_) => Ok(Redirect::to(DASHBOARD_PATH).into_response()),
        SignInOutcome::Rejected { message } => {
            Ok((StatusCode::UNAUTHORIZED, Json(LoginMessage { message })).into_response())
        }
    }
}

/// GET /dashboard/invoices
pub async fn list_invoices(
    State(ctx): State<ActionContext>,
) -> ActionResult<Json<ListInvoicesResponse>> {
    let invoices = ctx.repository.list().await?;
    let count = invoices.len();
    Ok(Json(ListInvoicesResponse { invoices, count }))
}

/// GET /dashboard/invoices/{id}
pub async fn get_invoice(
    State(ctx): State<ActionContext>,
    Path(id): Path<String>,
) -> ActionResult<Json<Invoice>> {
    ctx.repository
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            RequestError::NotFound {
                resource: "invoice".to_string(),
                id,
            }
            .into()
        })
}

/// POST /dashboard/invoices/create
pub async fn create_invoice(State(ctx): State<ActionContext>, form: FormData) -> ActionOutcome {
    actions::create_invoice(&ctx, None, &form).await
}

/// POST /dashboard/invoices/quick-create
pub async fn quick_create_invoice(
    State(ctx): State<ActionContext>,
    form: FormData,
) -> ActionResult<ActionOutcome> {
    actions::create_invoice_strict(&ctx, &form).await
}

/// POST /dashboard/invoices/{id}/edit
pub async fn update_invoice(
    State(ctx): State<ActionContext>,
    Path(id): Path<String>,
    form: FormData,
) -> ActionOutcome {
    actions::update_invoice(&ctx, &id, None, &form).await
}

/// POST /dashboard/invoices/{id}/delete
pub async fn delete_invoice(
    State(ctx): State<ActionContext>,
    Path(id): Path<String>,
) -> ActionOutcome {
    actions::delete_invoice(&ctx, &id).await
}
