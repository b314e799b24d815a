//! Route table

use super::handlers;
use crate::actions::ActionContext;
use axum::Router;
use axum::routing::{get, post};

/// Build the invoice and login routes
///
/// - POST /login - Sign in with the credentials strategy
/// - GET /dashboard/invoices - List invoices, newest first
/// - GET /dashboard/invoices/{id} - Get a single invoice
/// - POST /dashboard/invoices/create - Create, re-rendering state on failure
/// - POST /dashboard/invoices/quick-create - Create, failing with an error response
/// - POST /dashboard/invoices/{id}/edit - Update customer, amount and status
/// - POST /dashboard/invoices/{id}/delete - Delete
pub fn build_invoice_routes(ctx: ActionContext) -> Router {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/dashboard/invoices", get(handlers::list_invoices))
        .route("/dashboard/invoices/create", post(handlers::create_invoice))
        .route(
            "/dashboard/invoices/quick-create",
            post(handlers::quick_create_invoice),
        )
        .route("/dashboard/invoices/{id}", get(handlers::get_invoice))
        .route("/dashboard/invoices/{id}/edit", post(handlers::update_invoice))
        .route(
            "/dashboard/invoices/{id}/delete",
            post(handlers::delete_invoice),
        )
        .with_state(ctx)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/healthz", get(handlers::health_check))
}
