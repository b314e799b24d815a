//! # Invoice Actions
//!
//! Form-submission handlers for an invoice dashboard: validate submitted
//! invoice forms, persist them to an `invoices` table, and mark the invoice
//! list stale after every successful mutation.
//!
//! ## Features
//!
//! - **Schema validation**: per-field messages for re-rendering a form, or a
//!   typed error for callers that propagate
//! - **Pluggable storage**: in-memory repository, PostgreSQL behind the
//!   `postgres` feature
//! - **Revalidation bus**: broadcast notices for every route that went stale
//! - **Credential sign-in**: Argon2-backed provider, swappable by trait
//! - **HTTP exposure**: axum routes with graceful shutdown
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! let ctx = ActionContext::new(Arc::new(InMemoryInvoiceRepository::new()));
//!
//! let form: FormData = [("customerId", "abc"), ("amount", "125.50"), ("status", "paid")]
//!     .into_iter()
//!     .collect();
//!
//! let outcome = create_invoice(&ctx, None, &form).await;
//! assert_eq!(outcome, ActionOutcome::redirect("/dashboard/invoices"));
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::actions::{
        ActionContext, ActionOutcome, FormState, SignInOutcome, authenticate, create_invoice,
        create_invoice_strict, delete_invoice, update_invoice,
    };

    // === Core ===
    pub use crate::core::{
        ActionError, ActionResult, Clock, CredentialProvider, DateFormatPolicy, DateLocale,
        FieldErrors, FixedClock, FormData, INVOICES_PATH, INVOICES_ROUTE, Invoice,
        InvoiceChanges, InvoiceRepository, InvoiceSchema, InvoiceStatus, NewInvoice,
        RevalidationBus, SafeParse, Session, SignInError, StaticCredentialProvider,
        StorageError, SystemClock,
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceRepository;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceRepository;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
