//! Core types shared by the actions, storage backends and the HTTP server

pub mod auth;
pub mod date;
pub mod error;
pub mod form;
pub mod invoice;
pub mod repository;
pub mod revalidate;
pub mod validation;

pub use auth::{CredentialProvider, Session, SignInError, StaticCredentialProvider};
pub use date::{Clock, DateFormatPolicy, DateLocale, FixedClock, SystemClock};
pub use error::{ActionError, ActionResult, AuthError, FieldErrors, StorageError, ValidationError};
pub use form::FormData;
pub use invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use repository::InvoiceRepository;
pub use revalidate::{INVOICES_PATH, INVOICES_ROUTE, Revalidation, RevalidationBus};
pub use validation::{InvoiceInput, InvoiceSchema, SafeParse};
