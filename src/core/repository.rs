//! Repository trait for the `invoices` table

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use async_trait::async_trait;

/// Parameterized access to the `invoices` table
///
/// Each write is a single statement with bound values. Writes return
/// nothing on success; callers only care whether they failed. The
/// framework is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice; the backend assigns its id
    async fn insert(&self, invoice: NewInvoice) -> Result<(), StorageError>;

    /// Rewrite customer, amount and status of every row with `id`
    ///
    /// A missing id matches zero rows and is not an error.
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), StorageError>;

    /// Remove the row with `id`; a missing id is not an error
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// All invoices, most recently inserted first
    async fn list(&self) -> Result<Vec<Invoice>, StorageError>;

    /// Fetch a single invoice
    async fn get(&self, id: &str) -> Result<Option<Invoice>, StorageError>;
}
