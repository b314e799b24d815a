//! In-memory implementation of InvoiceRepository for testing and development

use crate::core::error::StorageError;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use crate::core::repository::InvoiceRepository;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "memory";

/// In-memory invoice repository
///
/// Rows are kept in insertion order. Ids must be UUIDs, like the
/// PostgreSQL column; anything else is rejected as a query error.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceRepository {
    invoices: Arc<RwLock<Vec<Invoice>>>,
}

impl InMemoryInvoiceRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `invoices`, oldest first
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        Self {
            invoices: Arc::new(RwLock::new(invoices.into_iter().collect())),
        }
    }

    /// Number of stored invoices
    pub fn len(&self) -> usize {
        self.invoices.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Query {
        backend: BACKEND,
        message: format!("Failed to acquire lock: {}", e),
    }
}

fn parse_id(id: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(id).map_err(|e| StorageError::Query {
        backend: BACKEND,
        message: format!("invalid invoice id '{}': {}", id, e),
    })
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn insert(&self, invoice: NewInvoice) -> Result<(), StorageError> {
        let mut rows = self.invoices.write().map_err(lock_error)?;

        rows.push(Invoice {
            id: Uuid::new_v4().to_string(),
            customer_id: invoice.customer_id,
            amount: invoice.amount_in_cents,
            status: invoice.status,
            date: invoice.date,
        });

        Ok(())
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), StorageError> {
        parse_id(id)?;
        let mut rows = self.invoices.write().map_err(lock_error)?;

        for row in rows.iter_mut().filter(|row| row.id == id) {
            row.customer_id = changes.customer_id.clone();
            row.amount = changes.amount_in_cents;
            row.status = changes.status;
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        parse_id(id)?;
        let mut rows = self.invoices.write().map_err(lock_error)?;

        rows.retain(|row| row.id != id);

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Invoice>, StorageError> {
        let rows = self.invoices.read().map_err(lock_error)?;

        Ok(rows.iter().rev().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>, StorageError> {
        let rows = self.invoices.read().map_err(lock_error)?;

        Ok(rows.iter().find(|row| row.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::InvoiceStatus;

    fn new_invoice(customer: &str, cents: i64) -> NewInvoice {
        NewInvoice {
            customer_id: customer.to_string(),
            amount_in_cents: cents,
            status: InvoiceStatus::Pending,
            date: "05.01.2024".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_uuid() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(new_invoice("cust-1", 12550)).await.unwrap();

        let invoices = repo.list().await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert!(Uuid::parse_str(&invoices[0].id).is_ok());
        assert_eq!(invoices[0].amount, 12550);
        assert_eq!(invoices[0].date, "05.01.2024");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(new_invoice("first", 1)).await.unwrap();
        repo.insert(new_invoice("second", 2)).await.unwrap();

        let customers: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.customer_id)
            .collect();
        assert_eq!(customers, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_date() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(new_invoice("cust-1", 100)).await.unwrap();
        let id = repo.list().await.unwrap()[0].id.clone();

        repo.update(
            &id,
            InvoiceChanges {
                customer_id: "cust-2".to_string(),
                amount_in_cents: 310,
                status: InvoiceStatus::Paid,
            },
        )
        .await
        .unwrap();

        let invoice = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(invoice.id, id);
        assert_eq!(invoice.customer_id, "cust-2");
        assert_eq!(invoice.amount, 310);
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.date, "05.01.2024");
    }

    #[tokio::test]
    async fn test_missing_id_affects_nothing() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(new_invoice("cust-1", 100)).await.unwrap();
        let missing = Uuid::new_v4().to_string();

        repo.update(
            &missing,
            InvoiceChanges {
                customer_id: "x".to_string(),
                amount_in_cents: 1,
                status: InvoiceStatus::Paid,
            },
        )
        .await
        .unwrap();
        repo.delete(&missing).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list().await.unwrap()[0].customer_id, "cust-1");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(new_invoice("cust-1", 100)).await.unwrap();
        let id = repo.list().await.unwrap()[0].id.clone();

        repo.delete(&id).await.unwrap();
        repo.delete(&id).await.unwrap();

        assert!(repo.is_empty());
        assert_eq!(repo.get(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_id_is_query_error() {
        let repo = InMemoryInvoiceRepository::new();

        let err = repo.delete("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, StorageError::Query { backend: "memory", .. }));
        assert_eq!(repo.get("not-a-uuid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_rows() {
        let repo = InMemoryInvoiceRepository::new();
        let clone = repo.clone();
        clone.insert(new_invoice("cust-1", 100)).await.unwrap();
        assert_eq!(repo.len(), 1);
    }
}
