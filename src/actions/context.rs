//! Explicit dependencies handed to every action

use crate::core::auth::{CredentialProvider, StaticCredentialProvider};
use crate::core::date::DateFormatPolicy;
use crate::core::repository::InvoiceRepository;
use crate::core::revalidate::RevalidationBus;
use crate::storage::InMemoryInvoiceRepository;
use std::sync::Arc;

/// Collaborators used by the action handlers
///
/// Cloning is cheap: every field is shared.
#[derive(Clone)]
pub struct ActionContext {
    pub repository: Arc<dyn InvoiceRepository>,
    pub revalidation: RevalidationBus,
    pub dates: DateFormatPolicy,
    pub credentials: Arc<dyn CredentialProvider>,
}

impl ActionContext {
    /// Context over `repository` with default notifier, dates and no users
    pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
        Self {
            repository,
            revalidation: RevalidationBus::default(),
            dates: DateFormatPolicy::default(),
            credentials: Arc::new(StaticCredentialProvider::new()),
        }
    }

    pub fn with_revalidation(mut self, revalidation: RevalidationBus) -> Self {
        self.revalidation = revalidation;
        self
    }

    pub fn with_dates(mut self, dates: DateFormatPolicy) -> Self {
        self.dates = dates;
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryInvoiceRepository::new()))
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("dates", &self.dates)
            .field("subscribers", &self.revalidation.receiver_count())
            .finish_non_exhaustive()
    }
}
