//! Route revalidation notices
//!
//! After a successful mutation an action marks the cached data of a route
//! stale by publishing a [`Revalidation`] on the [`RevalidationBus`].
//! Anything that renders or caches route data subscribes and re-fetches
//! from the repository on its next render.
//!
//! ```text
//! create/update/delete ──▶ RevalidationBus::invalidate() ──▶ broadcast ──▶ subscribers
//! ```
//!
//! Navigation is not a side effect here: handlers return
//! [`ActionOutcome::Redirect`](crate::actions::ActionOutcome::Redirect).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Cache key of the invoice list
pub const INVOICES_ROUTE: &str = "dashboard/invoices";

/// Client path of the invoice list
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// A route whose cached data went stale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revalidation {
    /// Unique notice ID
    pub id: Uuid,
    /// Logical route key, e.g. `dashboard/invoices`
    pub route: String,
    /// When the route was invalidated
    pub timestamp: DateTime<Utc>,
}

impl Revalidation {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            route: route.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Broadcast bus for revalidation notices
///
/// Cheap to clone; every clone publishes to the same subscribers.
#[derive(Debug, Clone)]
pub struct RevalidationBus {
    sender: broadcast::Sender<Revalidation>,
}

impl RevalidationBus {
    /// Create a bus buffering up to `capacity` notices per slow subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Mark `route` stale
    ///
    /// Never fails. With no subscribers the notice is dropped. Returns the
    /// number of subscribers that will receive it.
    pub fn invalidate(&self, route: &str) -> usize {
        tracing::debug!(route, "revalidating route");
        // send() only errors when nobody is listening
        self.sender.send(Revalidation::new(route)).unwrap_or(0)
    }

    /// Receive every notice published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Revalidation> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for RevalidationBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
