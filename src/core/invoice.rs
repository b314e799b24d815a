//! Invoice records as stored in the `invoices` table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in form order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(format!("unknown invoice status: {other}")),
        }
    }
}

/// A persisted invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Database-assigned identifier, immutable once created
    pub id: String,
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    /// Creation date rendered by the configured date format
    pub date: String,
}

/// Values bound by an insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

/// Values bound by an update; id and date are never rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}
