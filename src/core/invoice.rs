//! Invoice domain types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Payment state of an invoice. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// All accepted statuses, in form order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is outside the closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown invoice status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A persisted invoice row
///
/// `amount` is in minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Column values for an INSERT; the identifier is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Column values for an UPDATE. Identifier and date are never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: i32,
    pub status: InvoiceStatus,
}

/// Convert a decimal amount into cents, rounding half away from zero.
///
/// Returns `None` when the amount is not finite or does not fit the
/// `INT` column.
pub fn amount_to_cents(amount: f64) -> Option<i32> {
    let cents = (amount * 100.0).round();
    if cents.is_finite() && cents >= i32::MIN as f64 && cents <= i32::MAX as f64 {
        Some(cents as i32)
    } else {
        None
    }
}

/// Current calendar date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
