//! Storage traits for invoice writes and database seeding
//!
//! Both traits are agnostic to the backend. Every method issues exactly one
//! statement and is awaited to completion by the caller before the next one.

use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use crate::core::records::{CustomerRecord, RevenueRecord, SeedTable, UserRecord};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Invoice persistence used by the form actions and the list view
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Short backend name used in error messages ("PostgreSQL", "in-memory")
    fn backend(&self) -> &'static str;

    /// Insert a new invoice and return it with its generated identifier
    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Update customer, amount and status of the invoice `id`.
    ///
    /// Returns the number of rows affected; an unknown id yields `0`.
    async fn update_invoice(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64>;

    /// Get an invoice by ID
    async fn get_invoice(&self, id: &Uuid) -> Result<Option<Invoice>>;

    /// List all invoices, newest date first
    async fn list_invoices(&self) -> Result<Vec<Invoice>>;
}

/// Table creation and conflict-skipping inserts used by the seeder
///
/// The `insert_*` methods return `true` when a row was written and `false`
/// when the key already existed.
#[async_trait]
pub trait SeedStore: Send + Sync {
    /// Create `table` with its fixed schema if it does not exist yet
    async fn ensure_table(&self, table: SeedTable) -> Result<()>;

    /// Insert a user whose `password` is already hashed. Skips on `id`.
    async fn insert_user(&self, user: &UserRecord) -> Result<bool>;

    /// Insert a customer. Skips on `id`.
    async fn insert_customer(&self, customer: &CustomerRecord) -> Result<bool>;

    /// Insert an invoice with a fixed identifier. Skips on `id`.
    async fn insert_seed_invoice(&self, invoice: &Invoice) -> Result<bool>;

    /// Insert a revenue row. Skips on `month`.
    async fn insert_revenue(&self, revenue: &RevenueRecord) -> Result<bool>;

    /// Number of rows currently in `table`
    async fn count_rows(&self, table: SeedTable) -> Result<u64>;
}

