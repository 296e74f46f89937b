//! In-memory implementation of the invoice and seed stores for testing and
//! development
//!
//! Tables behave like their SQL counterparts: they must be created before
//! use, primary keys skip on conflict, and `users.email` is unique.

use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use crate::core::records::{CustomerRecord, RevenueRecord, SeedTable, UserRecord};
use crate::core::store::{InvoiceStore, SeedStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Option<HashMap<Uuid, UserRecord>>,
    customers: Option<HashMap<Uuid, CustomerRecord>>,
    invoices: Option<HashMap<Uuid, Invoice>>,
    revenue: Option<BTreeMap<String, RevenueRecord>>,
}

fn missing(table: SeedTable) -> anyhow::Error {
    anyhow!("relation \"{}\" does not exist", table.name())
}

/// In-memory database
///
/// Uses RwLock for thread-safe access. Cloning shares the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    statements: Arc<AtomicU64>,
}

impl InMemoryStore {
    /// Create an empty database with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a database with all four tables already present
    pub fn with_schema() -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.write() {
            tables.users = Some(HashMap::new());
            tables.customers = Some(HashMap::new());
            tables.invoices = Some(HashMap::new());
            tables.revenue = Some(BTreeMap::new());
        }
        store
    }

    /// Number of statements executed against this database
    pub fn statement_count(&self) -> u64 {
        self.statements.load(Ordering::SeqCst)
    }

    /// Stored user row, including its password hash
    pub fn user(&self, id: &Uuid) -> Result<Option<UserRecord>> {
        let tables = self.read()?;
        let users = tables.users.as_ref().ok_or_else(|| missing(SeedTable::Users))?;
        Ok(users.get(id).cloned())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>> {
        self.statements.fetch_add(1, Ordering::SeqCst);
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.statements.fetch_add(1, Ordering::SeqCst);
        self.tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "in-memory"
    }

    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<Invoice> {
        let mut tables = self.write()?;
        let invoices = tables
            .invoices
            .as_mut()
            .ok_or_else(|| missing(SeedTable::Invoices))?;

        let row = Invoice {
            id: Uuid::new_v4(),
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        };
        invoices.insert(row.id, row.clone());

        Ok(row)
    }

    async fn update_invoice(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        let mut tables = self.write()?;
        let invoices = tables
            .invoices
            .as_mut()
            .ok_or_else(|| missing(SeedTable::Invoices))?;

        match invoices.get_mut(id) {
            Some(row) => {
                row.customer_id = changes.customer_id;
                row.amount = changes.amount;
                row.status = changes.status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn get_invoice(&self, id: &Uuid) -> Result<Option<Invoice>> {
        let tables = self.read()?;
        let invoices = tables
            .invoices
            .as_ref()
            .ok_or_else(|| missing(SeedTable::Invoices))?;

        Ok(invoices.get(id).cloned())
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let tables = self.read()?;
        let invoices = tables
            .invoices
            .as_ref()
            .ok_or_else(|| missing(SeedTable::Invoices))?;

        let mut rows: Vec<Invoice> = invoices.values().cloned().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}

#[async_trait]
impl SeedStore for InMemoryStore {
    async fn ensure_table(&self, table: SeedTable) -> Result<()> {
        let mut tables = self.write()?;
        match table {
            SeedTable::Users => {
                tables.users.get_or_insert_with(HashMap::new);
            }
            SeedTable::Customers => {
                tables.customers.get_or_insert_with(HashMap::new);
            }
            SeedTable::Invoices => {
                tables.invoices.get_or_insert_with(HashMap::new);
            }
            SeedTable::Revenue => {
                tables.revenue.get_or_insert_with(BTreeMap::new);
            }
        }
        Ok(())
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<bool> {
        let mut tables = self.write()?;
        let users = tables
            .users
            .as_mut()
            .ok_or_else(|| missing(SeedTable::Users))?;

        if users.contains_key(&user.id) {
            return Ok(false);
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(anyhow!(
                "duplicate key value violates unique constraint \"users_email_key\": {}",
                user.email
            ));
        }
        users.insert(user.id, user.clone());
        Ok(true)
    }

    async fn insert_customer(&self, customer: &CustomerRecord) -> Result<bool> {
        let mut tables = self.write()?;
        let customers = tables
            .customers
            .as_mut()
            .ok_or_else(|| missing(SeedTable::Customers))?;

        if customers.contains_key(&customer.id) {
            return Ok(false);
        }
        customers.insert(customer.id, customer.clone());
        Ok(true)
    }

    async fn insert_seed_invoice(&self, invoice: &Invoice) -> Result<bool> {
        let mut tables = self.write()?;
        let invoices = tables
            .invoices
            .as_mut()
            .ok_or_else(|| missing(SeedTable::Invoices))?;

        if invoices.contains_key(&invoice.id) {
            return Ok(false);
        }
        invoices.insert(invoice.id, invoice.clone());
        Ok(true)
    }

    async fn insert_revenue(&self, revenue: &RevenueRecord) -> Result<bool> {
        let mut tables = self.write()?;
        let rows = tables
            .revenue
            .as_mut()
            .ok_or_else(|| missing(SeedTable::Revenue))?;

        if rows.contains_key(&revenue.month) {
            return Ok(false);
        }
        rows.insert(revenue.month.clone(), revenue.clone());
        Ok(true)
    }

    async fn count_rows(&self, table: SeedTable) -> Result<u64> {
        let tables = self.read()?;
        let count = match table {
            SeedTable::Users => tables.users.as_ref().map(|t| t.len()),
            SeedTable::Customers => tables.customers.as_ref().map(|t| t.len()),
            SeedTable::Invoices => tables.invoices.as_ref().map(|t| t.len()),
            SeedTable::Revenue => tables.revenue.as_ref().map(|t| t.len()),
        };
        count.map(|n| n as u64).ok_or_else(|| missing(table))
    }
}
