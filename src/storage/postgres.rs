//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, implementing both [`InvoiceStore`] and
//! [`SeedStore`] on top of a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! invoice-dashboard = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! Tables are created on demand by [`SeedStore::ensure_table`]. Primary keys
//! are UUIDs generated by `uuid_generate_v4()` from the `uuid-ossp`
//! extension. `users.email` and `revenue.month` are unique.

use crate::config::DatabaseConfig;
use crate::core::invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
use crate::core::records::{CustomerRecord, RevenueRecord, SeedTable, UserRecord};
use crate::core::store::{InvoiceStore, SeedStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

const CREATE_UUID_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
)";

const CREATE_CUSTOMERS: &str = "CREATE TABLE IF NOT EXISTS customers (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    image_url VARCHAR(255) NOT NULL
)";

const CREATE_INVOICES: &str = "CREATE TABLE IF NOT EXISTS invoices (
    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
    customer_id UUID NOT NULL,
    amount INT NOT NULL,
    status VARCHAR(255) NOT NULL,
    date DATE NOT NULL
)";

const CREATE_REVENUE: &str = "CREATE TABLE IF NOT EXISTS revenue (
    month VARCHAR(4) NOT NULL UNIQUE,
    revenue INT NOT NULL
)";

/// Row shape shared by invoice SELECTs
type InvoiceRow = (Uuid, String, i32, String, NaiveDate);

const SELECT_INVOICE: &str = "SELECT id, customer_id::text, amount, status, date FROM invoices";

fn invoice_from_row((id, customer_id, amount, status, date): InvoiceRow) -> Result<Invoice> {
    let status: InvoiceStatus = status
        .parse()
        .map_err(|e| anyhow!("Invalid invoice row {}: {}", id, e))?;
    Ok(Invoice {
        id,
        customer_id,
        amount,
        status,
        date,
    })
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Invoice and seed storage backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let store = PostgresStore::connect(&config.database).await?;
/// let seeder = SeedRunner::new(Arc::new(store.clone()));
/// seeder.run().await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration. SSL is required unless disabled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| anyhow!("database.url is not configured"))?;

        let mut options: PgConnectOptions = url
            .parse()
            .map_err(|e| anyhow!("Invalid database URL: {}", e))?;
        if config.require_ssl {
            options = options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| anyhow!("Failed to connect to PostgreSQL: {}", e))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn execute(&self, sql: &str, context: &str) -> Result<()> {
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to {}: {}", context, e))?;
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for PostgresStore {
    fn backend(&self) -> &'static str {
        "PostgreSQL"
    }

    async fn insert_invoice(&self, invoice: NewInvoice) -> Result<Invoice> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO invoices (customer_id, amount, status, date) \
             VALUES ($1::uuid, $2, $3, $4) RETURNING id",
        )
        .bind(&invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to create invoice: {}", e))?;

        Ok(Invoice {
            id,
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        })
    }

    async fn update_invoice(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE invoices \
             SET customer_id = $1::uuid, amount = $2, status = $3 \
             WHERE id = $4",
        )
        .bind(&changes.customer_id)
        .bind(changes.amount)
        .bind(changes.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update invoice: {}", e))?;

        Ok(result.rows_affected())
    }

    async fn get_invoice(&self, id: &Uuid) -> Result<Option<Invoice>> {
        let sql = format!("{} WHERE id = $1", SELECT_INVOICE);
        let row = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to get invoice: {}", e))?;

        row.map(invoice_from_row).transpose()
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let sql = format!("{} ORDER BY date DESC, id", SELECT_INVOICE);
        let rows = sqlx::query_as::<_, InvoiceRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to list invoices: {}", e))?;

        rows.into_iter().map(invoice_from_row).collect()
    }
}

#[async_trait]
impl SeedStore for PostgresStore {
    async fn ensure_table(&self, table: SeedTable) -> Result<()> {
        let ddl = match table {
            SeedTable::Users => CREATE_USERS,
            SeedTable::Customers => CREATE_CUSTOMERS,
            SeedTable::Invoices => CREATE_INVOICES,
            SeedTable::Revenue => CREATE_REVENUE,
        };
        if table != SeedTable::Revenue {
            self.execute(CREATE_UUID_EXTENSION, "create uuid-ossp extension")
                .await?;
        }
        self.execute(ddl, &format!("create {} table", table)).await
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO users (id, name, email, password) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert user {}: {}", user.email, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_customer(&self, customer: &CustomerRecord) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO customers (id, name, email, image_url) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert customer {}: {}", customer.id, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_seed_invoice(&self, invoice: &Invoice) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO invoices (id, customer_id, amount, status, date) \
             VALUES ($1, $2::uuid, $3, $4, $5) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(invoice.id)
        .bind(&invoice.customer_id)
        .bind(invoice.amount)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert invoice {}: {}", invoice.id, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_revenue(&self, revenue: &RevenueRecord) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO revenue (month, revenue) \
             VALUES ($1, $2) \
             ON CONFLICT (month) DO NOTHING",
        )
        .bind(&revenue.month)
        .bind(revenue.revenue)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert revenue {}: {}", revenue.month, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_rows(&self, table: SeedTable) -> Result<u64> {
        // table names come from a closed enum, safe to interpolate
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count {}: {}", table, e))?;

        Ok(count as u64)
    }
}
