//! # Invoice Dashboard
//!
//! A server-rendered dashboard for invoices, customers and revenue.
//!
//! ## Features
//!
//! - **Validated forms**: invoice submissions are checked against a
//!   declarative schema before any statement reaches the database
//! - **Single-statement writes**: create and update each issue exactly one
//!   parameterized statement, amounts stored in cents
//! - **View invalidation**: a successful write marks the cached invoice list
//!   stale, then redirects the browser to it
//! - **Idempotent seeding**: `GET /seed` creates the tables and loads
//!   placeholder data, skipping rows that already exist
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load()?;
//!     ServerBuilder::new(config)
//!         .with_database(InMemoryStore::new())
//!         .serve()
//!         .await
//! }
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod seed;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CachedView, DashboardError, DashboardResult, Invoice, InvoiceChanges, InvoiceStatus,
        InvoiceStore, NewInvoice, SeedStore, SeedTable, ViewCache,
        error::{FieldValidationError, RequestError, StorageError, ValidationError},
        validation::{InvoiceForm, MessageStyle, ValidatedInvoice, ValidatedInvoiceForm},
    };

    // === Actions ===
    pub use crate::actions::{
        INVOICES_PATH, InvoiceActions, InvoiceListPage, InvoiceListView, InvoiceWriter,
        Navigation, invalidate_view,
    };

    // === Seeding ===
    pub use crate::seed::{SeedError, SeedFixtures, SeedReport, SeedResponse, SeedRunner};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, InMemoryViewCache};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use uuid::Uuid;
}
