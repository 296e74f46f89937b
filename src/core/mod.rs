//! Core module containing the domain types, storage traits and validation

pub mod cache;
pub mod error;
pub mod invoice;
pub mod records;
pub mod store;
pub mod validation;

pub use cache::{CachedView, ViewCache};
pub use error::{DashboardError, DashboardResult};
pub use invoice::{Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use records::{CustomerRecord, RevenueRecord, SeedTable, UserRecord};
pub use store::{InvoiceStore, SeedStore};
