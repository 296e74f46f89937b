//! Invoice writer: derives computed columns and issues one statement per
//! operation

use crate::core::error::{DashboardError, DashboardResult, StorageError};
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice, amount_to_cents, today_utc};
use crate::core::store::InvoiceStore;
use crate::core::validation::ValidatedInvoice;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

pub struct InvoiceWriter {
    store: Arc<dyn InvoiceStore>,
}

impl InvoiceWriter {
    pub fn new(store: Arc<dyn InvoiceStore>) -> Self {
        Self { store }
    }

    /// Insert a new invoice dated today (UTC)
    pub async fn create(&self, input: &ValidatedInvoice) -> DashboardResult<Invoice> {
        self.create_dated(input, today_utc()).await
    }

    /// Insert a new invoice with an explicit issue date
    pub async fn create_dated(
        &self,
        input: &ValidatedInvoice,
        date: NaiveDate,
    ) -> DashboardResult<Invoice> {
        let invoice = NewInvoice {
            customer_id: input.customer_id.clone(),
            amount: cents(input)?,
            status: input.status,
            date,
        };

        let created = self
            .store
            .insert_invoice(invoice)
            .await
            .map_err(|e| self.storage_error(e))?;

        tracing::info!(
            invoice_id = %created.id,
            amount = created.amount,
            status = %created.status,
            "invoice created"
        );
        Ok(created)
    }

    /// Update customer, amount and status of invoice `id`.
    ///
    /// Returns the affected row count. An unknown id is not an error.
    pub async fn update(&self, id: &Uuid, input: &ValidatedInvoice) -> DashboardResult<u64> {
        let changes = InvoiceChanges {
            customer_id: input.customer_id.clone(),
            amount: cents(input)?,
            status: input.status,
        };

        let affected = self
            .store
            .update_invoice(id, changes)
            .await
            .map_err(|e| self.storage_error(e))?;

        if affected == 0 {
            tracing::warn!(invoice_id = %id, "update matched no invoice");
        } else {
            tracing::info!(invoice_id = %id, "invoice updated");
        }
        Ok(affected)
    }

    fn storage_error(&self, e: anyhow::Error) -> DashboardError {
        StorageError::QueryError {
            backend: self.store.backend().to_string(),
            message: e.to_string(),
        }
        .into()
    }
}

/// Validated amounts always fit; anything else is a caller bug
fn cents(input: &ValidatedInvoice) -> DashboardResult<i32> {
    amount_to_cents(input.amount).ok_or_else(|| {
        DashboardError::Internal(format!(
            "amount {} does not fit in cents",
            input.amount
        ))
    })
}
