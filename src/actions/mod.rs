//! Invoice form actions
//!
//! Each action runs the same pipeline: validated input goes to the
//! [`InvoiceWriter`], the invoice list view is invalidated, then the client
//! is sent to it. A failed write skips the last two steps.

pub mod handlers;
pub mod navigation;
pub mod views;
pub mod writer;

pub use navigation::{Navigation, invalidate_view};
pub use views::{InvoiceListPage, InvoiceListView};
pub use writer::InvoiceWriter;

use crate::core::cache::ViewCache;
use crate::core::error::DashboardResult;
use crate::core::store::InvoiceStore;
use crate::core::validation::{InvoiceForm, MessageStyle, ValidatedInvoice};
use std::sync::Arc;
use uuid::Uuid;

/// Default path of the invoice list view
pub const INVOICES_PATH: &str = "/dashboard/invoices";

pub struct InvoiceActions {
    writer: InvoiceWriter,
    cache: Arc<dyn ViewCache>,
    invoices_path: String,
    messages: MessageStyle,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn ViewCache>) -> Self {
        Self {
            writer: InvoiceWriter::new(store),
            cache,
            invoices_path: INVOICES_PATH.to_string(),
            messages: MessageStyle::default(),
        }
    }

    /// Override the path that is invalidated and navigated to
    pub fn with_invoices_path(mut self, path: impl Into<String>) -> Self {
        self.invoices_path = path.into();
        self
    }

    /// Choose the message catalog used for validation failures
    pub fn with_messages(mut self, messages: MessageStyle) -> Self {
        self.messages = messages;
        self
    }

    pub fn messages(&self) -> MessageStyle {
        self.messages
    }

    pub fn invoices_path(&self) -> &str {
        &self.invoices_path
    }

    /// Validate a raw form, then create the invoice.
    ///
    /// Invalid input is rejected before any statement is issued.
    pub async fn submit_create(&self, form: &InvoiceForm) -> DashboardResult<Navigation> {
        let input = form.parse(self.messages)?;
        self.create_invoice(&input).await
    }

    /// Validate a raw form, then update invoice `id`
    pub async fn submit_update(&self, id: &Uuid, form: &InvoiceForm) -> DashboardResult<Navigation> {
        let input = form.parse(self.messages)?;
        self.update_invoice(id, &input).await
    }

    pub async fn create_invoice(&self, input: &ValidatedInvoice) -> DashboardResult<Navigation> {
        self.writer.create(input).await?;
        self.after_write().await
    }

    /// Update invoice `id`. An unknown id still invalidates and navigates.
    pub async fn update_invoice(
        &self,
        id: &Uuid,
        input: &ValidatedInvoice,
    ) -> DashboardResult<Navigation> {
        self.writer.update(id, input).await?;
        self.after_write().await
    }

    async fn after_write(&self) -> DashboardResult<Navigation> {
        invalidate_view(self.cache.as_ref(), &self.invoices_path).await?;
        Ok(Navigation::to(self.invoices_path.clone()))
    }
}
