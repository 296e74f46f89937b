//! Cached invoice list view
//!
//! The rendered body is cached under the view path and served from the
//! cache until a write invalidates it. A render that overlaps a write does
//! not cache its body.

use super::navigation::{cache_error, invalidate_view};
use crate::core::cache::ViewCache;
use crate::core::error::{DashboardError, DashboardResult, StorageError};
use crate::core::invoice::Invoice;
use crate::core::store::InvoiceStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rendered body of the invoice list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceListPage {
    pub invoices: Vec<Invoice>,
    pub count: usize,
    pub rendered_at: DateTime<Utc>,
}

pub struct InvoiceListView {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<dyn ViewCache>,
    path: String,
}

impl InvoiceListView {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<dyn ViewCache>, path: String) -> Self {
        Self { store, cache, path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Serve the cached body, rendering and caching it on a miss
    pub async fn render(&self) -> DashboardResult<String> {
        let cached = self
            .cache
            .get(&self.path)
            .await
            .map_err(cache_error)?;
        if let Some(body) = cached.body {
            tracing::debug!(path = %self.path, "view cache hit");
            return Ok(body);
        }

        let invoices = self
            .store
            .list_invoices()
            .await
            .map_err(|e| -> DashboardError {
                StorageError::QueryError {
                    backend: self.store.backend().to_string(),
                    message: e.to_string(),
                }
                .into()
            })?;

        let page = InvoiceListPage {
            count: invoices.len(),
            invoices,
            rendered_at: Utc::now(),
        };
        let body = serde_json::to_string(&page)?;

        let stored = self
            .cache
            .put(&self.path, body.clone(), cached.generation)
            .await
            .map_err(cache_error)?;
        if stored {
            tracing::debug!(path = %self.path, count = page.count, "view rendered");
        } else {
            tracing::debug!(path = %self.path, "view invalidated during render, not cached");
        }

        Ok(body)
    }

    /// Mark the view stale after a write that bypassed the form actions
    pub async fn invalidate(&self) -> DashboardResult<()> {
        invalidate_view(self.cache.as_ref(), &self.path).await
    }
}
