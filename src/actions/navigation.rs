//! Cache invalidation and client navigation after a write
//!
//! [`invalidate_view`] marks the cached view stale and [`Navigation`] tells
//! the browser where to go. Callers run them in that order.

use crate::core::cache::ViewCache;
use crate::core::error::{DashboardError, DashboardResult, StorageError};
use axum::response::{IntoResponse, Redirect, Response};

/// Mark the view at `path` stale so the next request re-renders it
pub async fn invalidate_view(cache: &dyn ViewCache, path: &str) -> DashboardResult<()> {
    cache.invalidate(path).await.map_err(cache_error)?;
    tracing::debug!(path = %path, "view invalidated");
    Ok(())
}

pub(crate) fn cache_error(e: anyhow::Error) -> DashboardError {
    StorageError::QueryError {
        backend: "view cache".to_string(),
        message: e.to_string(),
    }
    .into()
}

/// Instruction for the client to navigate to a path
///
/// Rendered as `303 See Other` so a browser follows a form POST with a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    path: String,
}

impl Navigation {
    pub fn to(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl IntoResponse for Navigation {
    fn into_response(self) -> Response {
        Redirect::to(&self.path).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryViewCache;
    use axum::http::{StatusCode, header};

    #[test]
    fn test_navigation_renders_see_other() {
        let response = Navigation::to("/dashboard/invoices").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard/invoices"
        );
    }

    #[tokio::test]
    async fn test_invalidate_view_records_path() {
        let cache = InMemoryViewCache::new();
        invalidate_view(&cache, "/dashboard/invoices").await.unwrap();
        assert_eq!(cache.invalidated_paths(), vec!["/dashboard/invoices"]);
    }
}
