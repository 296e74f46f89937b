//! ServerBuilder for fluent API to build the HTTP server

use super::router::build_routes;
use super::state::AppState;
use crate::actions::{InvoiceActions, InvoiceListView};
use crate::config::AppConfig;
use crate::core::cache::ViewCache;
use crate::core::store::{InvoiceStore, SeedStore};
use crate::seed::SeedRunner;
use crate::storage::InMemoryViewCache;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the dashboard server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(AppConfig::default())
///     .with_database(InMemoryStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    invoices: Option<Arc<dyn InvoiceStore>>,
    seeds: Option<Arc<dyn SeedStore>>,
    view_cache: Option<Arc<dyn ViewCache>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            invoices: None,
            seeds: None,
            view_cache: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the database backing both the form actions and the seeder
    /// (required)
    pub fn with_database<D>(mut self, database: D) -> Self
    where
        D: InvoiceStore + SeedStore + 'static,
    {
        let database = Arc::new(database);
        self.invoices = Some(database.clone());
        self.seeds = Some(database);
        self
    }

    /// Set the view cache. Defaults to an in-process cache.
    pub fn with_view_cache(mut self, cache: impl ViewCache + 'static) -> Self {
        self.view_cache = Some(Arc::new(cache));
        self
    }

    /// Same as [`with_view_cache`](Self::with_view_cache) for a cache the
    /// caller keeps a handle to
    pub fn with_shared_view_cache(mut self, cache: Arc<dyn ViewCache>) -> Self {
        self.view_cache = Some(cache);
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_state(&mut self) -> Result<AppState> {
        let invoices = self.invoices.take().ok_or_else(|| {
            anyhow::anyhow!("A database is required. Call .with_database()")
        })?;
        let seeds = self.seeds.take().ok_or_else(|| {
            anyhow::anyhow!("A database is required. Call .with_database()")
        })?;
        let cache: Arc<dyn ViewCache> = match self.view_cache.take() {
            Some(cache) => cache,
            None => Arc::new(InMemoryViewCache::new()),
        };

        let path = self.config.views.invoices_path.clone();

        let actions = InvoiceActions::new(invoices.clone(), cache.clone())
            .with_invoices_path(path.clone())
            .with_messages(self.config.validation.messages);
        let views = InvoiceListView::new(invoices, cache, path);
        let seeder = SeedRunner::new(seeds).with_bcrypt_cost(self.config.seed.bcrypt_cost);

        Ok(AppState {
            actions: Arc::new(actions),
            views: Arc::new(views),
            seeder: Arc::new(seeder),
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        self.config.validate()?;
        let state = self.build_state()?;
        let mut app = build_routes(state);

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_build_without_database_fails() {
        let result = ServerBuilder::new(AppConfig::default()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.views.invoices_path = "dashboard".to_string();

        let result = ServerBuilder::new(config)
            .with_database(InMemoryStore::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_fluent_chaining_full_pipeline() {
        let result = ServerBuilder::new(AppConfig::default())
            .with_database(InMemoryStore::new())
            .with_view_cache(InMemoryViewCache::new())
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok(), "full fluent pipeline should succeed");
    }
}
