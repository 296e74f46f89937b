//! Route table for the dashboard

use super::state::AppState;
use crate::actions::handlers::{create_invoice, list_invoices, update_invoice};
use crate::seed::seed_database;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Build all routes:
/// - GET  /health, /healthz - health check
/// - GET  {invoices}            - cached invoice list
/// - POST {invoices}            - create invoice (form)
/// - POST {invoices}/{id}/edit  - update invoice (form)
/// - PUT  {invoices}/{id}       - update invoice (form)
/// - GET  /seed                 - create tables and load placeholder data
///
/// `{invoices}` is the configured invoices view path.
pub fn build_routes(state: AppState) -> Router {
    let invoices = state.actions.invoices_path().to_string();

    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route(&invoices, get(list_invoices).post(create_invoice))
        .route(&format!("{}/{{id}}/edit", invoices), post(update_invoice))
        .route(&format!("{}/{{id}}", invoices), axum::routing::put(update_invoice))
        .route("/seed", get(seed_database))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}
