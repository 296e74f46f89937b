//! HTTP handler for the one-shot seed endpoint

use super::runner::SeedReport;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Body returned by a successful seeding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
    pub details: SeedReport,
}

/// Body returned when seeding aborts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedErrorResponse {
    pub error: String,
}

/// GET /seed - create the tables and load the placeholder data
///
/// Failures are logged and returned as `{ "error": ... }` with a 500 status.
/// Rows written before the failure stay in place. The invoice list view is
/// marked stale after every run, successful or not.
pub async fn seed_database(State(state): State<AppState>) -> Response {
    let outcome = state.seeder.run().await;
    if let Err(e) = state.views.invalidate().await {
        return seed_failure(&e);
    }

    match outcome {
        Ok(report) => {
            tracing::info!(
                users = report.users,
                customers = report.customers,
                invoices = report.invoices,
                revenue = report.revenue,
                "database seeded"
            );
            Json(SeedResponse {
                message: "Database seeded successfully".to_string(),
                details: report,
            })
            .into_response()
        }
        Err(e) => seed_failure(&e),
    }
}

fn seed_failure(e: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %e, "seeding error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SeedErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}
