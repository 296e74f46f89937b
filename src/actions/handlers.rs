//! HTTP handlers for invoice forms and the invoice list view

use super::navigation::Navigation;
use crate::core::error::{DashboardResult, RequestError};
use crate::core::validation::ValidatedInvoiceForm;
use crate::server::state::AppState;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// POST /dashboard/invoices - create an invoice from the form
pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedInvoiceForm(input): ValidatedInvoiceForm,
) -> DashboardResult<Navigation> {
    state.actions.create_invoice(&input).await
}

/// POST /dashboard/invoices/{id}/edit (and PUT /dashboard/invoices/{id})
/// - update an invoice from the form
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedInvoiceForm(input): ValidatedInvoiceForm,
) -> DashboardResult<Navigation> {
    let id = Uuid::parse_str(&id).map_err(|_| RequestError::InvalidInvoiceId { id })?;
    state.actions.update_invoice(&id, &input).await
}

/// GET /dashboard/invoices - the cached invoice list
pub async fn list_invoices(State(state): State<AppState>) -> DashboardResult<Response> {
    let body = state.views.render().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
