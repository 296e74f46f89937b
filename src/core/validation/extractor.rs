//! Axum extractor for validated invoice forms
//!
//! `ValidatedInvoiceForm` decodes an urlencoded body and validates it before
//! the handler runs, so a rejected submission never reaches the store.

use super::form::{InvoiceForm, ValidatedInvoice};
use super::messages::MessageStyle;
use crate::core::error::{DashboardError, ValidationError};
use axum::Form;
use axum::extract::{FromRef, FromRequest, Request};
use std::collections::HashMap;

/// Axum extractor that validates an invoice form submission
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     State(state): State<AppState>,
///     ValidatedInvoiceForm(input): ValidatedInvoiceForm,
/// ) -> Result<Navigation, DashboardError> {
///     // input is already validated
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedInvoiceForm(pub ValidatedInvoice);

impl<S> FromRequest<S> for ValidatedInvoiceForm
where
    S: Send + Sync,
    MessageStyle: FromRef<S>,
{
    type Rejection = DashboardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(fields): Form<HashMap<String, String>> = Form::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidForm {
                message: e.body_text(),
            })?;

        let style = MessageStyle::from_ref(state);
        let validated = InvoiceForm::from_fields(&fields).parse(style)?;

        Ok(ValidatedInvoiceForm(validated))
    }
}
