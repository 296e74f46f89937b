//! Declarative schema for the invoice form

use super::messages::{AMOUNT, CUSTOMER_ID, MessageStyle, STATUS};
use super::validators::{
    coerce_amount, coerce_status, validate_amount, validate_customer_id, validate_status,
};
use crate::core::error::ValidationError;
use crate::core::invoice::InvoiceStatus;
use std::collections::HashMap;
use validator::Validate;

/// Raw invoice form submission. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct InvoiceForm {
    #[validate(custom(function = "validate_customer_id"))]
    pub customer_id: String,

    #[validate(custom(function = "validate_amount"))]
    pub amount: String,

    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

/// A form that passed validation, with typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInvoice {
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    pub fn new(
        customer_id: impl Into<String>,
        amount: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            amount: amount.into(),
            status: status.into(),
        }
    }

    /// Build a form from raw field name → value pairs. Unknown fields are
    /// ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |name: &str| fields.get(name).cloned().unwrap_or_default();
        Self {
            customer_id: get(CUSTOMER_ID),
            amount: get(AMOUNT),
            status: get(STATUS),
        }
    }

    /// Validate every field and produce a typed record.
    ///
    /// On failure the error lists every failing field, with text chosen by
    /// `style`.
    pub fn parse(&self, style: MessageStyle) -> Result<ValidatedInvoice, ValidationError> {
        Validate::validate(self).map_err(|errors| style.field_errors(&errors))?;

        let amount = coerce_amount(&self.amount).map_err(|code| style.single(AMOUNT, code))?;
        let status = coerce_status(&self.status).map_err(|code| style.single(STATUS, code))?;

        Ok(ValidatedInvoice {
            customer_id: self.customer_id.trim().to_string(),
            amount,
            status,
        })
    }
}
