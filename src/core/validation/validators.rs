//! Field validators for the invoice form
//!
//! Each validator is wired into [`InvoiceForm`](super::form::InvoiceForm)
//! through `#[validate(custom(...))]` and reports a stable error code. The
//! human-readable text is chosen later by a
//! [`MessageStyle`](super::messages::MessageStyle).

use crate::core::invoice::{InvoiceStatus, amount_to_cents};
use validator::ValidationError;

/// Field is missing or blank
pub const REQUIRED: &str = "required";
/// Amount could not be coerced to a number
pub const INVALID_NUMBER: &str = "invalid_number";
/// Amount does not fit the cents column
pub const OUT_OF_RANGE: &str = "out_of_range";
/// Status is outside the closed set
pub const INVALID_ENUM: &str = "invalid_enum";

/// Validator: customer reference is present
pub fn validate_customer_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(REQUIRED));
    }
    Ok(())
}

/// Validator: amount is present and coerces to a representable number
pub fn validate_amount(value: &str) -> Result<(), ValidationError> {
    coerce_amount(value)
        .map(|_| ())
        .map_err(ValidationError::new)
}

/// Validator: status is one of the accepted values
pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    coerce_status(value)
        .map(|_| ())
        .map_err(ValidationError::new)
}

/// Coerce a raw form value into a decimal amount.
///
/// Surrounding whitespace is ignored. Non-finite values are rejected, as are
/// amounts whose cent value would overflow the `INT` column.
pub fn coerce_amount(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(REQUIRED);
    }
    let amount: f64 = raw.parse().map_err(|_| INVALID_NUMBER)?;
    if !amount.is_finite() {
        return Err(INVALID_NUMBER);
    }
    if amount_to_cents(amount).is_none() {
        return Err(OUT_OF_RANGE);
    }
    Ok(amount)
}

/// Coerce a raw form value into an [`InvoiceStatus`]. Matching is exact.
pub fn coerce_status(raw: &str) -> Result<InvoiceStatus, &'static str> {
    if raw.trim().is_empty() {
        return Err(REQUIRED);
    }
    raw.parse().map_err(|_| INVALID_ENUM)
}
