//! Error message catalogs for the invoice form
//!
//! Both styles apply the same rules; they only differ in the text shown for
//! a failing field.

use super::validators::{INVALID_ENUM, INVALID_NUMBER, OUT_OF_RANGE, REQUIRED};
use crate::core::error::{FieldValidationError, ValidationError};
use serde::{Deserialize, Serialize};

/// Form field names as submitted by the browser, in form order
pub const CUSTOMER_ID: &str = "customerId";
pub const AMOUNT: &str = "amount";
pub const STATUS: &str = "status";

const FORM_ORDER: [&str; 3] = [CUSTOMER_ID, AMOUNT, STATUS];

/// Which message catalog to render validation failures with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    /// Terse, schema-style messages
    Default,
    /// Human-readable messages meant to be shown next to the form input
    #[default]
    Custom,
}

impl MessageStyle {
    /// Text for a failing `field` with error `code`
    pub fn message(&self, field: &str, code: &str) -> String {
        match self {
            MessageStyle::Default => default_message(code),
            MessageStyle::Custom => custom_message(field, code),
        }
    }

    /// Convert validator output into a field-keyed error listing every
    /// failing field in form order
    pub fn field_errors(&self, errors: &validator::ValidationErrors) -> ValidationError {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = form_field_name(&field.to_string());
                errs.iter()
                    .map(|e| FieldValidationError {
                        field: field.clone(),
                        message: self.message(&field, &e.code),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        fields.sort_by_key(|e| {
            FORM_ORDER
                .iter()
                .position(|f| *f == e.field)
                .unwrap_or(FORM_ORDER.len())
        });

        ValidationError::FieldErrors(fields)
    }

    /// A one-field error
    pub fn single(&self, field: &str, code: &str) -> ValidationError {
        ValidationError::FieldErrors(vec![FieldValidationError {
            field: field.to_string(),
            message: self.message(field, code),
        }])
    }
}

/// Map a Rust struct field name to the browser form name
fn form_field_name(field: &str) -> String {
    match field {
        "customer_id" => CUSTOMER_ID.to_string(),
        other => other.to_string(),
    }
}

fn default_message(code: &str) -> String {
    match code {
        REQUIRED => "Required".to_string(),
        INVALID_NUMBER => "Expected number, received nan".to_string(),
        OUT_OF_RANGE => "Number must fit in a 32-bit amount of cents".to_string(),
        INVALID_ENUM => "Invalid enum value. Expected 'pending' | 'paid'".to_string(),
        other => format!("Invalid value ({})", other),
    }
}

fn custom_message(field: &str, code: &str) -> String {
    match (field, code) {
        (CUSTOMER_ID, _) => "Please select a customer.".to_string(),
        (AMOUNT, REQUIRED) => "Please enter an amount.".to_string(),
        (AMOUNT, OUT_OF_RANGE) => "Please enter a smaller amount.".to_string(),
        (AMOUNT, _) => "Please enter a valid amount.".to_string(),
        (STATUS, _) => "Please select an invoice status.".to_string(),
        _ => default_message(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_differ_only_in_text() {
        let default = MessageStyle::Default.message(STATUS, INVALID_ENUM);
        let custom = MessageStyle::Custom.message(STATUS, INVALID_ENUM);
        assert_eq!(default, "Invalid enum value. Expected 'pending' | 'paid'");
        assert_eq!(custom, "Please select an invoice status.");
    }

    #[test]
    fn test_custom_amount_messages_by_code() {
        let style = MessageStyle::Custom;
        assert_eq!(style.message(AMOUNT, REQUIRED), "Please enter an amount.");
        assert_eq!(
            style.message(AMOUNT, INVALID_NUMBER),
            "Please enter a valid amount."
        );
    }

    #[test]
    fn test_field_name_mapping() {
        assert_eq!(form_field_name("customer_id"), "customerId");
        assert_eq!(form_field_name("amount"), "amount");
    }

    #[test]
    fn test_style_deserializes_lowercase() {
        let style: MessageStyle = serde_yaml::from_str("default").unwrap();
        assert_eq!(style, MessageStyle::Default);
        assert_eq!(MessageStyle::default(), MessageStyle::Custom);
    }
}
