//! Invoice form validation
//!
//! The form schema is a plain struct validated with the `validator` derive.
//! Validation returns a `Result` so callers can branch on failure instead of
//! catching a panic or exception.

pub mod extractor;
pub mod form;
pub mod messages;
pub mod validators;

pub use extractor::ValidatedInvoiceForm;
pub use form::{InvoiceForm, ValidatedInvoice};
pub use messages::MessageStyle;
