//! Reusable field coercions and validators
//!
//! Coercions turn raw form text into the typed fields the schema checks.
//! They never fail: a value that cannot be coerced becomes one the schema
//! rule rejects, so the user sees the field's own message.

use crate::core::invoice::InvoiceStatus;
use std::borrow::Cow;
use validator::ValidationError;

pub const CUSTOMER_MESSAGE: &str = "Please select a customer";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than $0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status";

/// Largest accepted amount in dollars; keeps the cent value well inside `i64`
pub const MAX_AMOUNT: f64 = 1e13;

/// Coerce: missing text becomes the empty string
pub fn text(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_string()
}

/// Coerce: text to number
///
/// Surrounding whitespace is ignored and missing or blank input reads as
/// `0`. Unparseable or non-finite input also becomes `0.0`, which the
/// amount rule rejects.
pub fn number(raw: Option<&str>) -> f64 {
    let trimmed = raw.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Validator: value must name an [`InvoiceStatus`]
pub fn invoice_status(value: &str) -> Result<(), ValidationError> {
    if InvoiceStatus::ALL.iter().any(|s| s.as_str() == value) {
        Ok(())
    } else {
        Err(ValidationError::new("invoice_status").with_message(Cow::Borrowed(STATUS_MESSAGE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === text() ===

    #[test]
    fn test_text_missing_is_empty() {
        assert_eq!(text(None), "");
    }

    #[test]
    fn test_text_keeps_value() {
        assert_eq!(text(Some("abc")), "abc");
    }

    // === number() ===

    #[test]
    fn test_number_parses_decimal() {
        assert_eq!(number(Some("125.50")), 125.5);
    }

    #[test]
    fn test_number_trims_whitespace() {
        assert_eq!(number(Some("  42 ")), 42.0);
    }

    #[test]
    fn test_number_missing_is_zero() {
        assert_eq!(number(None), 0.0);
        assert_eq!(number(Some("")), 0.0);
    }

    #[test]
    fn test_number_garbage_is_zero() {
        assert_eq!(number(Some("twelve")), 0.0);
    }

    #[test]
    fn test_number_non_finite_is_zero() {
        assert_eq!(number(Some("inf")), 0.0);
        assert_eq!(number(Some("NaN")), 0.0);
    }

    #[test]
    fn test_number_keeps_negative() {
        assert_eq!(number(Some("-3")), -3.0);
    }

    // === invoice_status() ===

    #[test]
    fn test_invoice_status_accepts_known() {
        assert!(invoice_status("pending").is_ok());
        assert!(invoice_status("paid").is_ok());
    }

    #[test]
    fn test_invoice_status_rejects_unknown() {
        let err = invoice_status("overdue").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(STATUS_MESSAGE));
    }

    #[test]
    fn test_invoice_status_rejects_empty() {
        assert!(invoice_status("").is_err());
    }
}
