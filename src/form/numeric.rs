//! Numeric field validation
//!
//! Validates the four numeric form fields before they leave the form
//! boundary. Validation is exhaustive: every failing field is reported, in
//! field order, rather than stopping at the first error.

use crate::models::{ValidatedNumbers, ValidationResult};

/// Which numeric fields the caller requires to be non-empty
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFields {
    pub quantity: bool,
    pub entry_price: bool,
    pub exit_price: bool,
    pub pnl: bool,
}

/// Validate the numeric form fields
///
/// Each field, if non-empty, must parse as a finite number; `NaN`,
/// infinities and non-numeric text are rejected. Empty normalizes to `None`
/// unless the caller marked the field required. Pure function, never
/// errors out of band.
pub fn validate_numeric_fields(
    quantity: &str,
    entry_price: &str,
    exit_price: &str,
    pnl: &str,
    required: RequiredFields,
) -> ValidationResult {
    let mut errors = Vec::new();

    let data = ValidatedNumbers {
        quantity: parse_field("Quantity", quantity, required.quantity, &mut errors),
        entry_price: parse_field("Entry price", entry_price, required.entry_price, &mut errors),
        exit_price: parse_field("Exit price", exit_price, required.exit_price, &mut errors),
        pnl: parse_field("P&L", pnl, required.pnl, &mut errors),
    };

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        data,
    }
}

fn parse_field(label: &str, raw: &str, required: bool, errors: &mut Vec<String>) -> Option<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        if required {
            errors.push(format!("{} is required", label));
        }
        return None;
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            errors.push(format!("{} must be a valid number", label));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(quantity: &str, entry: &str, exit: &str, pnl: &str) -> ValidationResult {
        validate_numeric_fields(quantity, entry, exit, pnl, RequiredFields::default())
    }

    #[test]
    fn test_valid_numbers_normalize() {
        let result = validate("10", "100.5", "110", "-25.75");
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.data.quantity, Some(10.0));
        assert_eq!(result.data.entry_price, Some(100.5));
        assert_eq!(result.data.exit_price, Some(110.0));
        assert_eq!(result.data.pnl, Some(-25.75));
    }

    #[test]
    fn test_empty_fields_normalize_to_none() {
        let result = validate("", "", "", "");
        assert!(result.is_valid);
        assert_eq!(result.data, ValidatedNumbers::default());
    }

    #[test]
    fn test_non_numeric_quantity_names_the_field() {
        let result = validate("abc", "100", "", "");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Quantity"));
        assert_eq!(result.data.quantity, None);
        assert_eq!(result.data.entry_price, Some(100.0));
    }

    #[test]
    fn test_nan_and_infinity_rejected() {
        let result = validate("NaN", "inf", "-infinity", "1e9999");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 4);
    }

    #[test]
    fn test_all_errors_reported_in_field_order() {
        let result = validate("x", "y", "10", "z");
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[0].contains("Quantity"));
        assert!(result.errors[1].contains("Entry price"));
        assert!(result.errors[2].contains("P&L"));
    }

    #[test]
    fn test_required_empty_field_errors() {
        let required = RequiredFields {
            quantity: true,
            ..Default::default()
        };
        let result = validate_numeric_fields("", "", "", "", required);
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("Quantity"));
        assert!(result.errors[0].contains("required"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let result = validate("  42  ", "   ", "", "");
        assert!(result.is_valid);
        assert_eq!(result.data.quantity, Some(42.0));
        assert_eq!(result.data.entry_price, None);
    }
}
