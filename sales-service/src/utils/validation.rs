//! Validation helpers
//!
//! CPF normalization and field-level checks used by the sale controller.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Normalize a CPF: strip formatting characters and require exactly
/// 11 digits. Returns the digits-only form used for storage.
pub fn normalize_cpf(value: &str) -> Result<String, ValidationError> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        let mut error = ValidationError::new("cpf");
        error.message = Some("CPF must contain exactly 11 digits".into());
        return Err(error);
    }
    Ok(digits)
}

/// Validate that a string is not blank after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validate that a price is strictly positive
pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        let mut error = ValidationError::new("price");
        error.message = Some("price must be greater than zero".into());
        return Err(error);
    }
    Ok(())
}
