//! Validation helpers
//!
//! Field-level checks shared by the vehicle controller. Each helper
//! returns a `validator::ValidationError` so failures surface through
//! the standard validation error response.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

/// First year a production automobile existed
pub const MIN_VEHICLE_YEAR: i32 = 1886;

/// Validate that a string is not blank after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validate a model year: 1886 up to next year's models
pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    let max_year = Utc::now().year() + 1;
    if year < MIN_VEHICLE_YEAR || year > max_year {
        let mut error = ValidationError::new("year");
        error.add_param("min".into(), &MIN_VEHICLE_YEAR);
        error.add_param("max".into(), &max_year);
        error.add_param("actual".into(), &year);
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
