// Validation utilities module
// Provides custom validation functions for domain-specific row shapes

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::{Coupon, Service};

/// Validates that a money amount is not negative
pub fn validate_non_negative_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO {
        Err(ValidationError::new("amount_must_not_be_negative"))
    } else {
        Ok(())
    }
}

/// Validates that a service duration is strictly positive
pub fn validate_positive_duration(minutes: i32) -> Result<(), ValidationError> {
    if minutes <= 0 {
        Err(ValidationError::new("duration_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Checks a fetched service row for a well-formed shape
///
/// Durations must be positive and prices non-negative. A row that fails
/// here is malformed data, not an expected business condition.
pub fn check_service_row(service: &Service) -> Result<(), ValidationError> {
    validate_positive_duration(service.duration_minutes)?;
    validate_non_negative_amount(service.price)?;
    Ok(())
}

/// Checks a fetched coupon row for a well-formed shape
///
/// Discount value and minimum purchase must be non-negative, the validity
/// window must not be inverted, and the usage counter must not already
/// exceed a declared cap by being negative.
pub fn check_coupon_row(coupon: &Coupon) -> Result<(), ValidationError> {
    validate_non_negative_amount(coupon.discount_value)?;
    validate_non_negative_amount(coupon.min_purchase)?;
    if coupon.valid_from > coupon.valid_until {
        return Err(ValidationError::new("coupon_window_inverted"));
    }
    if coupon.current_uses < 0 {
        return Err(ValidationError::new("usage_counter_negative"));
    }
    Ok(())
}
