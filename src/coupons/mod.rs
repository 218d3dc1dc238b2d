// Coupon Evaluator
//
// Validates a coupon against the purchase subtotal and the current moment,
// then computes the raw discount. Checks short-circuit in a fixed order so
// every failure maps to one stable error kind. The evaluator applies no
// cap: clamping a fixed discount against the subtotal is the pricing
// aggregator's decision.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{BookingError, BookingResult};
use crate::models::{Coupon, DiscountType};
use crate::validation::check_coupon_row;

/// Evaluator for coupon validity and discount amounts
pub struct CouponEvaluator;

impl CouponEvaluator {
    /// Evaluate a coupon against a purchase subtotal
    ///
    /// Validation order (first failure wins):
    /// 1. the coupon must be active (`InactiveCoupon`)
    /// 2. `now` must fall inside the validity window, inclusive on both
    ///    ends (`ExpiredOrNotYetValid`)
    /// 3. the subtotal must reach the minimum purchase
    ///    (`BelowMinimumPurchase`, message carries the minimum)
    /// 4. a capped coupon must have uses remaining (`UsageLimitExceeded`)
    ///
    /// On success returns the discount amount:
    /// - percentage: `subtotal * discount_value / 100`
    /// - fixed: `discount_value`, even when it exceeds the subtotal
    ///
    /// `current_uses` is only read here; atomically incrementing it under
    /// concurrent redemptions is owned by the storage layer.
    pub fn evaluate(
        coupon: &Coupon,
        subtotal: Decimal,
        now: NaiveDateTime,
    ) -> BookingResult<Decimal> {
        check_coupon_row(coupon)
            .map_err(|e| BookingError::InvalidInput(format!("coupon row: {}", e.code)))?;

        if !coupon.is_active {
            return Err(BookingError::InactiveCoupon);
        }

        let today = now.date();
        if today < coupon.valid_from || today > coupon.valid_until {
            return Err(BookingError::ExpiredOrNotYetValid);
        }

        if subtotal < coupon.min_purchase {
            return Err(BookingError::BelowMinimumPurchase {
                minimum: coupon.min_purchase,
            });
        }

        if let Some(max_uses) = coupon.max_uses {
            if coupon.current_uses >= max_uses {
                return Err(BookingError::UsageLimitExceeded);
            }
        }

        Ok(Self::discount_amount(coupon, subtotal))
    }

    /// Compute the raw discount for an already-validated coupon
    fn discount_amount(coupon: &Coupon, subtotal: Decimal) -> Decimal {
        match coupon.discount_type {
            DiscountType::Percentage => {
                subtotal * coupon.discount_value / Decimal::from(100)
            }
            DiscountType::Fixed => coupon.discount_value,
        }
    }
}
