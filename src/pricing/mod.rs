// Pricing Aggregator
//
// Sums selected service prices and durations, folds in the coupon
// evaluator's discount, and produces the quote the booking flow persists.
// An invalid coupon degrades to a zero discount rather than failing the
// quote; the rejection kind is kept so callers can explain it.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::coupons::CouponEvaluator;
use crate::error::{BookingError, BookingResult};
use crate::models::{Coupon, Service};
use crate::validation::check_service_row;

/// Price quote for a selection of services
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub final_price: Decimal,
    pub total_duration_minutes: i32,
    /// Why the supplied coupon was rejected, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_rejection: Option<BookingError>,
}

/// Aggregator for booking price quotes
pub struct PricingAggregator;

impl PricingAggregator {
    /// Compute subtotal, discount, and final price for selected services
    ///
    /// - `subtotal` is the sum of service prices, `total_duration_minutes`
    ///   the sum of durations
    /// - a supplied coupon is evaluated against the subtotal; when invalid
    ///   the discount is zero and the rejection kind is recorded on the
    ///   quote
    /// - a valid discount is clamped to the subtotal, so the final price
    ///   never goes negative
    ///
    /// An empty selection is a caller error (`NoServicesSelected`).
    pub fn compute_totals(
        services: &[Service],
        coupon: Option<&Coupon>,
        now: NaiveDateTime,
    ) -> BookingResult<PriceQuote> {
        if services.is_empty() {
            return Err(BookingError::NoServicesSelected);
        }

        for service in services {
            check_service_row(service).map_err(|e| {
                BookingError::InvalidInput(format!("service {}: {}", service.id, e.code))
            })?;
        }

        let subtotal: Decimal = services.iter().map(|s| s.price).sum();
        let total_duration_minutes: i32 = services.iter().map(|s| s.duration_minutes).sum();

        let (discount, coupon_rejection) = match coupon {
            None => (Decimal::ZERO, None),
            Some(coupon) => match CouponEvaluator::evaluate(coupon, subtotal, now) {
                // Clamp so a fixed discount larger than the subtotal
                // cannot push the final price below zero
                Ok(discount) => (discount.min(subtotal), None),
                Err(rejection) => (Decimal::ZERO, Some(rejection)),
            },
        };

        Ok(PriceQuote {
            subtotal,
            discount,
            final_price: subtotal - discount,
            total_duration_minutes,
            coupon_rejection,
        })
    }
}
