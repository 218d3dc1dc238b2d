// Booking Engine - Orchestrator
//
// Single entry point wiring the grid builder, pricing aggregator,
// recommendation scorer, and lifecycle guard together for host
// applications, with tracing around each computation. Stateless: every
// call receives its rows and its clock explicitly.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::coupons::CouponEvaluator;
use crate::error::BookingResult;
use crate::lifecycle::LifecycleGuard;
use crate::models::{Appointment, Barber, BlockedSlot, Coupon, Service};
use crate::pricing::{PriceQuote, PricingAggregator};
use crate::recommendations::{CompletedVisit, RecommendationScorer, RecommendationSet};
use crate::timegrid::{DayGrid, GridConfig, TimeGridBuilder};
use rust_decimal::Decimal;

/// Booking Engine
///
/// Thin facade over the computation modules. All methods are pure and
/// synchronous; persistence of any resulting decision stays with the
/// caller.
pub struct BookingEngine;

impl BookingEngine {
    /// Build the slot grid for a day
    pub fn day_grid(
        barbers: &[i32],
        date: NaiveDate,
        appointments: &[Appointment],
        blocked: &[BlockedSlot],
        config: &GridConfig,
    ) -> BookingResult<DayGrid> {
        tracing::debug!(
            %date,
            barbers = barbers.len(),
            appointments = appointments.len(),
            blocked = blocked.len(),
            "building day grid"
        );
        let grid = TimeGridBuilder::build_day_grid(barbers, date, appointments, blocked, config)?;
        tracing::debug!(rows = grid.times.len(), "day grid built");
        Ok(grid)
    }

    /// Quote a service selection, optionally applying a coupon
    pub fn quote(
        services: &[Service],
        coupon: Option<&Coupon>,
        now: NaiveDateTime,
    ) -> BookingResult<PriceQuote> {
        let quote = PricingAggregator::compute_totals(services, coupon, now)?;
        if let Some(rejection) = &quote.coupon_rejection {
            tracing::debug!(%rejection, "coupon rejected, quoting without discount");
        }
        tracing::debug!(
            subtotal = %quote.subtotal,
            discount = %quote.discount,
            final_price = %quote.final_price,
            "quote computed"
        );
        Ok(quote)
    }

    /// Evaluate a coupon on its own, e.g. for an "apply code" field
    pub fn evaluate_coupon(
        coupon: &Coupon,
        subtotal: Decimal,
        now: NaiveDateTime,
    ) -> BookingResult<Decimal> {
        CouponEvaluator::evaluate(coupon, subtotal, now)
    }

    /// Score personalized recommendations for a customer
    pub fn recommendations(
        history: &[CompletedVisit],
        popular_barbers: &[Barber],
        popular_services: &[Service],
        now: NaiveDate,
    ) -> RecommendationSet {
        let set = RecommendationScorer::score(history, popular_barbers, popular_services, now);
        tracing::debug!(
            history = history.len(),
            barbers = set.barbers.len(),
            services = set.services.len(),
            "recommendations scored"
        );
        set
    }

    /// Authorize creating an appointment at the given slot
    pub fn authorize_create(
        date: NaiveDate,
        time: NaiveTime,
        now: NaiveDateTime,
    ) -> BookingResult<()> {
        LifecycleGuard::can_create(date, time, now)
    }

    /// Authorize cancelling an appointment
    ///
    /// The caller must persist the transition atomically, conditioned on
    /// the status this decision was made against.
    pub fn authorize_cancel(appointment: &Appointment, now: NaiveDateTime) -> BookingResult<()> {
        let decision = LifecycleGuard::can_cancel(appointment, now);
        if let Err(reason) = &decision {
            tracing::debug!(appointment = %appointment.id, %reason, "cancel refused");
        }
        decision
    }

    /// Authorize editing an appointment
    pub fn authorize_edit(appointment: &Appointment, now: NaiveDateTime) -> BookingResult<()> {
        let decision = LifecycleGuard::can_edit(appointment, now);
        if let Err(reason) = &decision {
            tracing::debug!(appointment = %appointment.id, %reason, "edit refused");
        }
        decision
    }
}
