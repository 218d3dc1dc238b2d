// Booking computation core for a barbershop scheduling platform
//
// Five pure capabilities over rows the host application fetches:
// - timegrid: enumerate and classify a day's slots per barber
// - coupons: validate a coupon and compute its discount
// - pricing: aggregate service prices/durations into a quote
// - recommendations: score personalized barber/service suggestions
// - lifecycle: gate appointment state transitions against status and time
//
// Storage, HTTP, auth, and notification delivery live outside this crate;
// every function takes its data and its clock as explicit parameters.

pub mod coupons;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod pricing;
pub mod recommendations;
pub mod timegrid;
pub mod validation;


// Re-export commonly used types for convenience
pub use coupons::CouponEvaluator;
pub use engine::BookingEngine;
pub use error::{BookingError, BookingResult};
pub use lifecycle::LifecycleGuard;
pub use models::{
    normalize_code, Appointment, AppointmentService, AppointmentStatus, Barber, BlockedSlot,
    Coupon, Customer, DiscountType, Service, SlotStatus,
};
pub use pricing::{PriceQuote, PricingAggregator};
pub use recommendations::{
    BarberRecommendation, CompletedVisit, RecommendationScorer, RecommendationSet,
    ServiceRecommendation, VisitService,
};
pub use timegrid::{DayGrid, GridConfig, Slot, TimeGridBuilder};
