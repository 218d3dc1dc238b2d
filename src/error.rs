// Error types for the booking computation core
//
// Every expected business condition is returned as a tagged error kind,
// never raised as a panic. Only malformed input shapes map to InvalidInput.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Main error type for the booking computation core
///
/// Each variant is a stable, testable error kind. Coupon evaluation,
/// pricing, and lifecycle decisions all report failures through this enum;
/// mapping a kind to user-visible text or an HTTP status is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingError {
    /// Coupon exists but has been deactivated
    #[error("This coupon is not active")]
    InactiveCoupon,

    /// The current date falls outside the coupon's validity window
    #[error("This coupon is expired or not yet valid")]
    ExpiredOrNotYetValid,

    /// Purchase subtotal is below the coupon's minimum
    /// The message carries the required minimum formatted to 2 decimals
    #[error("A minimum purchase of {minimum:.2} is required to use this coupon")]
    BelowMinimumPurchase { minimum: Decimal },

    /// The coupon's usage cap has been reached
    #[error("This coupon has reached its usage limit")]
    UsageLimitExceeded,

    /// Attempt to create an appointment at or before the current moment
    #[error("Cannot book an appointment in the past")]
    PastDateTime,

    /// Attempt to cancel or edit an appointment that is already cancelled
    #[error("This appointment has already been cancelled")]
    AlreadyCancelled,

    /// Attempt to cancel or edit an appointment that is already completed
    #[error("This appointment has already been completed")]
    AlreadyCompleted,

    /// Attempt to cancel or edit an appointment whose time has passed
    /// A past pending/confirmed appointment must be resolved externally
    /// (e.g. marked no_show), not through cancel/edit
    #[error("This appointment's scheduled time has already passed")]
    PastAppointment,

    /// Pricing was requested for an empty service selection
    #[error("No services selected")]
    NoServicesSelected,

    /// Input rows or parameters had a malformed shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for booking computations
pub type BookingResult<T> = Result<T, BookingError>;

impl From<validator::ValidationErrors> for BookingError {
    fn from(err: validator::ValidationErrors) -> Self {
        BookingError::InvalidInput(err.to_string())
    }
}
