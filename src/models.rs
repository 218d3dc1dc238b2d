// Data contracts for the booking computation core
//
// These structs mirror the rows the host application fetches from storage
// (services, barbers, customers, appointments, coupons) plus the derived
// slot types. The core never runs queries itself; it only consumes rows.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Appointment status enum representing the lifecycle of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            _ => Err(format!("Invalid appointment status: {}", s)),
        }
    }

    /// Whether an appointment in this status occupies its time slot
    ///
    /// Cancelled and no-show appointments free the slot; everything else
    /// keeps it taken.
    pub fn occupies_slot(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Pending
                | AppointmentStatus::Confirmed
                | AppointmentStatus::Completed
        )
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Pending
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single (barber, time) cell in a day grid
///
/// Exactly one status holds per cell; the grid builder guarantees this
/// by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Slot is open for booking
    Available,
    /// An appointment already occupies this slot
    Booked,
    /// The barber is explicitly unavailable for this slot
    Blocked,
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotStatus::Available => write!(f, "available"),
            SlotStatus::Booked => write!(f, "booked"),
            SlotStatus::Blocked => write!(f, "blocked"),
        }
    }
}

/// Type of discount a coupon applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Discount is a percentage of the subtotal (e.g., 10 = 10% off)
    Percentage,
    /// Discount is a fixed amount subtracted from the subtotal
    Fixed,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

/// A bookable service on the shop's menu
///
/// Prices here are the current menu prices; once a service is booked its
/// price is snapshotted into `AppointmentService` and never re-read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub duration_minutes: i32,
    pub price: Decimal,
    pub category: String,
    pub is_active: bool,
}

/// A barber on staff
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Barber {
    pub id: i32,
    pub name: String,
    pub is_active: bool,
    /// Display-only aggregate, maintained externally
    pub rating: Option<f64>,
    pub review_count: i32,
}

/// A registered customer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Accrued by a completion trigger external to this core
    pub loyalty_points: i32,
}

/// An appointment row
///
/// Appointments are never physically deleted; cancellation is a status
/// change. Pricing fields uphold
/// `final_price = total_price - discount_amount` with a non-negative
/// discount.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub customer_id: i32,
    pub barber_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub total_price: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
    pub coupon_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl Appointment {
    /// Combined calendar date and time-of-day of the appointment
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.appointment_date.and_time(self.appointment_time)
    }

    /// Check the pricing invariant on this row
    ///
    /// Returns false for rows where the stored prices disagree
    /// (`final_price != total_price - discount_amount`) or where the
    /// discount is negative.
    pub fn pricing_is_consistent(&self) -> bool {
        self.discount_amount >= Decimal::ZERO
            && self.final_price == self.total_price - self.discount_amount
    }
}

/// A service line item attached to an appointment
///
/// `price` is a snapshot taken at booking time. Menu prices may change
/// afterwards, so this value must never be re-read from `Service`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppointmentService {
    pub appointment_id: Uuid,
    pub service_id: i32,
    pub price: Decimal,
}

/// A discount coupon
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Coupon {
    pub id: Uuid,
    /// Stored upper-cased; matching is case-insensitive
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_purchase: Decimal,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    /// None = unlimited uses
    pub max_uses: Option<i32>,
    /// Monotonic counter owned by an external usage trigger
    pub current_uses: i32,
    pub is_active: bool,
}

impl Coupon {
    /// Case-insensitive code comparison
    pub fn matches_code(&self, code: &str) -> bool {
        self.code == normalize_code(code)
    }
}

/// Normalize a user-entered coupon code for lookup and storage
///
/// Codes are case-insensitive and always stored upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// An explicit unavailability record for a barber's time slot
///
/// Maintained externally (breaks, days off); the grid builder treats a
/// matching record as a blocked cell.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlockedSlot {
    pub barber_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_appointment_status_as_str() {
        assert_eq!(AppointmentStatus::Pending.as_str(), "pending");
        assert_eq!(AppointmentStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(AppointmentStatus::Completed.as_str(), "completed");
        assert_eq!(AppointmentStatus::Cancelled.as_str(), "cancelled");
        assert_eq!(AppointmentStatus::NoShow.as_str(), "no_show");
    }

    #[test]
    fn test_appointment_status_from_str() {
        assert_eq!(
            AppointmentStatus::from_str("pending").unwrap(),
            AppointmentStatus::Pending
        );
        assert_eq!(
            AppointmentStatus::from_str("NO_SHOW").unwrap(),
            AppointmentStatus::NoShow
        );
        assert!(AppointmentStatus::from_str("scheduled").is_err());
    }

    #[test]
    fn test_appointment_status_default() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Pending);
    }

    #[test]
    fn test_occupies_slot() {
        assert!(AppointmentStatus::Pending.occupies_slot());
        assert!(AppointmentStatus::Confirmed.occupies_slot());
        assert!(AppointmentStatus::Completed.occupies_slot());
        assert!(!AppointmentStatus::Cancelled.occupies_slot());
        assert!(!AppointmentStatus::NoShow.occupies_slot());
    }

    #[test]
    fn test_slot_status_display() {
        assert_eq!(SlotStatus::Available.to_string(), "available");
        assert_eq!(SlotStatus::Booked.to_string(), "booked");
        assert_eq!(SlotStatus::Blocked.to_string(), "blocked");
    }

    #[test]
    fn test_discount_type_display() {
        assert_eq!(DiscountType::Percentage.to_string(), "percentage");
        assert_eq!(DiscountType::Fixed.to_string(), "fixed");
    }

    #[test]
    fn test_serialization() {
        let status = AppointmentStatus::NoShow;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"no_show\"");

        let slot = SlotStatus::Booked;
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "\"booked\"");

        let discount: DiscountType = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(discount, DiscountType::Percentage);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("welcome10"), "WELCOME10");
        assert_eq!(normalize_code("  Promo5 "), "PROMO5");
        assert_eq!(normalize_code("SAVE20"), "SAVE20");
    }

    #[test]
    fn test_coupon_matches_code() {
        let coupon = Coupon {
            id: Uuid::new_v4(),
            code: "WELCOME10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: dec!(10),
            min_purchase: Decimal::ZERO,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            max_uses: None,
            current_uses: 0,
            is_active: true,
        };

        assert!(coupon.matches_code("welcome10"));
        assert!(coupon.matches_code(" Welcome10 "));
        assert!(!coupon.matches_code("welcome20"));
    }

    #[test]
    fn test_scheduled_at_combines_date_and_time() {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            customer_id: 1,
            barber_id: 2,
            appointment_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            appointment_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            status: AppointmentStatus::Confirmed,
            total_price: dec!(50.00),
            discount_amount: dec!(5.00),
            final_price: dec!(45.00),
            coupon_id: None,
            notes: None,
        };

        let expected = NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(appointment.scheduled_at(), expected);
    }

    #[test]
    fn test_pricing_consistency_check() {
        let mut appointment = Appointment {
            id: Uuid::new_v4(),
            customer_id: 1,
            barber_id: 1,
            appointment_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            appointment_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            total_price: dec!(60.00),
            discount_amount: dec!(6.00),
            final_price: dec!(54.00),
            coupon_id: None,
            notes: None,
        };
        assert!(appointment.pricing_is_consistent());

        appointment.final_price = dec!(55.00);
        assert!(!appointment.pricing_is_consistent());

        appointment.final_price = dec!(66.00);
        appointment.discount_amount = dec!(-6.00);
        assert!(!appointment.pricing_is_consistent());
    }
}
