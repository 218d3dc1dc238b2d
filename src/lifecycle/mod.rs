// Appointment Lifecycle Guard
//
// Decides whether a requested transition on an appointment is legal given
// its current status and its scheduled time versus "now". The guard only
// answers yes/no with a reason; persisting the transition (and doing so
// atomically, conditioned on the current status) is the caller's job, as
// is dispatching notifications or loyalty/usage triggers afterwards.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{BookingError, BookingResult};
use crate::models::{Appointment, AppointmentStatus};

/// Guard for appointment state transitions
pub struct LifecycleGuard;

impl LifecycleGuard {
    /// Check if a status transition is valid
    ///
    /// # Valid Transitions
    /// - Pending → Confirmed, Cancelled
    /// - Confirmed → Completed, Cancelled
    /// - Completed, Cancelled, NoShow → (terminal, no transitions)
    ///
    /// Marking an appointment no_show is an external resolution path, not
    /// a transition this guard grants.
    pub fn is_valid_transition(from: AppointmentStatus, to: AppointmentStatus) -> bool {
        match (from, to) {
            (AppointmentStatus::Pending, AppointmentStatus::Confirmed) => true,
            (AppointmentStatus::Pending, AppointmentStatus::Cancelled) => true,
            (AppointmentStatus::Confirmed, AppointmentStatus::Completed) => true,
            (AppointmentStatus::Confirmed, AppointmentStatus::Cancelled) => true,
            _ => false,
        }
    }

    /// Check that a new appointment may be created at the given date and
    /// time
    ///
    /// Booking at or before "now" is rejected: the earliest legal slot is
    /// strictly in the future.
    pub fn can_create(
        date: NaiveDate,
        time: NaiveTime,
        now: NaiveDateTime,
    ) -> BookingResult<()> {
        if date.and_time(time) <= now {
            return Err(BookingError::PastDateTime);
        }
        Ok(())
    }

    /// Check that an appointment may be cancelled
    ///
    /// Status checks win over timing: an already-cancelled or completed
    /// appointment reports its status regardless of its date. A past
    /// pending/confirmed appointment cannot be cancelled through this
    /// path; it must be resolved externally (e.g. marked no_show).
    pub fn can_cancel(appointment: &Appointment, now: NaiveDateTime) -> BookingResult<()> {
        Self::check_mutable(appointment, now)
    }

    /// Check that an appointment may be edited
    ///
    /// Same rules as cancellation: cancelled, completed, and past
    /// appointments are all immutable.
    pub fn can_edit(appointment: &Appointment, now: NaiveDateTime) -> BookingResult<()> {
        Self::check_mutable(appointment, now)
    }

    fn check_mutable(appointment: &Appointment, now: NaiveDateTime) -> BookingResult<()> {
        match appointment.status {
            AppointmentStatus::Cancelled => return Err(BookingError::AlreadyCancelled),
            AppointmentStatus::Completed => return Err(BookingError::AlreadyCompleted),
            _ => {}
        }

        if appointment.scheduled_at() < now {
            return Err(BookingError::PastAppointment);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn appointment(status: AppointmentStatus, scheduled: NaiveDateTime) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            customer_id: 1,
            barber_id: 1,
            appointment_date: scheduled.date(),
            appointment_time: scheduled.time(),
            status,
            total_price: dec!(35.00),
            discount_amount: Decimal::ZERO,
            final_price: dec!(35.00),
            coupon_id: None,
            notes: None,
        }
    }

    fn tomorrow_at_ten() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 17)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn yesterday_at_ten() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_valid_transitions() {
        assert!(LifecycleGuard::is_valid_transition(
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed
        ));
        assert!(LifecycleGuard::is_valid_transition(
            AppointmentStatus::Pending,
            AppointmentStatus::Cancelled
        ));
        assert!(LifecycleGuard::is_valid_transition(
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed
        ));
        assert!(LifecycleGuard::is_valid_transition(
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled
        ));
    }

    #[test]
    fn test_skip_transitions_rejected() {
        assert!(!LifecycleGuard::is_valid_transition(
            AppointmentStatus::Pending,
            AppointmentStatus::Completed
        ));
        assert!(!LifecycleGuard::is_valid_transition(
            AppointmentStatus::Pending,
            AppointmentStatus::NoShow
        ));
        assert!(!LifecycleGuard::is_valid_transition(
            AppointmentStatus::Confirmed,
            AppointmentStatus::Pending
        ));
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            for to in [
                AppointmentStatus::Pending,
                AppointmentStatus::Confirmed,
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ] {
                assert!(
                    !LifecycleGuard::is_valid_transition(terminal, to),
                    "{} -> {} should be rejected",
                    terminal,
                    to
                );
            }
        }
    }

    #[test]
    fn test_can_create_future_slot() {
        assert!(LifecycleGuard::can_create(
            tomorrow_at_ten().date(),
            tomorrow_at_ten().time(),
            now()
        )
        .is_ok());
    }

    #[test]
    fn test_can_create_rejects_past_date() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(
            LifecycleGuard::can_create(date, time, now()),
            Err(BookingError::PastDateTime)
        );
    }

    #[test]
    fn test_can_create_rejects_exact_now() {
        assert_eq!(
            LifecycleGuard::can_create(now().date(), now().time(), now()),
            Err(BookingError::PastDateTime)
        );
    }

    #[test]
    fn test_can_create_rejects_earlier_today() {
        let earlier = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(
            LifecycleGuard::can_create(now().date(), earlier, now()),
            Err(BookingError::PastDateTime)
        );
    }

    #[test]
    fn test_cancel_future_pending() {
        let appt = appointment(AppointmentStatus::Pending, tomorrow_at_ten());
        assert!(LifecycleGuard::can_cancel(&appt, now()).is_ok());
    }

    #[test]
    fn test_cancel_future_confirmed() {
        let appt = appointment(AppointmentStatus::Confirmed, tomorrow_at_ten());
        assert!(LifecycleGuard::can_cancel(&appt, now()).is_ok());
    }

    #[test]
    fn test_cancel_already_cancelled() {
        let appt = appointment(AppointmentStatus::Cancelled, tomorrow_at_ten());
        assert_eq!(
            LifecycleGuard::can_cancel(&appt, now()),
            Err(BookingError::AlreadyCancelled)
        );
    }

    #[test]
    fn test_cancel_already_cancelled_in_the_past() {
        // The status check wins regardless of the appointment's date
        let appt = appointment(AppointmentStatus::Cancelled, yesterday_at_ten());
        assert_eq!(
            LifecycleGuard::can_cancel(&appt, now()),
            Err(BookingError::AlreadyCancelled)
        );
    }

    #[test]
    fn test_cancel_already_completed() {
        let appt = appointment(AppointmentStatus::Completed, yesterday_at_ten());
        assert_eq!(
            LifecycleGuard::can_cancel(&appt, now()),
            Err(BookingError::AlreadyCompleted)
        );
    }

    #[test]
    fn test_cancel_past_pending() {
        let appt = appointment(AppointmentStatus::Pending, yesterday_at_ten());
        assert_eq!(
            LifecycleGuard::can_cancel(&appt, now()),
            Err(BookingError::PastAppointment)
        );
    }

    #[test]
    fn test_cancel_at_exact_scheduled_time_is_allowed() {
        // The past check is strict: an appointment at exactly "now" is
        // still actionable
        let appt = appointment(AppointmentStatus::Confirmed, now());
        assert!(LifecycleGuard::can_cancel(&appt, now()).is_ok());
    }

    #[test]
    fn test_edit_mirrors_cancel_rules() {
        let future = appointment(AppointmentStatus::Pending, tomorrow_at_ten());
        assert!(LifecycleGuard::can_edit(&future, now()).is_ok());

        let cancelled = appointment(AppointmentStatus::Cancelled, tomorrow_at_ten());
        assert_eq!(
            LifecycleGuard::can_edit(&cancelled, now()),
            Err(BookingError::AlreadyCancelled)
        );

        let completed = appointment(AppointmentStatus::Completed, tomorrow_at_ten());
        assert_eq!(
            LifecycleGuard::can_edit(&completed, now()),
            Err(BookingError::AlreadyCompleted)
        );

        let past = appointment(AppointmentStatus::Confirmed, yesterday_at_ten());
        assert_eq!(
            LifecycleGuard::can_edit(&past, now()),
            Err(BookingError::PastAppointment)
        );
    }
}
