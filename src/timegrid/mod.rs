// TimeGrid Builder
//
// Enumerates candidate time slots for a day and classifies each (barber,
// time) cell as available, booked, or blocked from already-fetched rows.
// Pure computation: the builder performs no I/O and applies no date
// filtering (rejecting past days is the lifecycle guard's job upstream).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{BookingError, BookingResult};
use crate::models::{Appointment, BlockedSlot, SlotStatus};

/// Working-hour bounds and slot granularity for a day grid
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GridConfig {
    /// First bookable hour of the day (slot at open_hour:00 is included)
    #[validate(range(max = 23))]
    pub open_hour: u32,
    /// Closing hour (slots stop strictly before close_hour:00)
    #[validate(range(min = 1, max = 24))]
    pub close_hour: u32,
    /// Slot granularity in minutes
    #[validate(range(min = 5, max = 240))]
    pub step_minutes: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 19,
            step_minutes: 30,
        }
    }
}

/// A single (barber, time) cell in a day's schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub barber_id: i32,
    pub time: NaiveTime,
    pub status: SlotStatus,
}

/// A full day's slot grid: one row per time, one column per barber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub barbers: Vec<i32>,
    pub times: Vec<NaiveTime>,
    pub rows: Vec<Vec<Slot>>,
}

impl DayGrid {
    /// Look up the cell for a barber at a given time, if it exists
    pub fn slot(&self, barber_id: i32, time: NaiveTime) -> Option<&Slot> {
        let row = self.times.iter().position(|t| *t == time)?;
        let col = self.barbers.iter().position(|b| *b == barber_id)?;
        self.rows.get(row)?.get(col)
    }
}

/// Builder for day-schedule slot grids
pub struct TimeGridBuilder;

impl TimeGridBuilder {
    /// Build the slot grid for one day
    ///
    /// Enumerates every `step_minutes` boundary in
    /// `[open_hour:00, close_hour:00)` and classifies each (barber, time)
    /// pair:
    /// - `booked` when an appointment exists at that exact barber, date,
    ///   and time with a slot-occupying status (pending, confirmed,
    ///   completed)
    /// - `blocked` when an explicit unavailability record matches the slot
    /// - `available` otherwise
    ///
    /// Booked takes precedence over blocked when both match.
    pub fn build_day_grid(
        barbers: &[i32],
        date: NaiveDate,
        appointments: &[Appointment],
        blocked: &[BlockedSlot],
        config: &GridConfig,
    ) -> BookingResult<DayGrid> {
        config.validate()?;
        if config.open_hour >= config.close_hour {
            return Err(BookingError::InvalidInput(format!(
                "open hour {} must be before close hour {}",
                config.open_hour, config.close_hour
            )));
        }

        let times = Self::enumerate_times(config)?;

        let rows = times
            .iter()
            .map(|&time| {
                barbers
                    .iter()
                    .map(|&barber_id| Slot {
                        barber_id,
                        time,
                        status: Self::classify(barber_id, date, time, appointments, blocked),
                    })
                    .collect()
            })
            .collect();

        Ok(DayGrid {
            date,
            barbers: barbers.to_vec(),
            times,
            rows,
        })
    }

    /// Enumerate slot boundaries within the working-hour window
    fn enumerate_times(config: &GridConfig) -> BookingResult<Vec<NaiveTime>> {
        let mut times = Vec::new();
        let mut minute_of_day = config.open_hour * 60;
        let close = config.close_hour * 60;

        while minute_of_day < close {
            let time = NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0)
                .ok_or_else(|| {
                    BookingError::InvalidInput(format!(
                        "slot boundary {} is not a valid time of day",
                        minute_of_day
                    ))
                })?;
            times.push(time);
            minute_of_day += config.step_minutes;
        }

        Ok(times)
    }

    /// Classify a single (barber, time) cell
    fn classify(
        barber_id: i32,
        date: NaiveDate,
        time: NaiveTime,
        appointments: &[Appointment],
        blocked: &[BlockedSlot],
    ) -> SlotStatus {
        let is_booked = appointments.iter().any(|appt| {
            appt.barber_id == barber_id
                && appt.appointment_date == date
                && appt.appointment_time == time
                && appt.status.occupies_slot()
        });
        if is_booked {
            return SlotStatus::Booked;
        }

        let is_blocked = blocked
            .iter()
            .any(|b| b.barber_id == barber_id && b.date == date && b.time == time);
        if is_blocked {
            return SlotStatus::Blocked;
        }

        SlotStatus::Available
    }
}
