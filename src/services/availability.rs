use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::models::salon::{Appointment, StaffDaySchedule};

/// Candidate slot starts step a fixed 30 minutes regardless of the service
/// being booked; changing this changes every externally visible slot list.
pub const SLOT_STEP_MINUTES: i32 = 30;

/// Applied when a service row has no duration recorded.
pub const DEFAULT_SERVICE_DURATION_MINUTES: i32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid clock time {0:?}, expected HH:MM")]
pub struct InvalidClockTime(pub String);

/// Parse a wall-clock "HH:MM" string to minutes since midnight.
///
/// Stored `time` columns may carry a seconds component ("09:00:00");
/// it is accepted and ignored. No timezone conversion is performed,
/// stored times are already in the salon's local convention.
pub fn parse_clock_time(value: &str) -> Result<i32, InvalidClockTime> {
    let mut parts = value.split(':');
    let hour = parts
        .next()
        .and_then(|h| h.parse::<i32>().ok())
        .filter(|h| (0..24).contains(h));
    let minute = parts
        .next()
        .and_then(|m| m.parse::<i32>().ok())
        .filter(|m| (0..60).contains(m));

    match (hour, minute) {
        (Some(hour), Some(minute)) => Ok(hour * 60 + minute),
        _ => Err(InvalidClockTime(value.to_string())),
    }
}

/// Format minutes since midnight back to a zero-padded "HH:MM" string.
pub fn format_clock_time(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Weekday index for a calendar date, Sunday-based (0-6) to match the
/// `day_of_week` column on staff schedules.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

// Half-open interval overlap: [start, end) intersects [other_start, other_end)
fn overlaps(start: i32, end: i32, other_start: i32, other_end: i32) -> bool {
    start < other_end && end > other_start
}

/// One staff member's working day in minutes since midnight, with an
/// optional break window during which no slot may start or run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingDay {
    pub start: i32,
    pub end: i32,
    pub break_window: Option<(i32, i32)>,
}

impl WorkingDay {
    /// Parse a schedule row. The break window only takes effect when both
    /// bounds are present on the row.
    pub fn from_schedule(schedule: &StaffDaySchedule) -> Result<Self, InvalidClockTime> {
        let start = parse_clock_time(&schedule.start_time)?;
        let end = parse_clock_time(&schedule.end_time)?;

        let break_window = match (&schedule.break_start, &schedule.break_end) {
            (Some(break_start), Some(break_end)) => {
                Some((parse_clock_time(break_start)?, parse_clock_time(break_end)?))
            }
            _ => None,
        };

        Ok(Self {
            start,
            end,
            break_window,
        })
    }

    fn in_break(&self, start: i32, end: i32) -> bool {
        match self.break_window {
            Some((break_start, break_end)) => overlaps(start, end, break_start, break_end),
            None => false,
        }
    }
}

/// A booked interval in minutes since midnight, half-open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub start: i32,
    pub end: i32,
}

/// Parse appointment rows into booked intervals. Callers are expected to
/// have already excluded cancelled appointments at the store.
pub fn booked_intervals(appointments: &[Appointment]) -> Result<Vec<BookedInterval>, InvalidClockTime> {
    appointments
        .iter()
        .map(|appointment| {
            Ok(BookedInterval {
                start: parse_clock_time(&appointment.start_time)?,
                end: parse_clock_time(&appointment.end_time)?,
            })
        })
        .collect()
}

/// Compute the open slot starts for one working day.
///
/// Candidates run from the start of the working day to the last start that
/// still fits the service before closing, stepping [`SLOT_STEP_MINUTES`].
/// A candidate is dropped when its interval intersects the break window or
/// any booked interval. The loop order keeps the result sorted.
pub fn open_slots(day: &WorkingDay, duration: i32, booked: &[BookedInterval]) -> Vec<String> {
    let mut slots = Vec::new();

    let mut minutes = day.start;
    while minutes + duration <= day.end {
        let slot_end = minutes + duration;

        let blocked = day.in_break(minutes, slot_end)
            || booked
                .iter()
                .any(|interval| overlaps(minutes, slot_end, interval.start, interval.end));

        if !blocked {
            slots.push(format_clock_time(minutes));
        }

        minutes += SLOT_STEP_MINUTES;
    }

    slots
}

/// Verdict for one requested start time. Returns the rejection reason, or
/// `None` when the slot is bookable.
///
/// Checks run in order and short-circuit: working hours (a start exactly at
/// `end - duration` is accepted), then the break window, then conflicts
/// with booked intervals.
pub fn requested_time_conflict(
    day: &WorkingDay,
    duration: i32,
    booked: &[BookedInterval],
    requested: i32,
) -> Option<&'static str> {
    let requested_end = requested + duration;

    if requested < day.start || requested_end > day.end {
        return Some("Outside working hours");
    }

    if day.in_break(requested, requested_end) {
        return Some("Conflicts with break time");
    }

    if booked
        .iter()
        .any(|interval| overlaps(requested, requested_end, interval.start, interval.end))
    {
        return Some("Time slot already booked");
    }

    None
}
