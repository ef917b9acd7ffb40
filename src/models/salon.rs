use serde::{Deserialize, Serialize};

// A bookable salon service; duration_minutes is nullable in the schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: Option<i32>,
}

// One working-hours row per staff member per weekday (0 = Sunday).
// Absence of a row means the staff member does not work that day.
// The break window is optional and only excludes slots when both bounds are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDaySchedule {
    pub staff_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub break_start: Option<String>,
    #[serde(default)]
    pub break_end: Option<String>,
}

// Lifecycle status of a booked appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

// An existing booking; only non-cancelled rows participate in conflict checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub staff_id: String,
    pub appointment_date: chrono::NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: AppointmentStatus,
}
