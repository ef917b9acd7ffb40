use serde::{Deserialize, Serialize};

// Request body for the single-day availability check.
// Required fields are validated in the handler so that missing values
// produce a 400 with the API's error body instead of a deserialize rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

// Query parameters for the multi-day range view
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeAvailabilityParams {
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

// Response for the single-day check; the variant depends on whether the
// staff member works that day and whether a specific time was requested
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AvailabilityResponse {
    // No schedule row for the requested weekday; no slots are computed
    #[serde(rename_all = "camelCase")]
    StaffUnavailable { available: bool, reason: String },
    // Verdict for one requested start time, with alternatives attached
    #[serde(rename_all = "camelCase")]
    Verdict {
        available: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        available_slots: Vec<String>,
    },
    // Open-slot overview when no specific time was requested
    #[serde(rename_all = "camelCase")]
    Overview {
        available: bool,
        available_slots: Vec<String>,
        next_available: Option<String>,
    },
}

// Working hours echoed in the range view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

// A booked interval echoed in the range view, as stored
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedSlot {
    pub start: String,
    pub end: String,
}

// One calendar day in the range view. This is a presentation view: booked
// slots are echoed without any grid or overlap computation.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DayAvailability {
    #[serde(rename_all = "camelCase")]
    Off { available: bool, reason: String },
    #[serde(rename_all = "camelCase")]
    Working {
        available: bool,
        working_hours: WorkingHours,
        booked_slots: Vec<BookedSlot>,
    },
}
