use axum::{
    extract::{Json as ExtractJson, Query, State},
    response::Json,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::AppError;
use crate::models::availability::{
    AvailabilityResponse, BookedSlot, CheckAvailabilityRequest, DayAvailability,
    RangeAvailabilityParams, WorkingHours,
};
use crate::models::salon::StaffDaySchedule;
use crate::services::availability::{
    booked_intervals, day_of_week, open_slots, parse_clock_time, requested_time_conflict,
    WorkingDay, DEFAULT_SERVICE_DURATION_MINUTES,
};
use crate::store::{BookingStore, StoreError};

// AppState struct containing shared resources
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", value)))
}

fn check_failure(context: &str, err: StoreError) -> AppError {
    error!("{}: {}", context, err);
    AppError::Internal("Failed to check availability".to_string())
}

// Single-day availability check endpoint
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<CheckAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let (staff_id, date, service_id) = match (&request.staff_id, &request.date, &request.service_id) {
        (Some(staff_id), Some(date), Some(service_id))
            if !staff_id.is_empty() && !date.is_empty() && !service_id.is_empty() =>
        {
            (staff_id, date, service_id)
        }
        _ => {
            return Err(AppError::BadRequest(
                "staffId, date and serviceId are required".to_string(),
            ))
        }
    };

    info!(
        "Checking availability for staff {} on {} (service {})",
        staff_id, date, service_id
    );

    let date = parse_date(date)?;

    // Validate the requested time up front; a malformed value is a client
    // error, not a business rejection
    let requested = match &request.time {
        Some(time) => Some(
            parse_clock_time(time)
                .map_err(|_| AppError::BadRequest(format!("Invalid time: {}", time)))?,
        ),
        None => None,
    };

    let service = state
        .store
        .get_service(service_id)
        .await
        .map_err(|err| check_failure("Failed to load service", err))?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

    let duration = service
        .duration_minutes
        .unwrap_or(DEFAULT_SERVICE_DURATION_MINUTES);

    let schedule = state
        .store
        .get_staff_schedule(staff_id, day_of_week(date))
        .await
        .map_err(|err| check_failure("Failed to load staff schedule", err))?;

    let Some(schedule) = schedule else {
        info!("Staff {} has no schedule on {}", staff_id, date);
        return Ok(Json(AvailabilityResponse::StaffUnavailable {
            available: false,
            reason: "Staff not available on this day".to_string(),
        }));
    };

    let day = WorkingDay::from_schedule(&schedule).map_err(|err| {
        error!("Unparseable schedule for staff {}: {}", staff_id, err);
        AppError::Internal("Failed to check availability".to_string())
    })?;

    let appointments = state
        .store
        .list_appointments(staff_id, date)
        .await
        .map_err(|err| check_failure("Failed to load appointments", err))?;

    let booked = booked_intervals(&appointments).map_err(|err| {
        error!("Unparseable appointment time for staff {}: {}", staff_id, err);
        AppError::Internal("Failed to check availability".to_string())
    })?;

    let slots = open_slots(&day, duration, &booked);
    info!(
        "Computed {} open slots for staff {} on {}",
        slots.len(),
        staff_id,
        date
    );

    let response = match requested {
        Some(requested) => {
            let conflict = requested_time_conflict(&day, duration, &booked, requested);
            AvailabilityResponse::Verdict {
                available: conflict.is_none(),
                reason: conflict.map(str::to_string),
                available_slots: slots,
            }
        }
        None => AvailabilityResponse::Overview {
            available: !slots.is_empty(),
            next_available: slots.first().cloned(),
            available_slots: slots,
        },
    };

    Ok(Json(response))
}

// Multi-day availability range endpoint. This is a presentation view: it
// reports working hours and echoes booked intervals per day without
// running the slot-grid computation.
pub async fn availability_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeAvailabilityParams>,
) -> Result<Json<BTreeMap<String, DayAvailability>>, AppError> {
    let (staff_id, start_date, end_date) =
        match (&params.staff_id, &params.start_date, &params.end_date) {
            (Some(staff_id), Some(start_date), Some(end_date))
                if !staff_id.is_empty() && !start_date.is_empty() && !end_date.is_empty() =>
            {
                (staff_id, start_date, end_date)
            }
            _ => {
                return Err(AppError::BadRequest(
                    "staffId, startDate and endDate are required".to_string(),
                ))
            }
        };

    info!(
        "Fetching availability range for staff {} from {} to {}",
        staff_id, start_date, end_date
    );

    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    let schedules = state
        .store
        .list_staff_schedules(staff_id)
        .await
        .map_err(|err| {
            error!("Failed to load staff schedules: {}", err);
            AppError::Internal("Failed to fetch availability".to_string())
        })?;

    let by_weekday: HashMap<u8, &StaffDaySchedule> = schedules
        .iter()
        .map(|schedule| (schedule.day_of_week, schedule))
        .collect();

    let appointments = state
        .store
        .list_appointments_between(staff_id, start, end)
        .await
        .map_err(|err| {
            error!("Failed to load appointments: {}", err);
            AppError::Internal("Failed to fetch availability".to_string())
        })?;

    let mut booked_by_date: HashMap<NaiveDate, Vec<BookedSlot>> = HashMap::new();
    for appointment in &appointments {
        booked_by_date
            .entry(appointment.appointment_date)
            .or_default()
            .push(BookedSlot {
                start: appointment.start_time.clone(),
                end: appointment.end_time.clone(),
            });
    }

    let mut days = BTreeMap::new();
    let mut date = start;
    while date <= end {
        let entry = match by_weekday.get(&day_of_week(date)) {
            Some(schedule) => DayAvailability::Working {
                available: true,
                working_hours: WorkingHours {
                    start: schedule.start_time.clone(),
                    end: schedule.end_time.clone(),
                },
                booked_slots: booked_by_date.remove(&date).unwrap_or_default(),
            },
            None => DayAvailability::Off {
                available: false,
                reason: "Staff not working".to_string(),
            },
        };

        days.insert(date.format("%Y-%m-%d").to_string(), entry);

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    Ok(Json(days))
}
