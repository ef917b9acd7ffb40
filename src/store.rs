use async_trait::async_trait;
use chrono::NaiveDate;
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::env;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::salon::{Appointment, Service, StaffDaySchedule};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("data api returned status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

/// Read-only access to the booking data. The availability service never
/// writes through this interface; appointment creation lives elsewhere in
/// the platform.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_service(&self, service_id: &str) -> Result<Option<Service>, StoreError>;

    /// The working-hours row for one weekday (0 = Sunday), or `None` when
    /// the staff member does not work that day.
    async fn get_staff_schedule(
        &self,
        staff_id: &str,
        day_of_week: u8,
    ) -> Result<Option<StaffDaySchedule>, StoreError>;

    async fn list_staff_schedules(&self, staff_id: &str) -> Result<Vec<StaffDaySchedule>, StoreError>;

    /// Non-cancelled appointments for one staff member on one date.
    async fn list_appointments(
        &self,
        staff_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// Non-cancelled appointments for one staff member across an inclusive
    /// date range.
    async fn list_appointments_between(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError>;
}

/// Client for the hosted Postgres data API (PostgREST-style REST interface)
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    /// Create a new store client from environment variables
    pub fn from_env() -> Self {
        dotenv().ok();

        Self::new(
            env::var("SUPABASE_URL").expect("SUPABASE_URL must be set in environment"),
            env::var("SUPABASE_SERVICE_ROLE_KEY")
                .expect("SUPABASE_SERVICE_ROLE_KEY must be set in environment"),
        )
    }

    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    // All reads go through the same GET shape: a table, a filter list, and
    // a JSON array of rows back
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table);
        debug!("Fetching rows from {} with {} filters", url, query.len());

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::UnexpectedStatus { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl BookingStore for SupabaseStore {
    async fn get_service(&self, service_id: &str) -> Result<Option<Service>, StoreError> {
        info!("Looking up service {}", service_id);

        let mut rows: Vec<Service> = self
            .fetch_rows(
                "services",
                &[
                    ("id", format!("eq.{}", service_id)),
                    ("select", "id,name,duration_minutes".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.pop())
    }

    async fn get_staff_schedule(
        &self,
        staff_id: &str,
        day_of_week: u8,
    ) -> Result<Option<StaffDaySchedule>, StoreError> {
        info!("Looking up schedule for staff {} on weekday {}", staff_id, day_of_week);

        let mut rows: Vec<StaffDaySchedule> = self
            .fetch_rows(
                "staff_schedules",
                &[
                    ("staff_id", format!("eq.{}", staff_id)),
                    ("day_of_week", format!("eq.{}", day_of_week)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.pop())
    }

    async fn list_staff_schedules(&self, staff_id: &str) -> Result<Vec<StaffDaySchedule>, StoreError> {
        info!("Listing weekly schedule for staff {}", staff_id);

        self.fetch_rows(
            "staff_schedules",
            &[
                ("staff_id", format!("eq.{}", staff_id)),
                ("order", "day_of_week.asc".to_string()),
            ],
        )
        .await
    }

    async fn list_appointments(
        &self,
        staff_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError> {
        info!("Listing appointments for staff {} on {}", staff_id, date);

        self.fetch_rows(
            "appointments",
            &[
                ("staff_id", format!("eq.{}", staff_id)),
                ("appointment_date", format!("eq.{}", date.format("%Y-%m-%d"))),
                ("status", "neq.cancelled".to_string()),
                ("order", "start_time.asc".to_string()),
            ],
        )
        .await
    }

    async fn list_appointments_between(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError> {
        info!(
            "Listing appointments for staff {} between {} and {}",
            staff_id, start, end
        );

        self.fetch_rows(
            "appointments",
            &[
                ("staff_id", format!("eq.{}", staff_id)),
                ("appointment_date", format!("gte.{}", start.format("%Y-%m-%d"))),
                ("appointment_date", format!("lte.{}", end.format("%Y-%m-%d"))),
                ("status", "neq.cancelled".to_string()),
                ("order", "appointment_date.asc,start_time.asc".to_string()),
            ],
        )
        .await
    }
}
