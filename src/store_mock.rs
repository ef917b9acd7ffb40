use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use crate::models::salon::{Appointment, AppointmentStatus, Service, StaffDaySchedule};
use crate::store::{BookingStore, StoreError};

// Mockall double for the booking store, used to inject failures in tests
mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn get_service(&self, service_id: &str) -> Result<Option<Service>, StoreError>;

        async fn get_staff_schedule(
            &self,
            staff_id: &str,
            day_of_week: u8,
        ) -> Result<Option<StaffDaySchedule>, StoreError>;

        async fn list_staff_schedules(
            &self,
            staff_id: &str,
        ) -> Result<Vec<StaffDaySchedule>, StoreError>;

        async fn list_appointments(
            &self,
            staff_id: &str,
            date: NaiveDate,
        ) -> Result<Vec<Appointment>, StoreError>;

        async fn list_appointments_between(
            &self,
            staff_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<Appointment>, StoreError>;
    }
}

// Fixture-backed store for handler tests. Applies the same cancelled-row
// filter as the real store so tests exercise the documented contract.
#[derive(Default)]
pub struct InMemoryBookingStore {
    services: Vec<Service>,
    schedules: Vec<StaffDaySchedule>,
    appointments: Vec<Appointment>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_schedule(mut self, schedule: StaffDaySchedule) -> Self {
        self.schedules.push(schedule);
        self
    }

    pub fn with_appointment(mut self, appointment: Appointment) -> Self {
        self.appointments.push(appointment);
        self
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn get_service(&self, service_id: &str) -> Result<Option<Service>, StoreError> {
        Ok(self
            .services
            .iter()
            .find(|service| service.id == service_id)
            .cloned())
    }

    async fn get_staff_schedule(
        &self,
        staff_id: &str,
        day_of_week: u8,
    ) -> Result<Option<StaffDaySchedule>, StoreError> {
        Ok(self
            .schedules
            .iter()
            .find(|schedule| schedule.staff_id == staff_id && schedule.day_of_week == day_of_week)
            .cloned())
    }

    async fn list_staff_schedules(&self, staff_id: &str) -> Result<Vec<StaffDaySchedule>, StoreError> {
        Ok(self
            .schedules
            .iter()
            .filter(|schedule| schedule.staff_id == staff_id)
            .cloned()
            .collect())
    }

    async fn list_appointments(
        &self,
        staff_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .iter()
            .filter(|appointment| {
                appointment.staff_id == staff_id
                    && appointment.appointment_date == date
                    && appointment.status != AppointmentStatus::Cancelled
            })
            .cloned()
            .collect())
    }

    async fn list_appointments_between(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .iter()
            .filter(|appointment| {
                appointment.staff_id == staff_id
                    && appointment.appointment_date >= start
                    && appointment.appointment_date <= end
                    && appointment.status != AppointmentStatus::Cancelled
            })
            .cloned()
            .collect())
    }
}
