//! Salon Booking Availability Service
//!
//! This library computes bookable time slots for salon staff and renders
//! double-booking verdicts for requested appointment times. It reads
//! services, staff schedules, and existing appointments from the
//! platform's hosted Postgres data API and never writes.
//!
//! # Modules
//!
//! - `services::availability`: the pure slot-grid and conflict engine
//! - `store`: the read-only booking data client behind the `BookingStore` trait
//! - `handlers`, `routes`: the axum HTTP surface
//!
//! Availability answers are advisory: there is no reservation or hold
//! mechanism, so a slot reported open may be taken by a concurrent booking
//! write before the caller books it.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod store_mock;

// Re-export the main API types for ease of use
pub use error::AppError;
pub use handlers::api::AppState;
pub use routes::create_router;
pub use store::{BookingStore, StoreError, SupabaseStore};
