use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::api::{availability_range, check_availability, AppState};
use crate::handlers::test::{health_check, sample_availability};

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new();

    // Health check is always available
    let health_route = Router::new().route("/health", get(health_check));
    router = router.merge(health_route);

    // Availability queries are the public surface of this service
    let availability_routes = Router::new()
        .route("/availability/check", post(check_availability))
        .route("/availability/range", get(availability_range));
    router = router.merge(availability_routes);

    // Only expose sample payloads outside production
    if !is_production {
        let sample_route = Router::new().route("/availability/sample", get(sample_availability));
        router = router.merge(sample_route);

        info!("Sample endpoints enabled - server running in development mode");
    } else {
        info!("Running in production mode - only availability and health endpoints exposed");
    }

    router.with_state(app_state)
}
