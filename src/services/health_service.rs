use std::time::SystemTime;

use crate::dto::health::HealthResponse;

/// Respond with a static liveness payload stamped with the current time.
pub fn health_status() -> HealthResponse {
    HealthResponse::running(SystemTime::now())
}
