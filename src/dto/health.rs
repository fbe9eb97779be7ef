use std::time::SystemTime;

use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::format_system_time;

/// Health response returned by the `/api/health` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Human readable status.
    pub message: String,
    /// RFC 3339 time at which the response was produced.
    pub timestamp: String,
}

impl HealthResponse {
    /// Create a health response indicating the server is up.
    pub fn running(at: SystemTime) -> Self {
        Self {
            message: "Server is running".to_string(),
            timestamp: format_system_time(at),
        }
    }
}
