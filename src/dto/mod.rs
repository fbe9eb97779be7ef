//! Payloads exchanged with the HTTP API and the chat command surface.

use std::time::SystemTime;
use time::OffsetDateTime;

use crate::state::models::iso8601_millis;

pub mod command;
/// Liveness payload.
pub mod health;
pub mod reply;
/// Full tally snapshot payload.
pub mod tallies;

fn format_system_time(time: SystemTime) -> String {
    iso8601_millis(OffsetDateTime::from(time))
}
