use axum::Router;

use crate::state::SharedState;

/// Swagger UI and the OpenAPI document.
pub mod docs;
/// Liveness route.
pub mod health;
/// Static media files.
pub mod media;
/// Tally snapshot route.
pub mod tallies;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(tallies::router())
        .merge(media::router(&state))
        .merge(docs::router())
        .with_state(state)
}
