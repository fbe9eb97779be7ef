use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::tallies::TalliesSnapshot, services::tally_service, state::SharedState};

/// Read-only access to the live tally data.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/tallies", get(get_tallies))
}

#[utoipa::path(
    get,
    path = "/api/tallies",
    tag = "tallies",
    responses((status = 200, description = "Every game and matchup with their records", body = TalliesSnapshot))
)]
/// Return the whole store as persisted on disk.
pub async fn get_tallies(State(state): State<SharedState>) -> Json<TalliesSnapshot> {
    Json(tally_service::snapshot(&state).await)
}
