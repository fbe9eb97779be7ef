//! Read-only projections of the tally store for the HTTP API.

use crate::{dto::tallies::TalliesSnapshot, state::SharedState};

/// Copy of the whole store as it would be persisted.
pub async fn snapshot(state: &SharedState) -> TalliesSnapshot {
    let tallies = state.tallies().await;
    TalliesSnapshot(tallies.clone())
}
