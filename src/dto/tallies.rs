use serde::Serialize;
use utoipa::ToSchema;

use crate::state::TallyStore;

/// Full tally data keyed by game then matchup id, in the persisted document shape.
#[derive(Debug, Serialize, ToSchema)]
#[schema(value_type = Object)]
pub struct TalliesSnapshot(pub TallyStore);
