use axum::Router;
use tower_http::services::ServeDir;

use crate::state::SharedState;

/// Serve the media directory as static files under `/gifs`.
pub fn router(state: &SharedState) -> Router<SharedState> {
    Router::new().nest_service("/gifs", ServeDir::new(state.media().dir()))
}
