//! Route definitions

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{gateway, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/weather/{city}", get(gateway::get_weather))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
