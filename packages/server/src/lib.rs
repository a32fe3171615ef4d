pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod forms;
pub mod handlers;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    routes::routes(&state.config)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
