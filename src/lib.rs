pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{routing::get, Router};
use std::sync::Arc;

/// Builds the full application router over an already wired state.
pub fn app(state: Arc<state::AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .nest("/api/meditrack/medications", routes::medications::router())
        .nest("/api/meditrack/prescriptions", routes::prescriptions::router())
        .nest("/api/meditrack/notifications", routes::notifications::router())
        .nest("/api/meditrack/adherence", routes::adherence::router())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "MediTrack is running!"
}
