pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::pipeline::handlers as pipeline;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ingestion: bucket notifications for uploaded resumes
        .route(
            "/api/v1/events/storage",
            post(pipeline::handle_storage_event),
        )
        // Read side
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/candidates", get(matching::handle_list_candidates))
        .with_state(state)
}
