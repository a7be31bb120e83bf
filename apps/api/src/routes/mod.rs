pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/match/run/:resume_id",
            post(handlers::handle_run_match).get(handlers::handle_run_match),
        )
        .route(
            "/api/v1/match/history",
            get(handlers::handle_match_history),
        )
        .with_state(state)
}
