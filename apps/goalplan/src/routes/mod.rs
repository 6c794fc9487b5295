pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::planning::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Plans
        .route("/api/v1/plans/savings", post(handlers::handle_generate_plan))
        .route(
            "/api/v1/plans/savings/preview",
            post(handlers::handle_preview_plan),
        )
        // Calculators
        .route(
            "/api/v1/calculators/goal-progress",
            post(handlers::handle_goal_progress),
        )
        .route(
            "/api/v1/calculators/compound-interest",
            post(handlers::handle_compound_interest),
        )
        .route("/api/v1/calculators/surplus", post(handlers::handle_surplus))
        .with_state(state)
}
