pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::grading::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Browser form flow
        .route("/", get(handlers::handle_index))
        .route("/grade", post(handlers::handle_grade_form))
        // JSON API
        .route("/api/v1/grade", post(handlers::handle_grade_json))
        .with_state(state)
}
