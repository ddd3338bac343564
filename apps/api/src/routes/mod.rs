pub mod form;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interactive form surface
        .route("/", get(form::index_handler))
        .route("/generate", post(form::generate_form_handler))
        // JSON API
        .route("/api/v1/generate", post(form::generate_api_handler))
        .with_state(state)
}
