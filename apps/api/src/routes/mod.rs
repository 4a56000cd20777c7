pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::signup::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/signup-student", post(handlers::handle_signup))
        .with_state(state)
}
