pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::quiz::handlers as quiz;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Quiz API
        .route("/api/v1/quiz/generate", post(quiz::handle_generate_quiz))
        // Admin auth API
        .route("/api/v1/admin/login", post(auth::handle_login))
        .route("/api/v1/admin/logout", post(auth::handle_logout))
        .route("/api/v1/admin/verify", get(auth::handle_verify))
        .with_state(state)
}
