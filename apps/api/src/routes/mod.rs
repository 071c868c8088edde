pub mod builder;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Builder API
        .route("/api/v1/preview", post(builder::handle_preview))
        .route("/api/v1/export", post(builder::handle_export))
        .route(
            "/api/v1/drafts/:user_id",
            get(builder::handle_get_draft).put(builder::handle_put_draft),
        )
        .with_state(state)
}
