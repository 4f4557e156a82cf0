pub mod health;
pub mod ui;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::extract::handlers::handle_extract;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/health", get(health::health_handler))
        .route("/api/extract", post(handle_extract))
        .route("/api/analyze", post(handle_analyze))
        .with_state(state)
}
