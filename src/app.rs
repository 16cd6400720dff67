use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/cards", get(handlers::cards))
        .route("/history/clear", post(handlers::clear_history_form))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/state", get(handlers::get_state))
        .route("/api/click", post(handlers::click))
        .route("/api/history/clear", post(handlers::clear_history))
        .with_state(state)
}
