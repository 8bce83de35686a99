// src/routes.rs
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/polls/", get(handlers::index))
        .route("/polls/{question_id}/", get(handlers::detail))
        .route("/polls/{question_id}/results/", get(handlers::results))
        .route("/polls/{question_id}/vote/", post(handlers::vote))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
