//! API routes

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

pub mod filters;
pub mod health;
pub mod leaderboard;
pub mod metrics;
pub mod pulls;

/// GraphQL pages for a month of history can be large
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/pulls",
            post(pulls::submit).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .route("/api/status", get(metrics::status))
        .route("/api/metrics", get(metrics::snapshot))
        .route("/api/metrics/weekly", get(metrics::weekly))
        .route("/api/metrics/users", get(metrics::users))
        .route("/api/metrics/pulls", get(metrics::pulls))
        .route("/api/participants", get(metrics::participants))
        .route("/api/leaderboard", get(leaderboard::get))
        .route(
            "/api/filters",
            get(filters::get)
                .put(filters::update)
                .delete(filters::clear),
        )
        .with_state(state)
}
