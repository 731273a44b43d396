//! Leaderboard routes

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use common::models::{LeaderboardEntry, UserRole};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    /// "reviewer" or "reviewee"
    #[serde(default = "default_role")]
    role: UserRole,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_role() -> UserRole {
    UserRole::Reviewer
}

fn default_limit() -> usize {
    10
}

/// Top users over the whole lookback window
/// GET /api/leaderboard?role=reviewer&limit=10
pub async fn get(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let Query(query) = query?;
    Ok(Json(state.scheduler.leaderboard(query.role, query.limit).await))
}
