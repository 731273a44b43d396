//! Computed metrics

use axum::{extract::State, Json};
use common::models::{MetricsSummary, ReviewMetric, WeeklySummary, WeeklyUserMetrics};
use processor::{MetricsSnapshot, SchedulerStatus};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct WeeklyResponse {
    pub weeks: Vec<WeeklySummary>,
    pub summary: MetricsSummary,
}

#[derive(Serialize)]
pub struct ParticipantsResponse {
    pub reviewees: Vec<String>,
    pub reviewers: Vec<String>,
}

/// GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<SchedulerStatus> {
    Json(state.scheduler.status().await)
}

/// GET /api/metrics
pub async fn snapshot(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.scheduler.snapshot().await)
}

/// GET /api/metrics/weekly
pub async fn weekly(State(state): State<Arc<AppState>>) -> Json<WeeklyResponse> {
    let snapshot = state.scheduler.snapshot().await;
    Json(WeeklyResponse {
        weeks: snapshot.weekly,
        summary: snapshot.summary,
    })
}

/// GET /api/metrics/users
pub async fn users(State(state): State<Arc<AppState>>) -> Json<Vec<WeeklyUserMetrics>> {
    Json(state.scheduler.snapshot().await.weekly_users)
}

/// Filtered per-PR metrics
/// GET /api/metrics/pulls
pub async fn pulls(State(state): State<Arc<AppState>>) -> Json<Vec<ReviewMetric>> {
    Json(state.scheduler.snapshot().await.metrics)
}

/// GET /api/participants
pub async fn participants(State(state): State<Arc<AppState>>) -> Json<ParticipantsResponse> {
    let snapshot = state.scheduler.snapshot().await;
    Json(ParticipantsResponse {
        reviewees: snapshot.reviewees,
        reviewers: snapshot.reviewers,
    })
}
