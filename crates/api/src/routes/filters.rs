//! Reviewer/reviewee filter

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use processor::MetricFilter;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

/// Partial update: an absent field is left alone, `null` clears it
#[derive(Debug, Default, Deserialize)]
pub struct FilterUpdate {
    #[serde(default, deserialize_with = "present")]
    pub reviewee: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub reviewer: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// GET /api/filters
pub async fn get(State(state): State<Arc<AppState>>) -> Json<MetricFilter> {
    Json(state.scheduler.filter().await)
}

/// PUT /api/filters
pub async fn update(
    State(state): State<Arc<AppState>>,
    update: Result<Json<FilterUpdate>, JsonRejection>,
) -> ApiResult<Json<MetricFilter>> {
    let Json(update) = update?;
    if let Some(reviewee) = update.reviewee {
        state.scheduler.set_reviewee(reviewee).await;
    }
    if let Some(reviewer) = update.reviewer {
        state.scheduler.set_reviewer(reviewer).await;
    }

    let filter = state.scheduler.filter().await;
    info!(
        "Filter now reviewee={:?} reviewer={:?}",
        filter.reviewee, filter.reviewer
    );
    Ok(Json(filter))
}

/// DELETE /api/filters
pub async fn clear(State(state): State<Arc<AppState>>) -> Json<MetricFilter> {
    state.scheduler.clear_filter().await;
    Json(MetricFilter::default())
}
