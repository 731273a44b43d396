//! Pull request submission

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use common::models::DataSizeLevel;
use processor::SchedulerState;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub generation: u64,
    pub received: usize,
    pub data_size: usize,
    pub data_size_level: DataSizeLevel,
    pub state: SchedulerState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Schedule a pass over the posted pull requests
/// POST /api/pulls
///
/// Accepts a JSON array of pull request nodes or a GraphQL response.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let prs = github::parse_pull_requests(&body)?;
    let received = prs.len();
    info!("Received {} pull requests", received);

    let generation = state.scheduler.submit(prs).await;
    let status = state.scheduler.status().await;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            generation,
            received,
            data_size: status.data_size,
            data_size_level: status.data_size_level,
            state: status.state,
            error: status.error,
        }),
    ))
}
