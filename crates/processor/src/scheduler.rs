//! Background scheduling of aggregation passes
//!
//! A submission runs the pre-filter immediately (so the data size is known
//! right away), then hands derivation and aggregation to a blocking task after
//! yielding once to the runtime. Each submission gets a generation number; a
//! pass that finishes after a newer submission drops its result.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use common::format::format_minutes;
use common::models::{
    DataSizeLevel, LeaderboardEntry, MetricsSummary, ReviewMetric, UserRole, WeeklySummary,
    WeeklyUserMetrics,
};
use common::{Error, Result};
use github::PullRequest;
use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info};

use crate::filter::{non_blank, MetricFilter};
use crate::pipeline::{self, MetricsReport, PipelineConfig};
use crate::users::{leaderboard, user_metrics_by_week};
use crate::weekly::{overall_summary, summarize_weeks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Idle,
    Scheduled,
    Computing,
}

/// Scalar signals for consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulerStatus {
    pub state: SchedulerState,
    pub processing: bool,
    pub generation: u64,
    pub data_size: usize,
    pub data_size_level: DataSizeLevel,
    /// Set only when the latest pass failed
    pub error: Option<String>,
}

/// Consistent view of the latest completed pass, with the filter applied
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub weekly: Vec<WeeklySummary>,
    pub weekly_users: Vec<WeeklyUserMetrics>,
    /// Filtered
    pub metrics: Vec<ReviewMetric>,
    pub summary: MetricsSummary,
    pub reviewees: Vec<String>,
    pub reviewers: Vec<String>,
    pub filter: MetricFilter,
    pub status: SchedulerStatus,
}

#[derive(Debug, Default)]
struct Shared {
    generation: u64,
    data_size: usize,
    report: MetricsReport,
    error: Option<String>,
    filter: MetricFilter,
}

struct Inner {
    config: PipelineConfig,
    shared: RwLock<Shared>,
    state: watch::Sender<SchedulerState>,
}

/// Runs aggregation passes off the caller's task and holds their results
#[derive(Clone)]
pub struct MetricsScheduler {
    inner: Arc<Inner>,
}

impl MetricsScheduler {
    pub fn new(config: PipelineConfig) -> Self {
        let (state, _) = watch::channel(SchedulerState::Idle);
        Self {
            inner: Arc::new(Inner {
                config,
                shared: RwLock::new(Shared::default()),
                state,
            }),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.inner.config
    }

    /// Schedule a pass over `prs`, replacing any earlier results when it
    /// completes. Returns the pass's generation number.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn submit(&self, prs: Vec<PullRequest>) -> u64 {
        let received = prs.len();
        let prefiltered = pipeline::prefilter(prs, Utc::now(), &self.inner.config);

        let mut shared = self.inner.shared.write().await;
        shared.generation += 1;
        let generation = shared.generation;

        let recent = match prefiltered {
            Ok(recent) => recent,
            Err(e) => {
                error!("Pass {} rejected during pre-filter: {}", generation, e);
                shared.data_size = 0;
                shared.report = MetricsReport::default();
                shared.error = Some(e.to_string());
                self.inner.state.send_replace(SchedulerState::Idle);
                return generation;
            }
        };

        shared.data_size = recent.len();
        self.inner.state.send_replace(SchedulerState::Scheduled);
        drop(shared);

        info!(
            "Scheduled pass {} over {}/{} PRs",
            generation,
            recent.len(),
            received
        );

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            // Let the caller's task run before starting work
            tokio::task::yield_now().await;
            inner.run_pass(generation, recent).await;
        });

        generation
    }

    /// Wait until no pass is scheduled or computing
    pub async fn wait_idle(&self) {
        let mut rx = self.inner.state.subscribe();
        let _ = rx.wait_for(|state| *state == SchedulerState::Idle).await;
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> SchedulerState {
        *self.inner.state.borrow()
    }

    pub fn is_processing(&self) -> bool {
        self.state() != SchedulerState::Idle
    }

    pub async fn status(&self) -> SchedulerStatus {
        let shared = self.inner.shared.read().await;
        self.status_of(&shared)
    }

    pub async fn filter(&self) -> MetricFilter {
        self.inner.shared.read().await.filter.clone()
    }

    pub async fn set_filter(&self, filter: MetricFilter) {
        let filter = MetricFilter::new(filter.reviewee, filter.reviewer);
        debug!("Filter set to {:?}", filter);
        self.inner.shared.write().await.filter = filter;
    }

    pub async fn set_reviewee(&self, reviewee: Option<String>) {
        self.inner.shared.write().await.filter.reviewee = non_blank(reviewee);
    }

    pub async fn set_reviewer(&self, reviewer: Option<String>) {
        self.inner.shared.write().await.filter.reviewer = non_blank(reviewer);
    }

    pub async fn clear_filter(&self) {
        self.set_filter(MetricFilter::default()).await;
    }

    /// Latest results with the current filter applied
    pub async fn snapshot(&self) -> MetricsSnapshot {
        let shared = self.inner.shared.read().await;
        let report = &shared.report;
        let metrics = shared.filter.apply(&report.metrics);

        let (weekly, weekly_users) =
            if self.inner.config.filter_recomputes_summaries && !shared.filter.is_empty() {
                (summarize_weeks(&metrics), user_metrics_by_week(&metrics))
            } else {
                (report.weekly.clone(), report.weekly_users.clone())
            };

        MetricsSnapshot {
            summary: overall_summary(&weekly),
            weekly,
            weekly_users,
            metrics,
            reviewees: report.reviewees.clone(),
            reviewers: report.reviewers.clone(),
            filter: shared.filter.clone(),
            status: self.status_of(&shared),
        }
    }

    /// Top users across all weeks of the latest pass
    pub async fn leaderboard(&self, role: UserRole, limit: usize) -> Vec<LeaderboardEntry> {
        let snapshot = self.snapshot().await;
        leaderboard(&snapshot.weekly_users, role, limit)
    }

    fn status_of(&self, shared: &Shared) -> SchedulerStatus {
        let state = self.state();
        SchedulerStatus {
            state,
            processing: state != SchedulerState::Idle,
            generation: shared.generation,
            data_size: shared.data_size,
            data_size_level: DataSizeLevel::from_size(shared.data_size),
            error: shared.error.clone(),
        }
    }
}

impl Inner {
    async fn run_pass(&self, generation: u64, prs: Vec<PullRequest>) {
        {
            let shared = self.shared.read().await;
            if shared.generation != generation {
                debug!("Pass {} superseded before starting", generation);
                return;
            }
            self.state.send_replace(SchedulerState::Computing);
        }

        let started = Instant::now();
        let result = tokio::task::spawn_blocking(move || pipeline::compute(&prs))
            .await
            .unwrap_or_else(|e| Err(Error::Internal(format!("aggregation task failed: {}", e))));

        self.finish(generation, result, started).await;
    }

    async fn finish(&self, generation: u64, result: Result<MetricsReport>, started: Instant) {
        let mut shared = self.shared.write().await;
        if shared.generation != generation {
            debug!(
                "Discarding stale pass {} (latest is {})",
                generation, shared.generation
            );
            return;
        }

        match result {
            Ok(report) => {
                let summary = overall_summary(&report.weekly);
                info!(
                    "Pass {} complete: {} merged PRs ({} reviewed) across {} weeks in {:?}",
                    generation,
                    report.metrics.len(),
                    report.metrics.iter().filter(|m| m.is_timed()).count(),
                    report.weekly.len(),
                    started.elapsed()
                );
                debug!(
                    "Pass {} averages: request to review {}, review to merge {}",
                    generation,
                    format_minutes(summary.avg_request_to_review_mins),
                    format_minutes(summary.avg_review_to_merge_mins)
                );
                shared.report = report;
                shared.error = None;
            }
            Err(e) => {
                error!("Pass {} failed: {}", generation, e);
                shared.report = MetricsReport::default();
                shared.error = Some(e.to_string());
            }
        }
        self.state.send_replace(SchedulerState::Idle);
    }
}

impl Default for MetricsScheduler {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
