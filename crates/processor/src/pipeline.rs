//! One full aggregation pass

use chrono::{DateTime, Utc};
use common::models::{ReviewMetric, WeeklySummary, WeeklyUserMetrics};
use common::{Config, Result};
use github::PullRequest;
use serde::Serialize;
use tracing::{debug, warn};

use crate::derive::derive_all;
use crate::users::{all_reviewees, all_reviewers, user_metrics_by_week};
use crate::weekly::summarize_weeks;
use crate::window::{lookback_cutoff, retain_recent};

/// Settings that shape a pass
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Months of history kept by the pre-filter
    pub lookback_months: u32,
    /// Retained PR count above which a warning is logged
    pub large_dataset_threshold: usize,
    /// Recompute weekly and per-user aggregates over the filtered metrics
    pub filter_recomputes_summaries: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            lookback_months: config.lookback_months,
            large_dataset_threshold: config.large_dataset_threshold,
            filter_recomputes_summaries: config.filter_recomputes_summaries,
        }
    }
}

/// Everything derived from one input snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Unfiltered, ordered by creation time then PR number
    pub metrics: Vec<ReviewMetric>,
    pub weekly: Vec<WeeklySummary>,
    pub weekly_users: Vec<WeeklyUserMetrics>,
    pub reviewees: Vec<String>,
    pub reviewers: Vec<String>,
}

impl MetricsReport {
    pub fn from_metrics(metrics: Vec<ReviewMetric>) -> Self {
        Self {
            weekly: summarize_weeks(&metrics),
            weekly_users: user_metrics_by_week(&metrics),
            reviewees: all_reviewees(&metrics),
            reviewers: all_reviewers(&metrics),
            metrics,
        }
    }
}

/// Apply the date-range pre-filter, warning on large inputs
pub fn prefilter(
    prs: Vec<PullRequest>,
    now: DateTime<Utc>,
    config: &PipelineConfig,
) -> Result<Vec<PullRequest>> {
    let cutoff = lookback_cutoff(now, config.lookback_months);
    let recent = retain_recent(prs, cutoff)?;
    if recent.len() > config.large_dataset_threshold {
        warn!(
            "Large dataset detected: {} PRs. Aggregation may take a while.",
            recent.len()
        );
    }
    Ok(recent)
}

/// Derive and aggregate already pre-filtered PRs
pub fn compute(prs: &[PullRequest]) -> Result<MetricsReport> {
    let metrics = derive_all(prs)?;
    debug!(
        "Derived {} metrics from {} PRs ({} unmerged)",
        metrics.len(),
        prs.len(),
        prs.len() - metrics.len()
    );
    Ok(MetricsReport::from_metrics(metrics))
}

/// Pre-filter, derive and aggregate in one synchronous call.
/// Returns the retained PR count alongside the report.
pub fn run(
    prs: Vec<PullRequest>,
    now: DateTime<Utc>,
    config: &PipelineConfig,
) -> Result<(usize, MetricsReport)> {
    let recent = prefilter(prs, now, config)?;
    let report = compute(&recent)?;
    Ok((recent.len(), report))
}
