//! Reviewer/reviewee filter over derived metrics
//!
//! Filtering only narrows the metric list handed to detail views. Weekly and
//! per-user aggregates stay computed over the unfiltered set unless
//! `PipelineConfig::filter_recomputes_summaries` is enabled.

use common::models::ReviewMetric;
use serde::{Deserialize, Serialize};

/// Optional equality filters, ANDed when both are set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFilter {
    pub reviewee: Option<String>,
    pub reviewer: Option<String>,
}

impl MetricFilter {
    /// Blank names mean "no filter" on either side
    pub fn new(reviewee: Option<String>, reviewer: Option<String>) -> Self {
        Self {
            reviewee: non_blank(reviewee),
            reviewer: non_blank(reviewer),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reviewee().is_none() && self.reviewer().is_none()
    }

    pub fn reviewee(&self) -> Option<&str> {
        self.reviewee.as_deref().filter(|s| !s.is_empty())
    }

    pub fn reviewer(&self) -> Option<&str> {
        self.reviewer.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches(&self, metric: &ReviewMetric) -> bool {
        if let Some(reviewee) = self.reviewee() {
            if metric.reviewee != reviewee {
                return false;
            }
        }
        if let Some(reviewer) = self.reviewer() {
            if !metric.reviewers.iter().any(|r| r == reviewer) {
                return false;
            }
        }
        true
    }

    /// Metrics passing the filter, in their original order
    pub fn apply(&self, metrics: &[ReviewMetric]) -> Vec<ReviewMetric> {
        metrics.iter().filter(|m| self.matches(m)).cloned().collect()
    }
}

pub(crate) fn non_blank(name: Option<String>) -> Option<String> {
    name.filter(|s| !s.is_empty())
}
