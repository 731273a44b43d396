//! Domain models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reviewee name used when a PR has no author (deleted accounts)
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Latency metrics derived from one merged pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMetric {
    pub pr_number: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: DateTime<Utc>,
    /// Minutes from creation to the first approval or change request
    pub request_to_review_mins: Option<i64>,
    /// Minutes from the first approval or change request to merge
    pub review_to_merge_mins: Option<i64>,
    pub week_start: NaiveDate,
    pub reviewee: String,
    /// Distinct review authors other than the PR author, first-seen order
    pub reviewers: Vec<String>,
}

impl ReviewMetric {
    /// Whether the PR received an approval or change request before aggregation
    pub fn is_timed(&self) -> bool {
        self.request_to_review_mins.is_some()
    }
}

/// Aggregate latency figures for one calendar week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub avg_request_to_review_mins: f64,
    pub avg_review_to_merge_mins: f64,
    pub total_prs: usize,
}

/// Reviewer-side statistics within one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerStats {
    pub reviewer: String,
    pub review_count: usize,
    pub avg_review_time_mins: f64,
}

/// Author-side statistics within one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevieweeStats {
    pub reviewee: String,
    pub pr_count: usize,
    pub avg_time_to_review_mins: f64,
    pub avg_time_to_merge_mins: f64,
}

/// Per-user breakdown for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyUserMetrics {
    pub week_start: NaiveDate,
    pub reviewers: Vec<ReviewerStats>,
    pub reviewees: Vec<RevieweeStats>,
}

/// Headline numbers across every week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricsSummary {
    pub total_prs: usize,
    pub avg_request_to_review_mins: f64,
    pub avg_review_to_merge_mins: f64,
}

/// Which side of the review a leaderboard ranks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Reviewer,
    Reviewee,
}

/// Leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user: String,
    pub count: usize,
}

/// Load signal derived from the retained PR count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DataSizeLevel {
    None,
    Info,
    Warning,
    Danger,
}

impl DataSizeLevel {
    pub fn from_size(data_size: usize) -> Self {
        match data_size {
            0..=99 => DataSizeLevel::None,
            100..=199 => DataSizeLevel::Info,
            200..=299 => DataSizeLevel::Warning,
            _ => DataSizeLevel::Danger,
        }
    }
}
