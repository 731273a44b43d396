//! Per-user weekly aggregation
//!
//! Within each week the reviewer and reviewee tallies keep first-seen order.
//! Ranking is left to [`leaderboard`] and to consumers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::models::{
    LeaderboardEntry, ReviewMetric, RevieweeStats, ReviewerStats, UserRole, WeeklyUserMetrics,
};
use indexmap::{IndexMap, IndexSet};

use crate::mean::RunningMean;

#[derive(Debug, Default)]
struct ReviewerAccumulator {
    review_count: usize,
    review_time: RunningMean,
}

#[derive(Debug, Default)]
struct RevieweeAccumulator {
    pr_count: usize,
    time_to_review: RunningMean,
    time_to_merge: RunningMean,
}

#[derive(Debug, Default)]
struct WeekUsers {
    reviewers: IndexMap<String, ReviewerAccumulator>,
    reviewees: IndexMap<String, RevieweeAccumulator>,
}

impl WeekUsers {
    fn record(&mut self, metric: &ReviewMetric) {
        let reviewee = self.reviewees.entry(metric.reviewee.clone()).or_default();
        reviewee.pr_count += 1;
        reviewee.time_to_review.push_opt(metric.request_to_review_mins);
        reviewee.time_to_merge.push_opt(metric.review_to_merge_mins);

        // The PR's wait for its first actionable review is credited in full to
        // every reviewer on it.
        for name in &metric.reviewers {
            let reviewer = self.reviewers.entry(name.clone()).or_default();
            reviewer.review_count += 1;
            reviewer.review_time.push_opt(metric.request_to_review_mins);
        }
    }

    fn finish(self, week_start: NaiveDate) -> WeeklyUserMetrics {
        WeeklyUserMetrics {
            week_start,
            reviewers: self
                .reviewers
                .into_iter()
                .map(|(reviewer, acc)| ReviewerStats {
                    reviewer,
                    review_count: acc.review_count,
                    avg_review_time_mins: acc.review_time.value(),
                })
                .collect(),
            reviewees: self
                .reviewees
                .into_iter()
                .map(|(reviewee, acc)| RevieweeStats {
                    reviewee,
                    pr_count: acc.pr_count,
                    avg_time_to_review_mins: acc.time_to_review.value(),
                    avg_time_to_merge_mins: acc.time_to_merge.value(),
                })
                .collect(),
        }
    }
}

/// Reviewer and reviewee statistics per week, ascending by week start
pub fn user_metrics_by_week(metrics: &[ReviewMetric]) -> Vec<WeeklyUserMetrics> {
    metrics
        .iter()
        .fold(
            BTreeMap::<NaiveDate, WeekUsers>::new(),
            |mut weeks, metric| {
                weeks.entry(metric.week_start).or_default().record(metric);
                weeks
            },
        )
        .into_iter()
        .map(|(week_start, users)| users.finish(week_start))
        .collect()
}

/// Distinct PR authors, first-seen order
pub fn all_reviewees(metrics: &[ReviewMetric]) -> Vec<String> {
    metrics
        .iter()
        .map(|m| m.reviewee.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct reviewers, first-seen order
pub fn all_reviewers(metrics: &[ReviewMetric]) -> Vec<String> {
    metrics
        .iter()
        .flat_map(|m| m.reviewers.iter().map(String::as_str))
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Totals per user across all weeks, highest first, truncated to `limit`.
/// Ties keep first-seen order.
pub fn leaderboard(
    weeks: &[WeeklyUserMetrics],
    role: UserRole,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut totals: IndexMap<&str, usize> = IndexMap::new();
    for week in weeks {
        match role {
            UserRole::Reviewer => {
                for stats in &week.reviewers {
                    *totals.entry(stats.reviewer.as_str()).or_insert(0) += stats.review_count;
                }
            }
            UserRole::Reviewee => {
                for stats in &week.reviewees {
                    *totals.entry(stats.reviewee.as_str()).or_insert(0) += stats.pr_count;
                }
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (user, count))| LeaderboardEntry {
            rank: i + 1,
            user: user.to_string(),
            count,
        })
        .collect()
}
