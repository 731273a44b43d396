//! Weekly summary aggregation

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::models::{MetricsSummary, ReviewMetric, WeeklySummary};

use crate::mean::RunningMean;

#[derive(Debug, Default)]
struct WeekAccumulator {
    request_to_review: RunningMean,
    review_to_merge: RunningMean,
    total_prs: usize,
}

/// One summary per week present in `metrics`, ascending by week start
pub fn summarize_weeks(metrics: &[ReviewMetric]) -> Vec<WeeklySummary> {
    let weeks = metrics.iter().fold(
        BTreeMap::<NaiveDate, WeekAccumulator>::new(),
        |mut weeks, metric| {
            let week = weeks.entry(metric.week_start).or_default();
            week.total_prs += 1;
            week.request_to_review.push_opt(metric.request_to_review_mins);
            week.review_to_merge.push_opt(metric.review_to_merge_mins);
            weeks
        },
    );

    weeks
        .into_iter()
        .map(|(week_start, acc)| WeeklySummary {
            week_start,
            avg_request_to_review_mins: acc.request_to_review.value(),
            avg_review_to_merge_mins: acc.review_to_merge.value(),
            total_prs: acc.total_prs,
        })
        .collect()
}

/// Headline numbers: total PRs, and the mean of the weekly averages
pub fn overall_summary(weeks: &[WeeklySummary]) -> MetricsSummary {
    if weeks.is_empty() {
        return MetricsSummary::default();
    }

    let n = weeks.len() as f64;
    MetricsSummary {
        total_prs: weeks.iter().map(|w| w.total_prs).sum(),
        avg_request_to_review_mins: weeks
            .iter()
            .map(|w| w.avg_request_to_review_mins)
            .sum::<f64>()
            / n,
        avg_review_to_merge_mins: weeks
            .iter()
            .map(|w| w.avg_review_to_merge_mins)
            .sum::<f64>()
            / n,
    }
}
