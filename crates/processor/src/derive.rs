//! Per-PR latency derivation

use chrono::{DateTime, Utc};
use common::models::{ReviewMetric, UNKNOWN_AUTHOR};
use common::Result;
use github::{PullRequest, Review};
use indexmap::IndexSet;

use crate::week::week_start;

/// Derive the latency metric for one PR. Unmerged PRs yield `None`.
pub fn derive_metric(pr: &PullRequest) -> Result<Option<ReviewMetric>> {
    let Some(merged_at) = pr.merged_at()? else {
        return Ok(None);
    };
    let created_at = pr.created_at()?;

    let reviews = sorted_reviews(&pr.reviews.nodes)?;
    let (request_to_review_mins, review_to_merge_mins) =
        match first_actionable_review(&reviews) {
            Some(reviewed_at) => (
                Some(minutes_between(created_at, reviewed_at)),
                Some(minutes_between(reviewed_at, merged_at)),
            ),
            None => (None, None),
        };

    let reviewee = pr
        .author_login()
        .filter(|login| !login.is_empty())
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string();

    Ok(Some(ReviewMetric {
        pr_number: pr.number,
        title: pr.title.clone(),
        created_at,
        merged_at,
        request_to_review_mins,
        review_to_merge_mins,
        week_start: week_start(created_at),
        reviewee,
        reviewers: distinct_reviewers(reviews.iter().map(|(_, r)| *r), pr.author_login()),
    }))
}

/// Derive metrics for every merged PR, ordered by creation time then number
pub fn derive_all(prs: &[PullRequest]) -> Result<Vec<ReviewMetric>> {
    let mut metrics = Vec::with_capacity(prs.len());
    for pr in prs {
        if let Some(metric) = derive_metric(pr)? {
            metrics.push(metric);
        }
    }
    metrics.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then(a.pr_number.cmp(&b.pr_number))
    });
    Ok(metrics)
}

/// Reviews paired with their parsed timestamps, stable-sorted ascending so
/// equal timestamps keep input order
pub fn sorted_reviews(reviews: &[Review]) -> Result<Vec<(DateTime<Utc>, &Review)>> {
    let mut timed = reviews
        .iter()
        .map(|review| review.created_at().map(|at| (at, review)))
        .collect::<Result<Vec<_>>>()?;
    timed.sort_by_key(|(at, _)| *at);
    Ok(timed)
}

/// Timestamp of the earliest approval or change request in sorted reviews
pub fn first_actionable_review(sorted: &[(DateTime<Utc>, &Review)]) -> Option<DateTime<Utc>> {
    sorted
        .iter()
        .find(|(_, review)| review.state.is_actionable())
        .map(|(at, _)| *at)
}

/// Review authors other than the PR author, deduplicated in first-seen order.
/// Reviews without an author are skipped.
pub fn distinct_reviewers<'a>(
    reviews: impl IntoIterator<Item = &'a Review>,
    pr_author: Option<&str>,
) -> Vec<String> {
    reviews
        .into_iter()
        .filter_map(|review| review.author_login())
        .filter(|login| !login.is_empty() && Some(*login) != pr_author)
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Signed whole minutes from `from` to `to`, truncated toward zero
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_minutes()
}
