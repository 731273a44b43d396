#[cfg(test)]
mod tests {
    use crate::filter::MetricFilter;
    use crate::pipeline::PipelineConfig;
    use crate::scheduler::*;
    use chrono::{DateTime, Duration, Utc};
    use common::models::{DataSizeLevel, UserRole};
    use github::{Actor, Connection, PullRequest, Review, ReviewState};

    fn ts(at: DateTime<Utc>) -> String {
        at.to_rfc3339()
    }

    fn actor(login: &str) -> Option<Actor> {
        Some(Actor {
            login: login.to_string(),
        })
    }

    /// Merged PR created `days_ago`, approved after `review_mins`, merged
    /// `merge_mins` later
    fn merged_pr(
        number: i64,
        days_ago: i64,
        author: &str,
        reviewer: &str,
        review_mins: i64,
        merge_mins: i64,
    ) -> PullRequest {
        let created = Utc::now() - Duration::days(days_ago);
        let reviewed = created + Duration::minutes(review_mins);
        let merged = reviewed + Duration::minutes(merge_mins);
        PullRequest {
            id: format!("PR_{}", number),
            number,
            title: format!("PR {}", number),
            created_at: ts(created),
            merged_at: Some(ts(merged)),
            state: None,
            author: actor(author),
            reviews: Connection {
                nodes: vec![Review {
                    id: None,
                    created_at: ts(reviewed),
                    state: ReviewState::Approved,
                    author: actor(reviewer),
                }],
            },
            review_requests: Connection::default(),
        }
    }

    fn sample() -> Vec<PullRequest> {
        vec![
            merged_pr(1, 3, "alice", "bob", 120, 60),
            merged_pr(2, 2, "carol", "alice", 30, 30),
            merged_pr(3, 1, "alice", "carol", 60, 10),
        ]
    }

    #[tokio::test]
    async fn test_starts_idle_and_empty() {
        let scheduler = MetricsScheduler::default();
        let snapshot = scheduler.snapshot().await;

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(snapshot.weekly.is_empty());
        assert!(snapshot.metrics.is_empty());
        assert_eq!(snapshot.status.data_size, 0);
        assert_eq!(snapshot.status.error, None);
    }

    #[tokio::test]
    async fn test_submit_marks_processing_until_pass_completes() {
        let scheduler = MetricsScheduler::default();

        scheduler.submit(sample()).await;

        // Current-thread runtime: the pass has not started yet
        assert_eq!(scheduler.state(), SchedulerState::Scheduled);
        assert!(scheduler.is_processing());
        assert_eq!(scheduler.status().await.data_size, 3);

        scheduler.wait_idle().await;

        let snapshot = scheduler.snapshot().await;
        assert!(!snapshot.status.processing);
        assert_eq!(snapshot.metrics.len(), 3);
        assert_eq!(snapshot.summary.total_prs, 3);
        assert_eq!(
            snapshot.weekly.iter().map(|w| w.total_prs).sum::<usize>(),
            3
        );
    }

    #[tokio::test]
    async fn test_old_prs_are_excluded_from_data_size() {
        let scheduler = MetricsScheduler::default();
        let mut prs = sample();
        prs.push(merged_pr(4, 90, "dan", "erin", 10, 10));

        scheduler.submit(prs).await;
        scheduler.wait_idle().await;

        let snapshot = scheduler.snapshot().await;
        assert_eq!(snapshot.status.data_size, 3);
        assert_eq!(snapshot.status.data_size_level, DataSizeLevel::None);
        assert!(!snapshot.reviewees.contains(&"dan".to_string()));
    }

    #[tokio::test]
    async fn test_failed_pass_discards_previous_results() {
        let scheduler = MetricsScheduler::default();
        scheduler.submit(sample()).await;
        scheduler.wait_idle().await;
        assert_eq!(scheduler.snapshot().await.metrics.len(), 3);

        let mut broken = sample();
        broken[1].merged_at = Some("not-a-timestamp".to_string());
        scheduler.submit(broken).await;
        scheduler.wait_idle().await;

        let snapshot = scheduler.snapshot().await;
        assert!(snapshot.metrics.is_empty());
        assert!(snapshot.weekly.is_empty());
        assert!(snapshot.weekly_users.is_empty());
        assert!(snapshot
            .status
            .error
            .as_deref()
            .unwrap()
            .contains("mergedAt"));
        assert_eq!(snapshot.status.state, SchedulerState::Idle);
    }

    #[tokio::test]
    async fn test_prefilter_failure_reports_error_without_scheduling() {
        let scheduler = MetricsScheduler::default();
        let mut broken = sample();
        broken[0].created_at = "garbage".to_string();

        scheduler.submit(broken).await;

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        let status = scheduler.status().await;
        assert_eq!(status.data_size, 0);
        assert!(status.error.is_some());
    }

    #[tokio::test]
    async fn test_successful_pass_clears_previous_error() {
        let scheduler = MetricsScheduler::default();
        let mut broken = sample();
        broken[0].created_at = "garbage".to_string();
        scheduler.submit(broken).await;

        scheduler.submit(sample()).await;
        scheduler.wait_idle().await;

        assert_eq!(scheduler.status().await.error, None);
    }

    #[tokio::test]
    async fn test_empty_input_is_not_an_error() {
        let scheduler = MetricsScheduler::default();

        scheduler.submit(Vec::new()).await;
        scheduler.wait_idle().await;

        let snapshot = scheduler.snapshot().await;
        assert_eq!(snapshot.status.error, None);
        assert!(snapshot.weekly.is_empty());
        assert_eq!(snapshot.summary.total_prs, 0);
    }

    #[tokio::test]
    async fn test_latest_submission_wins() {
        let scheduler = MetricsScheduler::default();

        let first = scheduler.submit(sample()).await;
        let second = scheduler
            .submit(vec![merged_pr(9, 1, "zoe", "yuri", 5, 5)])
            .await;
        scheduler.wait_idle().await;

        assert!(second > first);
        let snapshot = scheduler.snapshot().await;
        assert_eq!(snapshot.status.generation, second);
        assert_eq!(snapshot.metrics.len(), 1);
        assert_eq!(snapshot.metrics[0].pr_number, 9);
    }

    #[tokio::test]
    async fn test_filter_narrows_metrics_but_not_summaries() {
        let scheduler = MetricsScheduler::default();
        scheduler.submit(sample()).await;
        scheduler.wait_idle().await;
        let unfiltered = scheduler.snapshot().await;

        scheduler.set_reviewee(Some("nobody".to_string())).await;
        let filtered = scheduler.snapshot().await;

        assert!(filtered.metrics.is_empty());
        assert_eq!(filtered.weekly, unfiltered.weekly);
        assert_eq!(filtered.weekly_users, unfiltered.weekly_users);

        scheduler.clear_filter().await;
        assert_eq!(scheduler.snapshot().await.metrics, unfiltered.metrics);
    }

    #[tokio::test]
    async fn test_filter_fields_are_independent() {
        let scheduler = MetricsScheduler::default();
        scheduler.submit(sample()).await;
        scheduler.wait_idle().await;

        scheduler.set_reviewee(Some("alice".to_string())).await;
        scheduler.set_reviewer(Some("carol".to_string())).await;
        let numbers: Vec<_> = scheduler
            .snapshot()
            .await
            .metrics
            .iter()
            .map(|m| m.pr_number)
            .collect();
        assert_eq!(numbers, vec![3]);

        scheduler.set_reviewee(None).await;
        assert_eq!(
            scheduler.filter().await,
            MetricFilter {
                reviewee: None,
                reviewer: Some("carol".to_string()),
            }
        );
        assert_eq!(scheduler.snapshot().await.metrics.len(), 1);
    }

    #[tokio::test]
    async fn test_recompute_flag_applies_filter_to_summaries() {
        let scheduler = MetricsScheduler::new(PipelineConfig {
            filter_recomputes_summaries: true,
            ..PipelineConfig::default()
        });
        scheduler.submit(sample()).await;
        scheduler.wait_idle().await;

        scheduler
            .set_filter(MetricFilter {
                reviewee: Some("carol".to_string()),
                reviewer: None,
            })
            .await;
        let snapshot = scheduler.snapshot().await;

        assert_eq!(snapshot.summary.total_prs, 1);
        assert!(snapshot
            .weekly_users
            .iter()
            .all(|w| w.reviewees.iter().all(|r| r.reviewee == "carol")));
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_reviewees() {
        let scheduler = MetricsScheduler::default();
        scheduler.submit(sample()).await;
        scheduler.wait_idle().await;

        let board = scheduler.leaderboard(UserRole::Reviewee, 1).await;

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].user, "alice");
        assert_eq!(board[0].count, 2);
    }

    #[tokio::test]
    async fn test_blank_filter_names_clear_the_filter() {
        let scheduler = MetricsScheduler::default();
        scheduler.submit(sample()).await;
        scheduler.wait_idle().await;

        scheduler.set_reviewee(Some(String::new())).await;
        scheduler.set_reviewer(Some(String::new())).await;
        let snapshot = scheduler.snapshot().await;

        assert_eq!(snapshot.filter, MetricFilter::default());
        assert_eq!(snapshot.metrics.len(), 3);
    }
}
