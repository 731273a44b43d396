//! GitHub GraphQL record types
//!
//! These mirror the `pullRequests` nodes returned by the GraphQL API.
//! Timestamps are kept as the raw ISO-8601 strings so that a malformed value
//! fails the aggregation pass that reads it rather than the whole upload.

use chrono::{DateTime, Utc};
use common::{Error, Result};
use serde::{Deserialize, Serialize};

/// GraphQL connection wrapper (`{ "nodes": [...] }`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// A user, bot or mannequin (`author { login }`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

/// Pull request node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub created_at: String,
    pub merged_at: Option<String>,
    #[serde(default)]
    pub state: Option<PrState>,
    /// Absent for deleted accounts
    #[serde(default)]
    pub author: Option<Actor>,
    #[serde(default)]
    pub reviews: Connection<Review>,
    #[serde(default)]
    pub review_requests: Connection<ReviewRequest>,
}

impl PullRequest {
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        parse_timestamp("createdAt", &self.created_at)
    }

    /// `None` while the PR is unmerged
    pub fn merged_at(&self) -> Result<Option<DateTime<Utc>>> {
        self.merged_at
            .as_deref()
            .map(|raw| parse_timestamp("mergedAt", raw))
            .transpose()
    }

    pub fn author_login(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.login.as_str())
    }
}

/// Review node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: Option<String>,
    pub created_at: String,
    pub state: ReviewState,
    #[serde(default)]
    pub author: Option<Actor>,
}

impl Review {
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        parse_timestamp("reviews.createdAt", &self.created_at)
    }

    pub fn author_login(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.login.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
}

impl ReviewState {
    /// Approvals and change requests unblock or block a merge; comments and
    /// dismissals do not.
    pub fn is_actionable(self) -> bool {
        matches!(self, ReviewState::Approved | ReviewState::ChangesRequested)
    }
}

/// Review request node; carried for completeness, not used by aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub requested_reviewer: Option<Actor>,
}

fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_pull_request_node() {
        let json = r#"{
            "id": "PR_kwDO",
            "number": 42,
            "title": "Add cache",
            "createdAt": "2024-01-01T00:00:00Z",
            "mergedAt": "2024-01-01T03:00:00Z",
            "state": "MERGED",
            "author": { "login": "alice" },
            "reviews": { "nodes": [
                { "id": "R1", "createdAt": "2024-01-01T02:00:00Z", "state": "APPROVED", "author": { "login": "bob" } }
            ] },
            "reviewRequests": { "nodes": [ { "id": "RR1", "requestedReviewer": null } ] }
        }"#;

        let pr: PullRequest = serde_json::from_str(json).unwrap();

        assert_eq!(pr.number, 42);
        assert_eq!(pr.author_login(), Some("alice"));
        assert_eq!(pr.state, Some(PrState::Merged));
        assert_eq!(pr.reviews.nodes.len(), 1);
        assert_eq!(pr.reviews.nodes[0].state, ReviewState::Approved);
        assert!(pr.review_requests.nodes[0].requested_reviewer.is_none());
        assert_eq!(
            pr.merged_at().unwrap(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_connections_default_to_empty() {
        let json = r#"{ "id": "x", "number": 1, "title": "t", "createdAt": "2024-01-01T00:00:00Z", "mergedAt": null }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();

        assert!(pr.reviews.nodes.is_empty());
        assert!(pr.review_requests.nodes.is_empty());
        assert!(pr.author.is_none());
        assert_eq!(pr.merged_at().unwrap(), None);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{ "id": "x", "title": "t", "createdAt": "2024-01-01T00:00:00Z" }"#;
        assert!(serde_json::from_str::<PullRequest>(json).is_err());
    }

    #[test]
    fn test_offset_timestamps_normalised_to_utc() {
        let review = Review {
            id: None,
            created_at: "2024-01-01T02:00:00+02:00".to_string(),
            state: ReviewState::Commented,
            author: None,
        };
        assert_eq!(
            review.created_at().unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_invalid_timestamp_reports_field() {
        let review = Review {
            id: None,
            created_at: "yesterday".to_string(),
            state: ReviewState::Approved,
            author: None,
        };
        assert_eq!(
            review.created_at(),
            Err(Error::InvalidTimestamp {
                field: "reviews.createdAt",
                value: "yesterday".to_string()
            })
        );
    }

    #[test]
    fn test_actionable_states() {
        assert!(ReviewState::Approved.is_actionable());
        assert!(ReviewState::ChangesRequested.is_actionable());
        assert!(!ReviewState::Commented.is_actionable());
        assert!(!ReviewState::Dismissed.is_actionable());
        assert!(!ReviewState::Pending.is_actionable());
    }
}
