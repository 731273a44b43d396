//! GitHub GraphQL pull request records and payload parsing

pub mod graphql;
pub mod payload;

pub use graphql::{Actor, Connection, PrState, PullRequest, Review, ReviewRequest, ReviewState};
pub use payload::parse_pull_requests;
