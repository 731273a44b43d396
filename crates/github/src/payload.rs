//! Pull request payload parsing
//!
//! Accepts either a bare JSON array of pull request nodes or the full GraphQL
//! response envelope (`data.repository.pullRequests.nodes`).

use common::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::graphql::{Connection, PullRequest};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<EnvelopeData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(default)]
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_requests: Connection<PullRequest>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Parse a pull request payload
pub fn parse_pull_requests(body: &[u8]) -> Result<Vec<PullRequest>> {
    let value: Value = serde_json::from_slice(body)?;

    match value {
        Value::Array(_) => {
            let prs: Vec<PullRequest> = serde_json::from_value(value)?;
            debug!("Parsed {} pull requests from bare array", prs.len());
            Ok(prs)
        }
        Value::Object(_) => {
            let envelope: Envelope = serde_json::from_value(value)?;
            from_envelope(envelope)
        }
        other => Err(Error::MalformedInput(format!(
            "expected an array or a GraphQL response, got {}",
            json_kind(&other)
        ))),
    }
}

fn from_envelope(envelope: Envelope) -> Result<Vec<PullRequest>> {
    let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();

    match envelope.data.and_then(|d| d.repository) {
        Some(repository) => {
            if !messages.is_empty() {
                // Partial data: keep what came back
                warn!("GraphQL response carried errors: {}", messages.join("; "));
            }
            let prs = repository.pull_requests.nodes;
            debug!("Parsed {} pull requests from GraphQL response", prs.len());
            Ok(prs)
        }
        None if !messages.is_empty() => Err(Error::Upstream(messages.join("; "))),
        None => Err(Error::Upstream("repository not found".to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
