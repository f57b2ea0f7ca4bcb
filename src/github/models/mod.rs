//! Data models for pull requests, changed files and test matches.
//!
//! Types prefixed with `Api` are internal deserialisation targets for the
//! GraphQL payloads; they convert into the public domain types below.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::locator::RepositoryLocator;
use super::rate_limit::RateLimitStatus;

#[cfg(feature = "test-support")]
pub mod test_support;

/// Pull request state as reported by GraphQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    /// Still open.
    #[default]
    Open,
    /// Closed without merging.
    Closed,
    /// Merged into the base branch.
    Merged,
    /// A state this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Pull request fields needed to describe a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: String,
    /// Description body; empty when none was written.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Open, closed or merged.
    pub state: PullRequestState,
    /// HTML URL of the pull request.
    pub url: String,
    /// Author login; `None` for deleted accounts.
    pub author: Option<String>,
    /// Whether the pull request was merged.
    pub merged: bool,
    /// Merge timestamp, if merged.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Kind of change a pull request makes to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// File added.
    Added,
    /// File contents changed.
    #[default]
    Modified,
    /// File removed.
    Deleted,
    /// File renamed.
    Renamed,
    /// File copied.
    Copied,
    /// File mode or other metadata changed.
    Changed,
    /// A change type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// One file touched by a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Repository-relative path.
    pub path: String,
    /// Lines added.
    #[serde(default)]
    pub additions: u64,
    /// Lines removed.
    #[serde(default)]
    pub deletions: u64,
    /// Kind of change.
    #[serde(default)]
    pub change_type: ChangeType,
}

/// First test file found for a repository; one row of the result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestMatch {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repository: String,
    /// Number of the pull request containing the test file.
    pub pr_number: u64,
    /// Title of that pull request.
    pub pr_title: String,
    /// HTML URL of that pull request.
    pub pr_url: String,
    /// Path of the matched test file.
    pub test_file: String,
}

impl TestMatch {
    /// Builds a match from the repository, pull request and matched path.
    #[must_use]
    pub fn new(
        repository: &RepositoryLocator,
        pull_request: &PullRequestSummary,
        test_file: impl Into<String>,
    ) -> Self {
        Self {
            owner: repository.owner().as_str().to_owned(),
            repository: repository.repository().as_str().to_owned(),
            pr_number: pull_request.number,
            pr_title: pull_request.title.clone(),
            pr_url: pull_request.url.clone(),
            test_file: test_file.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) body: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) state: PullRequestState,
    pub(crate) url: String,
    pub(crate) author: Option<ApiActor>,
    #[serde(default)]
    pub(crate) merged: bool,
    pub(crate) merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiActor {
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRateLimit {
    pub(crate) limit: u32,
    pub(crate) cost: u32,
    pub(crate) remaining: u32,
    pub(crate) reset_at: DateTime<Utc>,
}

impl From<ApiPullRequest> for PullRequestSummary {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title,
            body: value.body.unwrap_or_default(),
            created_at: value.created_at,
            state: value.state,
            url: value.url,
            author: value.author.and_then(|author| author.login),
            merged: value.merged,
            merged_at: value.merged_at,
        }
    }
}

impl From<ApiRateLimit> for RateLimitStatus {
    fn from(value: ApiRateLimit) -> Self {
        Self::new(value.limit, value.cost, value.remaining, value.reset_at)
    }
}
