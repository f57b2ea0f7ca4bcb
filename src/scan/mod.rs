//! Rate-limit-aware search for pull requests that touch test files.
//!
//! The engine is layered leaves first: [`is_test_file`] classifies a path,
//! [`FilePaginator`] walks one pull request's changed files,
//! [`PullRequestPaginator`] walks a repository's pull requests newest first,
//! and [`Scanner`] drives both across a list of repositories, consulting the
//! [`RateLimitGuard`](crate::github::RateLimitGuard) between repositories.
//!
//! Rate limit snapshots travel upward as return values; no state is shared
//! between layers.

mod classifier;
mod files;
mod orchestrator;
mod pull_requests;
mod sink;

pub use classifier::is_test_file;
pub use files::{FilePaginator, FileSearch, find_test_file};
pub use orchestrator::{ScanAborted, ScanReport, ScanSettings, Scanner, SkippedRepository, StopReason};
pub use pull_requests::{PullRequestPaginator, RepositorySearch, SearchSettings, search_repository};
pub use sink::MatchSink;

use thiserror::Error;

use crate::github::{RateLimitStatus, ScanError};

/// A search that failed, with the most recent snapshot seen before failing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{error}")]
pub struct SearchFailure {
    /// What went wrong.
    #[source]
    pub error: ScanError,
    /// Latest rate limit snapshot observed by the failed search, if any.
    pub last_rate_limit: Option<RateLimitStatus>,
}

impl SearchFailure {
    /// Wraps an error with the snapshot known at the time.
    #[must_use]
    pub const fn new(error: ScanError, last_rate_limit: Option<RateLimitStatus>) -> Self {
        Self {
            error,
            last_rate_limit,
        }
    }

    /// Falls back to `rate_limit` when the failure carries no snapshot.
    #[must_use]
    pub fn or_rate_limit(self, rate_limit: Option<RateLimitStatus>) -> Self {
        Self {
            last_rate_limit: self.last_rate_limit.or(rate_limit),
            ..self
        }
    }
}

#[cfg(test)]
mod test_gateway;
