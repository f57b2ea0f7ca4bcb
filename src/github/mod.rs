//! GitHub GraphQL access for the pull request scanner.
//!
//! This module wraps Octocrab's GraphQL endpoint behind the
//! [`PullRequestGateway`] seam, parses repository URLs, models the pages and
//! rate limit snapshots returned by each query, and maps transport and query
//! failures into [`ScanError`] variants the scan engine can classify.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use error::ScanError;
pub use gateway::{OctocrabGraphqlGateway, PullRequestGateway, RetryPolicy, RetryingGateway};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{ChangeType, FileChange, PullRequestState, PullRequestSummary, TestMatch};
pub use pagination::{CursorState, Page, PageCursor, PageInfo, PageSize};
pub use rate_limit::{RateLimitGuard, RateLimitStatus};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;
