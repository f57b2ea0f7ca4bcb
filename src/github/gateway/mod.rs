//! Gateways for paging through pull requests and their changed files.
//!
//! This module provides the trait-based seam between the scan engine and the
//! GitHub GraphQL API. The trait enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests and [`RetryingGateway`] adds the
//! transient-failure retry policy on top of any implementation.

mod client;
mod error_mapping;
mod graphql;
mod http_utils;
mod queries;
mod retry;

pub use graphql::OctocrabGraphqlGateway;
pub use retry::{RetryPolicy, RetryingGateway};

use async_trait::async_trait;

use crate::github::error::ScanError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{FileChange, PullRequestSummary};
use crate::github::pagination::{Page, PageCursor, PageSize};

/// Gateway that can page through a repository's pull requests and files.
///
/// Each call is one round trip and returns the page together with the rate
/// limit snapshot reported in the same response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch one page of pull requests, newest first.
    async fn pull_request_page(
        &self,
        repository: &RepositoryLocator,
        cursor: &PageCursor,
        page_size: PageSize,
    ) -> Result<Page<PullRequestSummary>, ScanError>;

    /// Fetch one page of the files changed by pull request `number`.
    async fn changed_files_page(
        &self,
        repository: &RepositoryLocator,
        number: u64,
        cursor: &PageCursor,
        page_size: PageSize,
    ) -> Result<Page<FileChange>, ScanError>;
}
