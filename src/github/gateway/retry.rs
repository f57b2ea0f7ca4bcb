//! Bounded retry of transient gateway failures.
//!
//! Only [`ScanError::is_transient`] failures (transport errors and 5xx
//! responses) are retried. Permanent failures surface on the first attempt.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::github::error::ScanError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{FileChange, PullRequestSummary};
use crate::github::pagination::{Page, PageCursor, PageSize};

use super::PullRequestGateway;

/// Retries allowed after the first attempt by default.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Delay before the first retry by default.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
/// Upper bound for any single backoff delay by default.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(8);

const MAX_BACKOFF_EXPONENT: u32 = 8;

/// Retry count and exponential backoff bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay to wait before retry number `attempt` (zero-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let factor = 1_u32 << attempt.min(MAX_BACKOFF_EXPONENT);
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay.max(self.base_delay))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

/// Gateway decorator applying a [`RetryPolicy`] to every call.
pub struct RetryingGateway<Gateway> {
    inner: Gateway,
    policy: RetryPolicy,
}

impl<Gateway> RetryingGateway<Gateway>
where
    Gateway: PullRequestGateway,
{
    /// Wraps `inner` with `policy`.
    #[must_use]
    pub const fn new(inner: Gateway, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Returns the policy in force.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }

    async fn with_retry<T, Call, Fut>(&self, operation: &str, mut call: Call) -> Result<T, ScanError>
    where
        Call: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, ScanError>> + Send,
        T: Send,
    {
        let mut attempt = 0_u32;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for(attempt);
                    attempt += 1;
                    tracing::warn!(
                        operation,
                        attempt,
                        max_retries = self.policy.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "transient GitHub failure; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[async_trait]
impl<Gateway> PullRequestGateway for RetryingGateway<Gateway>
where
    Gateway: PullRequestGateway,
{
    async fn pull_request_page(
        &self,
        repository: &RepositoryLocator,
        cursor: &PageCursor,
        page_size: PageSize,
    ) -> Result<Page<PullRequestSummary>, ScanError> {
        self.with_retry("list pull requests", || {
            self.inner.pull_request_page(repository, cursor, page_size)
        })
        .await
    }

    async fn changed_files_page(
        &self,
        repository: &RepositoryLocator,
        number: u64,
        cursor: &PageCursor,
        page_size: PageSize,
    ) -> Result<Page<FileChange>, ScanError> {
        self.with_retry("list changed files", || {
            self.inner
                .changed_files_page(repository, number, cursor, page_size)
        })
        .await
    }
}
