//! Sequential scan over a list of repository URLs.

use thiserror::Error;

use crate::github::locator::DEFAULT_WEB_HOST;
use crate::github::{
    PullRequestGateway, RateLimitGuard, RateLimitStatus, RepositoryLocator, ScanError, TestMatch,
};

use super::SearchFailure;
use super::pull_requests::{RepositorySearch, SearchSettings, search_repository};
use super::sink::MatchSink;

/// Settings that shape a scan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Host every repository URL must point at.
    pub web_host: String,
    /// Page sizes for the per-repository search.
    pub search: SearchSettings,
    /// Budget guard consulted after each repository.
    pub guard: RateLimitGuard,
    /// Skip a repository instead of aborting when transient failures
    /// outlast the retry policy.
    pub skip_failed_repositories: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            web_host: DEFAULT_WEB_HOST.to_owned(),
            search: SearchSettings::default(),
            guard: RateLimitGuard::default(),
            skip_failed_repositories: false,
        }
    }
}

/// Why a scan run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every input URL was processed.
    InputExhausted,
    /// The budget guard fired after `repository`.
    RateLimitBudget {
        /// Repository whose search produced the stopping snapshot.
        repository: String,
        /// The snapshot that triggered the stop.
        rate_limit: RateLimitStatus,
    },
}

/// An input row that was not searched to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRepository {
    /// URL as read from the input.
    pub url: String,
    /// Why it was skipped.
    pub reason: ScanError,
}

/// Summary of a completed scan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Repositories searched to completion.
    pub repositories_scanned: usize,
    /// Matches recorded, in input order.
    pub matches: Vec<TestMatch>,
    /// Rows skipped with a warning.
    pub skipped: Vec<SkippedRepository>,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Most recent snapshot seen during the run.
    pub last_rate_limit: Option<RateLimitStatus>,
}

impl ScanReport {
    const fn new() -> Self {
        Self {
            repositories_scanned: 0,
            matches: Vec::new(),
            skipped: Vec::new(),
            stop_reason: StopReason::InputExhausted,
            last_rate_limit: None,
        }
    }
}

/// A scan run that ended on a fatal error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("scan aborted while processing {repository}: {error}")]
pub struct ScanAborted {
    /// URL of the repository being processed.
    pub repository: String,
    /// The fatal error.
    #[source]
    pub error: ScanError,
    /// Most recent snapshot seen before the failure.
    pub last_rate_limit: Option<RateLimitStatus>,
}

enum RepositoryOutcome {
    Searched(RepositorySearch),
    Skipped {
        reason: ScanError,
        rate_limit: Option<RateLimitStatus>,
    },
}

/// Drives the per-repository search across an input list.
///
/// Repositories are processed strictly in order, one request at a time. After
/// each repository that produced a rate limit snapshot the guard is
/// consulted; when it fires, the remaining input is left untouched.
pub struct Scanner<'client, Gateway: ?Sized> {
    gateway: &'client Gateway,
    settings: ScanSettings,
}

impl<'client, Gateway> Scanner<'client, Gateway>
where
    Gateway: PullRequestGateway + ?Sized,
{
    /// Creates a scanner over `gateway`.
    #[must_use]
    pub const fn new(gateway: &'client Gateway, settings: ScanSettings) -> Self {
        Self { gateway, settings }
    }

    /// Returns the settings in force.
    #[must_use]
    pub const fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Scans each URL in order, recording matches in `sink` as they are found.
    ///
    /// # Errors
    ///
    /// Returns [`ScanAborted`] on the first fatal error: a permanent API
    /// failure, a sink failure, or a transient failure that outlasted the
    /// retry policy while `skip_failed_repositories` is off.
    pub async fn run<Urls, Sink>(
        &self,
        urls: Urls,
        sink: &mut Sink,
    ) -> Result<ScanReport, ScanAborted>
    where
        Urls: IntoIterator,
        Urls::Item: AsRef<str>,
        Sink: MatchSink + ?Sized,
    {
        let mut report = ScanReport::new();

        for url in urls {
            let url_text = url.as_ref();
            let outcome = self.process(url_text).await.map_err(|failure| ScanAborted {
                repository: url_text.to_owned(),
                error: failure.error,
                last_rate_limit: failure.last_rate_limit.or(report.last_rate_limit),
            })?;

            let snapshot = match outcome {
                RepositoryOutcome::Searched(search) => {
                    let searched = search.rate_limit;
                    Self::record_search(url_text, search, sink, &mut report)?;
                    searched
                }
                RepositoryOutcome::Skipped { reason, rate_limit } => {
                    tracing::warn!(url = url_text, %reason, "skipping repository");
                    report.skipped.push(SkippedRepository {
                        url: url_text.to_owned(),
                        reason,
                    });
                    rate_limit
                }
            };

            report.last_rate_limit = snapshot.or(report.last_rate_limit);
            if let Some(rate_limit) = snapshot.filter(|status| self.settings.guard.should_stop(status))
            {
                tracing::warn!(
                    url = url_text,
                    remaining = rate_limit.remaining(),
                    threshold = self.settings.guard.threshold(),
                    reset_at = %rate_limit.reset_at(),
                    reset_in_secs = rate_limit.seconds_until_reset(),
                    "rate limit budget reached; stopping scan"
                );
                report.stop_reason = StopReason::RateLimitBudget {
                    repository: url_text.to_owned(),
                    rate_limit,
                };
                break;
            }
        }

        tracing::info!(
            scanned = report.repositories_scanned,
            matches = report.matches.len(),
            skipped = report.skipped.len(),
            "scan finished"
        );
        Ok(report)
    }

    async fn process(&self, url: &str) -> Result<RepositoryOutcome, SearchFailure> {
        tracing::info!(url, "analyzing repository");
        let repository = match RepositoryLocator::parse(url, &self.settings.web_host) {
            Ok(repository) => repository,
            Err(reason) => {
                return Ok(RepositoryOutcome::Skipped {
                    reason,
                    rate_limit: None,
                });
            }
        };

        tracing::debug!(%repository, "searching repository");
        match search_repository(self.gateway, &repository, &self.settings.search).await {
            Ok(search) => Ok(RepositoryOutcome::Searched(search)),
            Err(failure) if self.is_skippable(&failure.error) => Ok(RepositoryOutcome::Skipped {
                reason: failure.error,
                rate_limit: failure.last_rate_limit,
            }),
            Err(failure) => Err(failure),
        }
    }

    const fn is_skippable(&self, error: &ScanError) -> bool {
        error.is_input_error() || (self.settings.skip_failed_repositories && error.is_transient())
    }

    fn record_search<Sink>(
        url: &str,
        search: RepositorySearch,
        sink: &mut Sink,
        report: &mut ScanReport,
    ) -> Result<(), ScanAborted>
    where
        Sink: MatchSink + ?Sized,
    {
        report.repositories_scanned += 1;

        if let Some(test_match) = search.test_match {
            sink.record(&test_match).map_err(|error| ScanAborted {
                repository: url.to_owned(),
                error,
                last_rate_limit: search.rate_limit.or(report.last_rate_limit),
            })?;
            tracing::info!(
                repository = %format_args!("{}/{}", test_match.owner, test_match.repository),
                pr_number = test_match.pr_number,
                test_file = %test_match.test_file,
                "recorded test match"
            );
            report.matches.push(test_match);
        } else {
            tracing::info!(
                url,
                pull_requests = search.pull_requests_checked,
                "no pull request touches a test file"
            );
        }

        if let Some(status) = search.rate_limit {
            tracing::info!(
                url,
                limit = status.limit(),
                cost = status.cost(),
                remaining = status.remaining(),
                reset_at = %status.reset_at(),
                "rate limit after repository"
            );
        }
        Ok(())
    }
}
