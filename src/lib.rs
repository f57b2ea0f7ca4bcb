//! Prscout library crate: a rate-limit-aware scan of GitHub pull requests
//! for changes to Kotlin and Java test files.
//!
//! The library walks each repository's pull requests newest first through
//! the GitHub GraphQL API, stops at the first pull request that touches a
//! test file, records the match, and ends the whole run before the shared
//! API budget runs dry.

pub mod config;
pub mod github;
pub mod scan;
pub mod tabular;

pub use config::ScoutConfig;
pub use github::{
    OctocrabGraphqlGateway, PersonalAccessToken, PullRequestGateway, RateLimitGuard,
    RateLimitStatus, RepositoryLocator, RetryPolicy, RetryingGateway, ScanError, TestMatch,
};
pub use scan::{MatchSink, ScanAborted, ScanReport, ScanSettings, Scanner, StopReason};
pub use tabular::{CsvMatchSink, read_repository_urls};
