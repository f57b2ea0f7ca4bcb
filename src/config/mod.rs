//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prscout.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRSCOUT_TOKEN`, `PRSCOUT_INPUT`, ... or
//!    legacy `GITHUB_TOKEN` for the token
//! 4. **Command-line arguments** – `--token`/`-t`, `--input`/`-i`, ...
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! input = "github_auto_repos.csv"
//! url_column = "issue_tracker"
//! output = "repo_test_results.csv"
//! stop_threshold = 100
//! max_retries = 3
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::gateway::RetryPolicy;
use crate::github::locator::DEFAULT_WEB_HOST;
use crate::github::pagination::{DEFAULT_PAGE_SIZE, PageSize};
use crate::github::rate_limit::{DEFAULT_STOP_THRESHOLD, RateLimitGuard};
use crate::github::{PersonalAccessToken, ScanError};
use crate::scan::{ScanSettings, SearchSettings};

/// Repository list read when no input is configured.
pub const DEFAULT_INPUT: &str = "github_auto_repos.csv";
/// Column holding repository URLs by default.
pub const DEFAULT_URL_COLUMN: &str = "issue_tracker";
/// Result file written when no output is configured.
pub const DEFAULT_OUTPUT: &str = "repo_test_results.csv";
/// GitHub REST/GraphQL API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;
const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 8_000;

/// Scanner configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use prscout::ScoutConfig;
///
/// let config = ScoutConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// let settings = config.scan_settings().expect("valid settings");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRSCOUT",
    discovery(
        dotfile_name = ".prscout.toml",
        config_file_name = "prscout.toml",
        app_name = "prscout"
    )
)]
pub struct ScoutConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PRSCOUT_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// CSV file listing the repositories to scan.
    #[ortho_config(cli_short = 'i')]
    pub input: String,

    /// Header of the input column holding repository URLs.
    #[ortho_config(cli_short = 'c')]
    pub url_column: String,

    /// CSV file matches are appended to.
    #[ortho_config(cli_short = 'o')]
    pub output: String,

    /// API root; the GraphQL endpoint is `{api_base}/graphql`.
    #[ortho_config()]
    pub api_base: String,

    /// Host every repository URL must point at.
    #[ortho_config()]
    pub web_host: String,

    /// Pull requests requested per page (1-100).
    #[ortho_config()]
    pub pr_page_size: u8,

    /// Changed files requested per page (1-100).
    #[ortho_config()]
    pub file_page_size: u8,

    /// The run stops once `remaining <= stop_threshold` after a repository.
    #[ortho_config()]
    pub stop_threshold: u32,

    /// Retries allowed for a transient failure.
    #[ortho_config()]
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds.
    #[ortho_config()]
    pub retry_base_delay_ms: u64,

    /// Upper bound for a single retry delay, in milliseconds.
    #[ortho_config()]
    pub retry_max_delay_ms: u64,

    /// Skips a repository instead of aborting when retries run out.
    ///
    /// Can be provided via:
    /// - CLI: `--skip-failed-repositories`
    /// - Config file: `skip_failed_repositories = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the environment.
    #[ortho_config()]
    pub skip_failed_repositories: bool,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            token: None,
            input: DEFAULT_INPUT.to_owned(),
            url_column: DEFAULT_URL_COLUMN.to_owned(),
            output: DEFAULT_OUTPUT.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            web_host: DEFAULT_WEB_HOST.to_owned(),
            pr_page_size: DEFAULT_PAGE_SIZE,
            file_page_size: DEFAULT_PAGE_SIZE,
            stop_threshold: DEFAULT_STOP_THRESHOLD,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            retry_max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
            skip_failed_repositories: false,
        }
    }
}

impl ScoutConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, ScanError> {
        let value = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(ScanError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Page sizes for the repository search.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] when a page size is outside
    /// 1-100.
    pub fn search_settings(&self) -> Result<SearchSettings, ScanError> {
        Ok(SearchSettings {
            pull_request_page_size: page_size("pr_page_size", self.pr_page_size)?,
            file_page_size: page_size("file_page_size", self.file_page_size)?,
        })
    }

    /// Budget guard built from `stop_threshold`.
    #[must_use]
    pub const fn rate_limit_guard(&self) -> RateLimitGuard {
        RateLimitGuard::new(self.stop_threshold)
    }

    /// Retry policy for transient failures.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }

    /// Settings for a scan run.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] when a page size is invalid or
    /// `web_host` is blank.
    pub fn scan_settings(&self) -> Result<ScanSettings, ScanError> {
        let web_host = self.web_host.trim();
        if web_host.is_empty() {
            return Err(ScanError::Configuration {
                message: "web_host must not be empty".to_owned(),
            });
        }

        Ok(ScanSettings {
            web_host: web_host.to_owned(),
            search: self.search_settings()?,
            guard: self.rate_limit_guard(),
            skip_failed_repositories: self.skip_failed_repositories,
        })
    }
}

fn page_size(field: &str, value: u8) -> Result<PageSize, ScanError> {
    PageSize::new(value).map_err(|error| ScanError::Configuration {
        message: format!("{field}: {error}"),
    })
}

#[cfg(test)]
mod tests;
