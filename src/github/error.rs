//! Error types exposed by the GitHub scanning layer.

use thiserror::Error;

/// Errors surfaced while parsing input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// The provided repository URL could not be parsed.
    #[error("repository URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository URL points at a host other than the expected one.
    #[error("repository URL host `{host}` is not `{expected}`")]
    UnsupportedHost {
        /// Host found in the URL.
        host: String,
        /// Host the scanner was configured for.
        expected: String,
    },

    /// The repository path is incomplete.
    #[error("repository URL must match /owner/repo")]
    MissingPathSegments,

    /// GitHub reported that the repository does not exist or is not visible.
    #[error("repository {owner}/{name} was not found")]
    RepositoryNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        name: String,
    },

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication client error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// GitHub answered with a 5xx status.
    #[error("GitHub server error: {message}")]
    ServerError {
        /// Status and message returned by GitHub.
        message: String,
    },

    /// The GraphQL endpoint reported query errors.
    #[error("GraphQL query failed: {message}")]
    GraphQl {
        /// Joined error messages from the `errors` array.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// A CSV file could not be read or written.
    #[error("CSV error: {message}")]
    Csv {
        /// Error detail from the CSV reader or writer.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Rate limit exceeded before the scanner could stop on its own.
    ///
    /// The last snapshot seen travels with the failure that wraps this error.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// Invalid pagination parameters or a malformed page.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },
}

impl ScanError {
    /// Returns true for failures worth retrying: transport errors and 5xx
    /// responses.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::ServerError { .. })
    }

    /// Returns true for problems with a single input row.
    ///
    /// These are logged and the repository is skipped; the run continues.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_)
                | Self::UnsupportedHost { .. }
                | Self::MissingPathSegments
                | Self::RepositoryNotFound { .. }
        )
    }
}
