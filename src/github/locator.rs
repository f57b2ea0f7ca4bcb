//! URL parsing and identity wrappers for repository scanning.

use std::fmt;

use url::Url;

use super::error::ScanError;

/// Web host repository URLs are expected to use.
pub const DEFAULT_WEB_HOST: &str = "github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ScanError> {
        if value.is_empty() {
            return Err(ScanError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ScanError> {
        if value.is_empty() {
            return Err(ScanError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ScanError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ScanError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Repository identified by owner and name.
///
/// # Example
///
/// ```
/// use prscout::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/octo/repo/issues", "github.com")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator from owner and repository name strings.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::MissingPathSegments` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, ScanError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// Parses a repository URL of the form `scheme://host/owner/name[/...]`.
    ///
    /// The URL authority (host plus any explicit port) must equal
    /// `expected_host`, compared case-insensitively. Path segments after the
    /// repository name are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidUrl` when parsing fails,
    /// `ScanError::UnsupportedHost` for a foreign host, and
    /// `ScanError::MissingPathSegments` when fewer than two path segments are
    /// present.
    pub fn parse(input: &str, expected_host: &str) -> Result<Self, ScanError> {
        let parsed = Url::parse(input.trim())
            .map_err(|error| ScanError::InvalidUrl(format!("{input}: {error}")))?;

        let authority = authority(&parsed)
            .ok_or_else(|| ScanError::InvalidUrl(format!("{input}: URL must include a host")))?;

        if !authority.eq_ignore_ascii_case(expected_host) {
            return Err(ScanError::UnsupportedHost {
                host: authority,
                expected: expected_host.to_owned(),
            });
        }

        let mut segments = parsed
            .path_segments()
            .ok_or(ScanError::MissingPathSegments)?
            .filter(|segment| !segment.is_empty());

        let owner = segments.next().ok_or(ScanError::MissingPathSegments)?;
        let repository = segments.next().ok_or(ScanError::MissingPathSegments)?;

        Self::from_owner_repo(owner, repository)
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.repository.as_str())
    }
}

fn authority(parsed: &Url) -> Option<String> {
    let host = parsed.host_str()?;
    Some(parsed.port().map_or_else(
        || host.to_owned(),
        |port| format!("{host}:{port}"),
    ))
}
