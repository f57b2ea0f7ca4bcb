//! Octocrab client construction helpers for gateway implementations.

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::github::error::ScanError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// Octocrab's own retry layer is disabled; retries are owned by
/// [`super::RetryingGateway`].
///
/// # Errors
///
/// Returns `ScanError::InvalidUrl` when the base URI cannot be parsed or
/// `ScanError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, ScanError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| ScanError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .add_retry_config(RetryConfig::None)
        .base_uri(base_uri)
        .map_err(|error| ScanError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
