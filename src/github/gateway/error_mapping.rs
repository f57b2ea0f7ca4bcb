//! Error mapping helpers for the Octocrab GitHub gateway.

use http::StatusCode;

use crate::github::error::ScanError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether a failed response reports an exhausted rate limit, based
/// on the HTTP status and the message or documentation URL.
fn is_rate_limit_error(
    status: StatusCode,
    message: &str,
    documentation_url: Option<&str>,
) -> bool {
    let is_rate_limit_status = matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = message.to_lowercase().contains("rate limit")
        || documentation_url.is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ScanError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return classify_status(
            operation,
            source.status_code,
            &source.message,
            source.documentation_url.as_deref(),
        );
    }

    if is_network_error(error) {
        return ScanError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ScanError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success HTTP status to an error.
///
/// The status decides the class; `message` is only descriptive, so a 5xx
/// with an empty or non-JSON body is still a transient server error.
pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    message: Option<String>,
) -> ScanError {
    let detail = message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("no error message")
            .to_owned()
    });
    classify_status(operation, status, &detail, None)
}

fn classify_status(
    operation: &str,
    status: StatusCode,
    detail: &str,
    documentation_url: Option<&str>,
) -> ScanError {
    let message = format!("{operation} failed with status {status}: {detail}");

    if is_rate_limit_error(status, detail, documentation_url) {
        ScanError::RateLimitExceeded { message }
    } else if is_auth_failure(status) {
        ScanError::Authentication { message }
    } else if status.is_server_error() {
        ScanError::ServerError { message }
    } else {
        ScanError::Api { message }
    }
}

/// Maps the `errors` array of a GraphQL response.
///
/// A `NOT_FOUND` error means the repository itself is missing or hidden;
/// `RATE_LIMITED` means the budget ran out. Everything else is a query error.
pub(super) fn map_graphql_errors(
    errors: &[GraphQlErrorDetail<'_>],
    owner: &str,
    name: &str,
) -> ScanError {
    let message = errors
        .iter()
        .map(|error| error.message)
        .collect::<Vec<_>>()
        .join("; ");

    if errors
        .iter()
        .any(|error| error.error_type == Some("RATE_LIMITED"))
    {
        return ScanError::RateLimitExceeded { message };
    }

    if errors
        .iter()
        .any(|error| error.error_type == Some("NOT_FOUND"))
    {
        return ScanError::RepositoryNotFound {
            owner: owner.to_owned(),
            name: name.to_owned(),
        };
    }

    ScanError::GraphQl { message }
}

/// Borrowed view of one GraphQL error.
pub(super) struct GraphQlErrorDetail<'error> {
    pub(super) error_type: Option<&'error str>,
    pub(super) message: &'error str,
}
