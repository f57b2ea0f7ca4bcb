//! Shared HTTP utilities for gateway implementations.

use serde_json::Value;

/// Extracts a human-readable message from an error response body.
///
/// REST-style bodies carry a top-level `message`; GraphQL-style bodies carry
/// an `errors` array whose first `message` is used. Anything else, including
/// empty and HTML bodies, yields `None`.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    value
        .get("message")
        .or_else(|| {
            value
                .get("errors")
                .and_then(Value::as_array)
                .and_then(|errors| errors.first())
                .and_then(|error| error.get("message"))
        })
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}
