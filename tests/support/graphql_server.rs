//! Wiremock helpers serving the scanner's two GraphQL queries.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a pull request page for `owner/name` requested after `after`.
///
/// `expected_calls` is verified when the server is dropped.
pub async fn mount_pull_requests(
    server: &MockServer,
    owner: &str,
    name: &str,
    after: Option<&str>,
    body: Value,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("pullRequests("))
        .and(body_partial_json(json!({
            "variables": { "owner": owner, "name": name, "after": after }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mounts a changed-files page for pull request `number` requested after
/// `after`.
pub async fn mount_files(
    server: &MockServer,
    owner: &str,
    name: &str,
    number: u64,
    after: Option<&str>,
    body: Value,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("pullRequest(number"))
        .and(body_partial_json(json!({
            "variables": { "owner": owner, "name": name, "number": number, "after": after }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mounts a catch-all for `owner/name` that must never be hit.
pub async fn forbid_repository(server: &MockServer, owner: &str, name: &str) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "owner": owner, "name": name }
        })))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// Number of requests the server received.
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len())
}
