//! Test helpers for building pull request fixtures and GraphQL payloads.
//!
//! The JSON builders mirror the response shapes of the two scanner queries so
//! that Wiremock-backed tests can serve realistic pages.
//!
//! # Examples
//!
//! ```
//! use prscout::github::models::test_support::{files_response, pull_request};
//!
//! let summary = pull_request(3, "Add tests");
//! assert_eq!(summary.number, 3);
//!
//! let body = files_response(&["src/test/FooTest.kt"], None, 4999);
//! assert!(body["data"]["repository"]["pullRequest"]["files"]["edges"].is_array());
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value, json};

use super::{ChangeType, FileChange, PullRequestState, PullRequestSummary};
use crate::github::rate_limit::RateLimitStatus;

/// Fixed reset instant used by fixtures.
pub const FIXTURE_RESET_AT: &str = "2030-01-01T00:00:00Z";

fn fixture_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Creates a pull request summary whose creation time decreases as `number`
/// decreases, matching newest-first ordering.
#[must_use]
pub fn pull_request(number: u64, title: &str) -> PullRequestSummary {
    let offset = i64::try_from(number).unwrap_or(i64::MAX);
    PullRequestSummary {
        number,
        title: title.to_owned(),
        body: String::new(),
        created_at: fixture_epoch() + Duration::minutes(offset),
        state: PullRequestState::Open,
        url: format!("https://github.com/owner/repo/pull/{number}"),
        author: Some("contributor".to_owned()),
        merged: false,
        merged_at: None,
    }
}

/// Creates a modified-file change for `path`.
#[must_use]
pub fn file_change(path: &str) -> FileChange {
    FileChange {
        path: path.to_owned(),
        additions: 1,
        deletions: 0,
        change_type: ChangeType::Modified,
    }
}

/// Creates a rate limit snapshot with the given remaining points.
#[must_use]
pub fn rate_limit(remaining: u32) -> RateLimitStatus {
    let reset_at = DateTime::parse_from_rfc3339(FIXTURE_RESET_AT)
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or_default();
    RateLimitStatus::new(5000, 1, remaining, reset_at)
}

/// JSON `rateLimit` object with the given remaining points.
#[must_use]
pub fn rate_limit_json(remaining: u32) -> Value {
    json!({
        "limit": 5000,
        "cost": 1,
        "remaining": remaining,
        "resetAt": FIXTURE_RESET_AT
    })
}

fn page_info_json(end_cursor: Option<&str>) -> Value {
    json!({
        "endCursor": end_cursor,
        "hasNextPage": end_cursor.is_some()
    })
}

/// JSON body for a pull request page.
///
/// `numbers` are listed in the given order; pass them newest first. A
/// `next_cursor` marks the page as having a successor.
#[must_use]
pub fn pull_requests_response(numbers: &[u64], next_cursor: Option<&str>, remaining: u32) -> Value {
    let edges: Vec<Value> = numbers
        .iter()
        .map(|&number| {
            let summary = pull_request(number, &format!("PR #{number}"));
            json!({
                "node": {
                    "number": summary.number,
                    "title": summary.title,
                    "body": "",
                    "createdAt": summary.created_at.to_rfc3339(),
                    "state": "OPEN",
                    "url": summary.url,
                    "author": { "login": "contributor" },
                    "merged": false,
                    "mergedAt": null
                }
            })
        })
        .collect();

    json!({
        "data": {
            "repository": {
                "pullRequests": {
                    "edges": edges,
                    "pageInfo": page_info_json(next_cursor)
                }
            },
            "rateLimit": rate_limit_json(remaining)
        }
    })
}

/// JSON body for a changed-files page.
#[must_use]
pub fn files_response(paths: &[&str], next_cursor: Option<&str>, remaining: u32) -> Value {
    let edges: Vec<Value> = paths
        .iter()
        .map(|path| {
            json!({
                "node": {
                    "path": path,
                    "additions": 1,
                    "deletions": 0,
                    "changeType": "MODIFIED"
                }
            })
        })
        .collect();

    json!({
        "data": {
            "repository": {
                "pullRequest": {
                    "files": {
                        "edges": edges,
                        "pageInfo": page_info_json(next_cursor)
                    }
                }
            },
            "rateLimit": rate_limit_json(remaining)
        }
    })
}
