//! GraphQL documents used by the scanner.
//!
//! Owner, name, number and cursor are bound as variables; nothing is spliced
//! into the query text.

use serde::Serialize;

/// Newest-first pull requests of a repository plus the rate limit snapshot.
pub(super) const PULL_REQUESTS_QUERY: &str = r"
query($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequests(first: $first, after: $after, orderBy: {field: CREATED_AT, direction: DESC}) {
      edges {
        node {
          number
          title
          body
          createdAt
          state
          url
          author {
            login
          }
          merged
          mergedAt
        }
      }
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
  rateLimit {
    limit
    cost
    remaining
    resetAt
  }
}
";

/// Changed files of one pull request plus the rate limit snapshot.
pub(super) const CHANGED_FILES_QUERY: &str = r"
query($owner: String!, $name: String!, $number: Int!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      files(first: $first, after: $after) {
        edges {
          node {
            path
            additions
            deletions
            changeType
          }
        }
        pageInfo {
          endCursor
          hasNextPage
        }
      }
    }
  }
  rateLimit {
    limit
    cost
    remaining
    resetAt
  }
}
";

/// Request body posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub(super) struct GraphQlRequest<'query, Variables> {
    pub(super) query: &'query str,
    pub(super) variables: Variables,
}

#[derive(Debug, Serialize)]
pub(super) struct PullRequestsVariables<'input> {
    pub(super) owner: &'input str,
    pub(super) name: &'input str,
    pub(super) first: u8,
    pub(super) after: Option<&'input str>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChangedFilesVariables<'input> {
    pub(super) owner: &'input str,
    pub(super) name: &'input str,
    pub(super) number: u64,
    pub(super) first: u8,
    pub(super) after: Option<&'input str>,
}
