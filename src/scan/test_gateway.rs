//! Scripted in-memory gateway for engine tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::github::{
    ChangeType, FileChange, Page, PageCursor, PageInfo, PageSize, PullRequestGateway,
    PullRequestState, PullRequestSummary, RateLimitStatus, RepositoryLocator, ScanError,
};

/// One call received by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    PullRequests {
        repository: String,
        cursor: PageCursor,
    },
    Files {
        repository: String,
        number: u64,
        cursor: PageCursor,
    },
}

impl Request {
    pub fn pull_requests(repository: &str, cursor: PageCursor) -> Self {
        Self::PullRequests {
            repository: repository.to_owned(),
            cursor,
        }
    }

    pub fn files(repository: &str, number: u64, cursor: PageCursor) -> Self {
        Self::Files {
            repository: repository.to_owned(),
            number,
            cursor,
        }
    }
}

type PullRequestKey = (String, PageCursor);
type FilesKey = (String, u64, PageCursor);

/// Serves pre-scripted pages and records every request in order.
///
/// Unscripted requests fail with [`ScanError::Api`] so tests notice calls
/// they did not expect.
#[derive(Default)]
pub struct ScriptedGateway {
    pull_requests: HashMap<PullRequestKey, Result<Page<PullRequestSummary>, ScanError>>,
    files: HashMap<FilesKey, Result<Page<FileChange>, ScanError>>,
    requests: Mutex<Vec<Request>>,
}

pub fn snapshot(remaining: u32) -> RateLimitStatus {
    let reset_at = Utc
        .with_ymd_and_hms(2030, 1, 1, 0, 0, 0)
        .single()
        .expect("fixture timestamp should be valid");
    RateLimitStatus::new(5000, 1, remaining, reset_at)
}

pub fn summary(repository: &str, number: u64) -> PullRequestSummary {
    let created_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("fixture timestamp should be valid")
        + chrono::Duration::minutes(i64::try_from(number).expect("small PR number"));
    PullRequestSummary {
        number,
        title: format!("PR #{number}"),
        body: String::new(),
        created_at,
        state: PullRequestState::Open,
        url: format!("https://github.com/{repository}/pull/{number}"),
        author: None,
        merged: false,
        merged_at: None,
    }
}

fn page_info(next_cursor: Option<&str>) -> PageInfo {
    next_cursor.map_or_else(PageInfo::last, PageInfo::with_next)
}

impl ScriptedGateway {
    /// Scripts a pull request page for `repository` ("owner/name").
    pub fn with_pull_requests(
        mut self,
        repository: &str,
        cursor: PageCursor,
        numbers: &[u64],
        next_cursor: Option<&str>,
        remaining: u32,
    ) -> Self {
        let page = Page {
            items: numbers
                .iter()
                .map(|&number| summary(repository, number))
                .collect(),
            page_info: page_info(next_cursor),
            rate_limit: Some(snapshot(remaining)),
        };
        self.pull_requests
            .insert((repository.to_owned(), cursor), Ok(page));
        self
    }

    /// Scripts a failing pull request request.
    pub fn with_pull_requests_error(
        mut self,
        repository: &str,
        cursor: PageCursor,
        error: ScanError,
    ) -> Self {
        self.pull_requests
            .insert((repository.to_owned(), cursor), Err(error));
        self
    }

    /// Scripts a changed-files page for pull request `number`.
    pub fn with_files(
        mut self,
        repository: &str,
        number: u64,
        cursor: PageCursor,
        paths: &[&str],
        next_cursor: Option<&str>,
        remaining: u32,
    ) -> Self {
        let page = Page {
            items: paths
                .iter()
                .map(|path| FileChange {
                    path: (*path).to_owned(),
                    additions: 1,
                    deletions: 0,
                    change_type: ChangeType::Modified,
                })
                .collect(),
            page_info: page_info(next_cursor),
            rate_limit: Some(snapshot(remaining)),
        };
        self.files
            .insert((repository.to_owned(), number, cursor), Ok(page));
        self
    }

    /// Scripts a failing changed-files request.
    pub fn with_files_error(
        mut self,
        repository: &str,
        number: u64,
        cursor: PageCursor,
        error: ScanError,
    ) -> Self {
        self.files
            .insert((repository.to_owned(), number, cursor), Err(error));
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, request: Request) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

fn unscripted(request: &Request) -> ScanError {
    ScanError::Api {
        message: format!("unscripted request: {request:?}"),
    }
}

#[async_trait]
impl PullRequestGateway for ScriptedGateway {
    async fn pull_request_page(
        &self,
        repository: &RepositoryLocator,
        cursor: &PageCursor,
        _page_size: PageSize,
    ) -> Result<Page<PullRequestSummary>, ScanError> {
        let request = Request::pull_requests(&repository.to_string(), cursor.clone());
        self.record(request.clone());
        self.pull_requests
            .get(&(repository.to_string(), cursor.clone()))
            .cloned()
            .unwrap_or_else(|| Err(unscripted(&request)))
    }

    async fn changed_files_page(
        &self,
        repository: &RepositoryLocator,
        number: u64,
        cursor: &PageCursor,
        _page_size: PageSize,
    ) -> Result<Page<FileChange>, ScanError> {
        let request = Request::files(&repository.to_string(), number, cursor.clone());
        self.record(request.clone());
        self.files
            .get(&(repository.to_string(), number, cursor.clone()))
            .cloned()
            .unwrap_or_else(|| Err(unscripted(&request)))
    }
}
