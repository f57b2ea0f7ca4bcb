//! Newest-first pull request walk for a single repository.

use crate::github::{
    CursorState, Page, PageSize, PullRequestGateway, PullRequestSummary, RateLimitStatus,
    RepositoryLocator, ScanError, TestMatch,
};

use super::SearchFailure;
use super::files::find_test_file;

/// Page sizes used by a repository search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchSettings {
    /// Pull requests requested per page.
    pub pull_request_page_size: PageSize,
    /// Changed files requested per page.
    pub file_page_size: PageSize,
}

/// Walks the pull request pages of one repository, newest first.
pub struct PullRequestPaginator<'scan, Gateway: ?Sized> {
    gateway: &'scan Gateway,
    repository: &'scan RepositoryLocator,
    page_size: PageSize,
    state: CursorState,
}

impl<'scan, Gateway> PullRequestPaginator<'scan, Gateway>
where
    Gateway: PullRequestGateway + ?Sized,
{
    /// Creates a paginator positioned before the newest pull request.
    #[must_use]
    pub fn new(
        gateway: &'scan Gateway,
        repository: &'scan RepositoryLocator,
        page_size: PageSize,
    ) -> Self {
        Self {
            gateway,
            repository,
            page_size,
            state: CursorState::Start,
        }
    }

    /// Fetches the next page, or returns `None` once the walk is done.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures and malformed page info.
    pub async fn next_page(&mut self) -> Result<Option<Page<PullRequestSummary>>, ScanError> {
        let Some(cursor) = self.state.next_request() else {
            return Ok(None);
        };

        let page = self
            .gateway
            .pull_request_page(self.repository, &cursor, self.page_size)
            .await?;
        self.state.advance(&page.page_info)?;
        Ok(Some(page))
    }

    /// Stops the walk after an early exit.
    pub fn finish(&mut self) {
        self.state.finish();
    }
}

/// Outcome of searching one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySearch {
    /// The first match, from the newest pull request that has a test file.
    pub test_match: Option<TestMatch>,
    /// Latest rate limit snapshot seen while searching.
    pub rate_limit: Option<RateLimitStatus>,
    /// Number of pull requests whose files were inspected.
    pub pull_requests_checked: usize,
}

/// Finds the newest pull request in `repository` that changes a test file.
///
/// Pull requests are inspected in the order the API returns them. The search
/// ends at the first match; later pull requests and pages are not requested.
///
/// # Errors
///
/// Returns a [`SearchFailure`] carrying the latest snapshot when any page
/// request fails.
pub async fn search_repository<Gateway>(
    gateway: &Gateway,
    repository: &RepositoryLocator,
    settings: &SearchSettings,
) -> Result<RepositorySearch, SearchFailure>
where
    Gateway: PullRequestGateway + ?Sized,
{
    let mut paginator =
        PullRequestPaginator::new(gateway, repository, settings.pull_request_page_size);
    let mut rate_limit = None;
    let mut pull_requests_checked = 0_usize;

    while let Some(page) = paginator
        .next_page()
        .await
        .map_err(|error| SearchFailure::new(error, rate_limit))?
    {
        rate_limit = page.rate_limit.or(rate_limit);
        tracing::debug!(
            %repository,
            count = page.items.len(),
            has_next_page = page.page_info.has_next_page,
            "fetched pull request page"
        );

        for pull_request in page.items {
            tracing::info!(
                %repository,
                number = pull_request.number,
                title = %pull_request.title,
                created_at = %pull_request.created_at,
                state = ?pull_request.state,
                url = %pull_request.url,
                author = ?pull_request.author,
                merged = pull_request.merged,
                merged_at = ?pull_request.merged_at,
                body_len = pull_request.body.len(),
                "inspecting pull request"
            );
            let search = find_test_file(
                gateway,
                repository,
                pull_request.number,
                settings.file_page_size,
            )
            .await
            .map_err(|failure| failure.or_rate_limit(rate_limit))?;
            rate_limit = search.rate_limit.or(rate_limit);
            pull_requests_checked += 1;

            if let Some(test_file) = search.test_file {
                paginator.finish();
                return Ok(RepositorySearch {
                    test_match: Some(TestMatch::new(repository, &pull_request, test_file)),
                    rate_limit,
                    pull_requests_checked,
                });
            }
        }
    }

    Ok(RepositorySearch {
        test_match: None,
        rate_limit,
        pull_requests_checked,
    })
}
