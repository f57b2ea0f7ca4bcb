//! Changed-file pagination for a single pull request.

use crate::github::{
    CursorState, FileChange, Page, PageSize, PullRequestGateway, RateLimitStatus,
    RepositoryLocator, ScanError,
};

use super::SearchFailure;
use super::classifier::is_test_file;

/// Walks the changed-file pages of one pull request.
pub struct FilePaginator<'scan, Gateway: ?Sized> {
    gateway: &'scan Gateway,
    repository: &'scan RepositoryLocator,
    number: u64,
    page_size: PageSize,
    state: CursorState,
}

impl<'scan, Gateway> FilePaginator<'scan, Gateway>
where
    Gateway: PullRequestGateway + ?Sized,
{
    /// Creates a paginator positioned before the first page.
    #[must_use]
    pub fn new(
        gateway: &'scan Gateway,
        repository: &'scan RepositoryLocator,
        number: u64,
        page_size: PageSize,
    ) -> Self {
        Self {
            gateway,
            repository,
            number,
            page_size,
            state: CursorState::Start,
        }
    }

    /// Fetches the next page, or returns `None` once the walk is done.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures and malformed page info.
    pub async fn next_page(&mut self) -> Result<Option<Page<FileChange>>, ScanError> {
        let Some(cursor) = self.state.next_request() else {
            return Ok(None);
        };

        let page = self
            .gateway
            .changed_files_page(self.repository, self.number, &cursor, self.page_size)
            .await?;
        self.state.advance(&page.page_info)?;
        Ok(Some(page))
    }

    /// Stops the walk after an early exit.
    pub fn finish(&mut self) {
        self.state.finish();
    }
}

/// Outcome of searching one pull request for a test file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSearch {
    /// Path of the first test file, if any.
    pub test_file: Option<String>,
    /// Latest rate limit snapshot seen.
    pub rate_limit: Option<RateLimitStatus>,
}

/// Returns the first changed file of pull request `number` that is a test.
///
/// Files are classified in page order; once one matches, neither the rest of
/// that page nor any later page is looked at.
///
/// # Errors
///
/// Returns a [`SearchFailure`] carrying the latest snapshot when a page
/// request fails.
pub async fn find_test_file<Gateway>(
    gateway: &Gateway,
    repository: &RepositoryLocator,
    number: u64,
    page_size: PageSize,
) -> Result<FileSearch, SearchFailure>
where
    Gateway: PullRequestGateway + ?Sized,
{
    let mut paginator = FilePaginator::new(gateway, repository, number, page_size);
    let mut rate_limit = None;

    while let Some(page) = paginator
        .next_page()
        .await
        .map_err(|error| SearchFailure::new(error, rate_limit))?
    {
        rate_limit = page.rate_limit.or(rate_limit);

        if let Some(file) = page
            .items
            .into_iter()
            .inspect(|file| {
                tracing::debug!(
                    %repository,
                    number,
                    path = %file.path,
                    additions = file.additions,
                    deletions = file.deletions,
                    change_type = ?file.change_type,
                    "changed file"
                );
            })
            .find(|file| is_test_file(&file.path))
        {
            paginator.finish();
            tracing::debug!(%repository, number, path = %file.path, "found test file");
            return Ok(FileSearch {
                test_file: Some(file.path),
                rate_limit,
            });
        }
    }

    Ok(FileSearch {
        test_file: None,
        rate_limit,
    })
}
