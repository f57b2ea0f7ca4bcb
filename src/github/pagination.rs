//! Cursor pagination state for GitHub GraphQL connections.
//!
//! GraphQL connections are walked with an opaque `endCursor` returned on each
//! page. [`CursorState`] is the small state machine shared by the pull request
//! and changed-file paginators: it hands out the cursor for the next request,
//! advances from each page's [`PageInfo`], and can be stopped early.

use std::fmt;

use serde::Deserialize;

use super::error::ScanError;
use super::rate_limit::RateLimitStatus;

/// Largest page size the GraphQL API accepts for `first`.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u8 = 10;

/// Position in a paginated sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PageCursor {
    /// Start of the sequence; sent as `after: null`.
    #[default]
    Start,
    /// Continue after the given `endCursor`.
    After(String),
}

impl PageCursor {
    /// Returns the value bound to the `$after` query variable.
    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Start => None,
            Self::After(cursor) => Some(cursor.as_str()),
        }
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("none"),
            Self::After(cursor) => f.write_str(cursor),
        }
    }
}

/// Number of items requested per page, validated against the API bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u8);

impl PageSize {
    /// Validates a page size.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPagination`] when the size is zero or
    /// exceeds [`MAX_PAGE_SIZE`].
    pub fn new(value: u8) -> Result<Self, ScanError> {
        if value == 0 {
            return Err(ScanError::InvalidPagination {
                message: "page size must be at least 1".to_owned(),
            });
        }

        if value > MAX_PAGE_SIZE {
            return Err(ScanError::InvalidPagination {
                message: format!("page size must not exceed {MAX_PAGE_SIZE}"),
            });
        }

        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata returned with each GraphQL connection page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor of the last item on the page.
    pub end_cursor: Option<String>,
    /// Whether more items follow this page.
    pub has_next_page: bool,
}

impl PageInfo {
    /// Creates page info for a page followed by more items.
    #[must_use]
    pub fn with_next(end_cursor: impl Into<String>) -> Self {
        Self {
            end_cursor: Some(end_cursor.into()),
            has_next_page: true,
        }
    }

    /// Creates page info for the final page.
    #[must_use]
    pub const fn last() -> Self {
        Self {
            end_cursor: None,
            has_next_page: false,
        }
    }

    /// Returns the cursor for the following page, or `None` on the last page.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPagination`] when the page claims a
    /// successor but carries no `endCursor`.
    pub fn next_cursor(&self) -> Result<Option<PageCursor>, ScanError> {
        if !self.has_next_page {
            return Ok(None);
        }

        self.end_cursor
            .as_ref()
            .map(|cursor| Some(PageCursor::After(cursor.clone())))
            .ok_or_else(|| ScanError::InvalidPagination {
                message: "hasNextPage is true but endCursor is missing".to_owned(),
            })
    }
}

/// One page of a connection together with the response's rate limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub page_info: PageInfo,
    /// Rate limit snapshot returned with the response, when present.
    pub rate_limit: Option<RateLimitStatus>,
}

/// State of a cursor walk over one connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CursorState {
    /// No page requested yet.
    #[default]
    Start,
    /// At least one page fetched; the next request continues after `cursor`.
    Fetching(String),
    /// No more pages will be requested.
    Done,
}

impl CursorState {
    /// Returns the cursor for the next request, or `None` once done.
    #[must_use]
    pub fn next_request(&self) -> Option<PageCursor> {
        match self {
            Self::Start => Some(PageCursor::Start),
            Self::Fetching(cursor) => Some(PageCursor::After(cursor.clone())),
            Self::Done => None,
        }
    }

    /// Advances from the page info of the response just received.
    ///
    /// # Errors
    ///
    /// Propagates [`PageInfo::next_cursor`] failures; the state becomes
    /// [`CursorState::Done`] in that case.
    pub fn advance(&mut self, page_info: &PageInfo) -> Result<(), ScanError> {
        match page_info.next_cursor() {
            Ok(Some(PageCursor::After(cursor))) => {
                *self = Self::Fetching(cursor);
                Ok(())
            }
            Ok(_) => {
                *self = Self::Done;
                Ok(())
            }
            Err(error) => {
                *self = Self::Done;
                Err(error)
            }
        }
    }

    /// Stops the walk; no further cursors are handed out.
    pub fn finish(&mut self) {
        *self = Self::Done;
    }

    /// Returns true once the walk has finished.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}
