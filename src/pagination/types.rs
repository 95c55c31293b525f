//! Pagination types and traits
//!
//! Defines the pagination mode selector and the core abstractions used by
//! both strategies.

use super::strategies::{KeysetPaginator, OffsetPaginator};
use crate::query::UrlBuilder;
use reqwest::header::HeaderMap;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this URL
    Continue {
        /// URL of the next page (absolute when taken from a `Link` header)
        url: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// How a list request walks through its result set
///
/// Keyset (cursor) pagination is only valid when the request carries no
/// free-text search: the search index cannot provide a stable cursor
/// order. A request uses exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// `pagination=keyset`, follow the `Link` header
    #[default]
    Keyset,
    /// Classic `page`/`per_page` pagination
    Offset,
}

impl PaginationMode {
    /// Pick the mode for a request with the given search term.
    pub fn select(search: Option<&str>) -> Self {
        match search {
            Some(term) if !term.trim().is_empty() => Self::Offset,
            _ => Self::Keyset,
        }
    }

    /// Append the pagination and ordering parameters for this mode.
    ///
    /// Keyset always sends an explicit `order_by` (defaulting to `id`);
    /// offset only sends one when the caller asked for it.
    pub fn apply(self, url: UrlBuilder, order_by: Option<&str>) -> UrlBuilder {
        match self {
            Self::Keyset => url
                .param("pagination", "keyset")
                .param("order_by", order_by.unwrap_or("id")),
            Self::Offset => url.opt_param("order_by", order_by),
        }
    }

    /// The strategy that follows pages for this mode
    pub fn paginator(self) -> Box<dyn Paginator> {
        match self {
            Self::Keyset => Box::new(KeysetPaginator),
            Self::Offset => Box::new(OffsetPaginator),
        }
    }

    /// Check if this is keyset pagination
    pub fn is_keyset(self) -> bool {
        matches!(self, Self::Keyset)
    }
}

/// Tracks pagination state during iteration
///
/// Created with the first request, replaced on every fetch and marked done
/// once the server returns an empty page or no next link.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    /// Pages fetched so far
    pub pages: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// URL of the next page to fetch
    pub next_url: Option<String>,
    /// Is pagination complete?
    pub done: bool,
}

impl PageState {
    /// Create state pointing at the first page
    pub fn starting_at(url: impl Into<String>) -> Self {
        Self {
            next_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
        self.next_url = None;
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Move the cursor to the next page
    pub fn advance(&mut self, next: &NextPage) {
        match next {
            NextPage::Continue { url } => self.next_url = Some(url.clone()),
            NextPage::Done => self.mark_done(),
        }
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Decide where the next page lives, given the request that was just
    /// made and its response headers.
    fn next_page(&self, request_url: &str, headers: &HeaderMap, records_count: usize) -> NextPage;

    /// Process a response and update the state
    fn process_response(
        &self,
        request_url: &str,
        headers: &HeaderMap,
        records_count: usize,
        state: &mut PageState,
    ) -> NextPage {
        state.add_page(records_count);
        let next = self.next_page(request_url, headers, records_count);
        state.advance(&next);
        next
    }
}
