//! Paginated collection responses
//!
//! A [`CollectionResponse`] is a list request that has not been executed
//! yet. It can be drained eagerly or consumed lazily, page by page, with
//! the next page fetched only when the consumer asks for more items.

use super::types::{CancelToken, ItemStream, PageStream};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Transport};
use crate::pagination::{PageState, PaginationMode, Paginator};
use futures::stream::{self, TryStreamExt};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// A paginated list request
pub struct CollectionResponse<T> {
    transport: Arc<dyn Transport>,
    url: String,
    mode: PaginationMode,
    cancel: Option<CancelToken>,
    _item: PhantomData<fn() -> T>,
}

impl<T> CollectionResponse<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Create a collection over `url`, paginated with `mode`
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>, mode: PaginationMode) -> Self {
        Self {
            transport,
            url: url.into(),
            mode,
            cancel: None,
            _item: PhantomData,
        }
    }

    /// Attach a cancellation token, checked before every page fetch
    #[must_use]
    pub fn with_cancellation(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// URL of the first page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pagination mode used to walk the collection
    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Fetch only the first page
    pub async fn first_page(&self) -> Result<Vec<T>> {
        let (items, _) = fetch_page(self.transport.as_ref(), &self.url).await?;
        Ok(items)
    }

    /// Fetch every page and return all items in server order
    pub async fn collect_all(self) -> Result<Vec<T>> {
        let items: Vec<T> = self.stream().try_collect().await?;
        debug!("Collected {} items", items.len());
        Ok(items)
    }

    /// Lazily yield one page at a time
    ///
    /// Empty pages end the stream. After cancellation or an error the
    /// stream yields that error once and ends.
    pub fn pages(self) -> PageStream<T> {
        let cursor = PageCursor {
            transport: self.transport,
            paginator: self.mode.paginator(),
            state: PageState::starting_at(self.url),
            cancel: self.cancel,
            finished: false,
        };

        Box::pin(stream::unfold(cursor, |mut cursor| async move {
            if cursor.finished {
                return None;
            }
            let url = cursor.state.next_url.clone()?;

            if cursor.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                debug!(
                    "Enumeration cancelled after {} pages ({} items)",
                    cursor.state.pages, cursor.state.total_fetched
                );
                cursor.finished = true;
                cursor.state.mark_done();
                return Some((Err(Error::Cancelled), cursor));
            }

            debug!("Fetching page {}: {}", cursor.state.pages + 1, url);
            match fetch_page::<T>(cursor.transport.as_ref(), &url).await {
                Ok((items, headers)) => {
                    cursor
                        .paginator
                        .process_response(&url, &headers, items.len(), &mut cursor.state);
                    if items.is_empty() {
                        return None;
                    }
                    Some((Ok(items), cursor))
                }
                Err(e) => {
                    cursor.finished = true;
                    Some((Err(e), cursor))
                }
            }
        }))
    }

    /// Lazily yield one item at a time
    ///
    /// Items buffered from an already fetched page are still delivered
    /// after cancellation; the cancellation error follows them.
    pub fn stream(self) -> ItemStream<T> {
        Box::pin(
            self.pages()
                .map_ok(|page| stream::iter(page.into_iter().map(Ok::<T, Error>)))
                .try_flatten(),
        )
    }
}

impl<T> fmt::Debug for CollectionResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionResponse")
            .field("url", &self.url)
            .field("mode", &self.mode)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

struct PageCursor {
    transport: Arc<dyn Transport>,
    paginator: Box<dyn Paginator>,
    state: PageState,
    cancel: Option<CancelToken>,
    finished: bool,
}

async fn fetch_page<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> Result<(Vec<T>, HeaderMap)> {
    let response = transport.execute(ApiRequest::get(url)).await?;
    let items: Vec<T> = response.json()?;
    Ok((items, response.headers))
}
