//! Lazy aggregation of pages into one item stream

use super::fetcher::fetch_page;
use super::types::Page;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::v2::ListRequest;
use futures::future::BoxFuture;
use futures::{FutureExt, Stream};
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Boxed future of one page fetch
pub type PageFuture<'a, T> = BoxFuture<'a, Result<Page<T>>>;

pin_project! {
    /// Concatenates the pages of one listing into a single ordered stream.
    ///
    /// Page 1 is requested on the first poll. Page `n + 1` is requested only
    /// once every item of page `n` has been handed out and `n < total_pages`,
    /// so a consumer that stops early never pays for the remaining pages.
    /// A failed fetch yields one `Err` and ends the stream.
    ///
    /// Not restartable: a fresh aggregation needs a fresh stream.
    pub struct PageStream<T, F, Fut>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        fetcher: F,
        next_page: Option<u32>,
        requested_page: u32,
        pages_fetched: u32,
        buffer: VecDeque<T>,
        cancel: Option<CancellationToken>,
        #[pin]
        current_fetch: Option<Fut>,
    }
}

impl<T, F, Fut> PageStream<T, F, Fut>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    /// Create a stream that fetches page `n` with `fetcher(n)`
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            next_page: Some(1),
            requested_page: 0,
            pages_fetched: 0,
            buffer: VecDeque::new(),
            cancel: None,
            current_fetch: None,
        }
    }

    /// Stop before the next fetch once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Number of page fetches issued so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }
}

impl<T, F, Fut> Stream for PageStream<T, F, Fut>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(fut) = this.current_fetch.as_mut().as_pin_mut() {
                match fut.poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.current_fetch.set(None);

                        // Continue from the page we asked for, not the one the server echoed
                        let requested = *this.requested_page;
                        *this.next_page = (page.total_results > 0
                            && requested < page.total_pages)
                            .then(|| requested + 1);

                        this.buffer.extend(page.items);
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.current_fetch.set(None);
                        *this.next_page = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            let Some(page) = *this.next_page else {
                return Poll::Ready(None);
            };

            if this.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                debug!(page, "Pagination cancelled before fetch");
                *this.next_page = None;
                return Poll::Ready(Some(Err(Error::Cancelled)));
            }

            *this.requested_page = page;
            *this.pages_fetched += 1;
            let fut = (this.fetcher)(page);
            this.current_fetch.set(Some(fut));
        }
    }
}

/// Lazily stream every entity of a list request, page by page
pub fn paginate<'a, C, R>(
    executor: &'a C,
    request: &'a R,
) -> PageStream<
    R::Entity,
    impl FnMut(u32) -> PageFuture<'a, R::Entity> + Send + 'a,
    PageFuture<'a, R::Entity>,
>
where
    C: Executor,
    R: ListRequest,
{
    PageStream::new(move |page| fetch_page(executor, request, page).boxed())
}

/// Like [`paginate`], but the stream owns the request
pub fn paginate_owned<'a, C, R>(
    executor: &'a C,
    request: R,
) -> PageStream<
    R::Entity,
    impl FnMut(u32) -> PageFuture<'a, R::Entity> + Send + 'a,
    PageFuture<'a, R::Entity>,
>
where
    C: Executor,
    R: ListRequest,
{
    let request = Arc::new(request);
    PageStream::new(move |page| {
        let request = Arc::clone(&request);
        async move { fetch_page(executor, request.as_ref(), page).await }.boxed()
    })
}
