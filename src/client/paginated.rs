//! Cursor-based pagination.
//!
//! List endpoints return an opaque `meta.next_token`. [`Cursor`] carries it
//! unchanged into the next request's option set, and [`PaginatedStream`]
//! follows it lazily until the server stops returning one.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use futures_util::Stream;

use super::Response;
use crate::query::Paginated;
use crate::Result;

/// Continuation point of a paged result set.
///
/// The token is never parsed or altered, only passed back to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    token: Option<String>,
    result_count: Option<u32>,
}

impl Cursor {
    pub(crate) fn new(token: Option<String>, result_count: Option<u32>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            result_count,
        }
    }

    /// Returns `true` if a following page exists.
    pub fn has_next(&self) -> bool {
        self.token.is_some()
    }

    /// The raw token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Item count of the page this cursor came from, when reported.
    pub fn result_count(&self) -> Option<u32> {
        self.result_count
    }

    /// Copy `options` with this cursor's token set in its paging parameter.
    ///
    /// Returns `None` once the result set is exhausted.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use twitter_v2_rs::query::SearchOptions;
    ///
    /// # async fn example(client: twitter_v2_rs::TwitterClient) -> twitter_v2_rs::Result<()> {
    /// let mut options = SearchOptions::new("rustlang");
    /// loop {
    ///     let page = client.tweets().search_recent(&options).await?;
    ///     for tweet in &page.data {
    ///         println!("{}", tweet.text);
    ///     }
    ///     match page.cursor().apply(&options) {
    ///         Some(next) => options = next,
    ///         None => break,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn apply<O: Paginated>(&self, options: &O) -> Option<O> {
        let token = self.token.as_ref()?;
        Some(options.clone().with_page_token(token.clone()))
    }
}

type PageFuture<T> = BoxFuture<'static, Result<Response<Vec<T>>>>;

/// A stream that lazily fetches pages from a list endpoint.
///
/// Items are yielded one at a time; the next page is requested only after
/// the current one is drained. The stream ends after the first page without
/// a `next_token`, or after the first error.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use twitter_v2_rs::query::UserListOptions;
/// use twitter_v2_rs::UserId;
///
/// # async fn example(client: twitter_v2_rs::TwitterClient) -> twitter_v2_rs::Result<()> {
/// let mut followers = client
///     .users()
///     .followers_stream(&UserId::new("2244994945"), UserListOptions::new());
///
/// while let Some(user) = followers.next().await {
///     println!("@{}", user?.username);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Function to fetch a page by token.
    fetch_page: Box<dyn Fn(Option<String>) -> PageFuture<T> + Send + Sync>,
    /// Current page of items being yielded, reversed so `pop` keeps order.
    current_items: Vec<T>,
    /// Token for the next fetch; `None` once exhausted.
    next: Option<Option<String>>,
    /// Current in-flight fetch future.
    pending_fetch: Option<PageFuture<T>>,
}

impl<T: Send + 'static> PaginatedStream<T> {
    /// Create a stream starting at `first_token` (normally `None`).
    pub(crate) fn new<F>(first_token: Option<String>, fetch_page: F) -> Self
    where
        F: Fn(Option<String>) -> PageFuture<T> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: Vec::new(),
            next: Some(first_token),
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(fut) = this.pending_fetch.as_mut() {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        let cursor = page.cursor();
                        this.next = cursor.has_next().then(|| cursor.token);
                        this.current_items = page.data;
                        this.current_items.reverse();
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match this.next.take() {
                Some(token) => {
                    this.pending_fetch = Some((this.fetch_page)(token));
                }
                None => return Poll::Ready(None),
            }
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}
