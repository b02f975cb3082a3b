//! Tweets service for lookup, search and timelines.

use std::sync::Arc;

use crate::client::{ClientInner, Endpoint, PaginatedStream, Response};
use crate::models::{Tweet, TweetId, UserId};
use crate::query::{LookupOptions, QueryOptions, SearchOptions, TimelineOptions};
use crate::{Error, Result};

const TWEET: Endpoint = Endpoint::get("/2/tweets/{id}");
const TWEETS: Endpoint = Endpoint::get("/2/tweets");
const SEARCH_RECENT: Endpoint = Endpoint::get("/2/tweets/search/recent");
const SEARCH_ALL: Endpoint = Endpoint::get("/2/tweets/search/all");
const USER_TWEETS: Endpoint = Endpoint::get("/2/users/{id}/tweets");
const USER_MENTIONS: Endpoint = Endpoint::get("/2/users/{id}/mentions");

/// Service for tweet operations.
///
/// # Example
///
/// ```no_run
/// use twitter_v2_rs::models::{Expansion, TweetField};
/// use twitter_v2_rs::query::{Fields, SearchOptions};
///
/// # async fn example(client: twitter_v2_rs::TwitterClient) -> twitter_v2_rs::Result<()> {
/// let options = SearchOptions::new("from:TwitterDev -is:retweet").with_fields(
///     Fields::new()
///         .expansions([Expansion::AuthorId])
///         .tweet_fields([TweetField::CreatedAt]),
/// );
///
/// let page = client.tweets().search_recent(&options).await?;
/// for tweet in &page.data {
///     let author = page.includes.author_of(tweet).map(|u| u.username.as_str());
///     println!("{:?}: {}", author, tweet.text);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TweetsService {
    inner: Arc<ClientInner>,
}

impl TweetsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Look up one tweet.
    ///
    /// A deleted or protected tweet yields [`Error::NotFound`].
    pub async fn get(&self, id: &TweetId, options: &LookupOptions) -> Result<Response<Tweet>> {
        self.inner
            .get_single(&TWEET, &[("id", id.as_str())], &options.to_params()?)
            .await
    }

    /// Look up to 100 tweets at once.
    ///
    /// Tweets that could not be returned are reported through
    /// [`Response::errors`] next to the ones that could.
    pub async fn get_many(
        &self,
        ids: &[TweetId],
        options: &LookupOptions,
    ) -> Result<Response<Vec<Tweet>>> {
        if ids.is_empty() {
            return Err(Error::InvalidInput("at least one tweet ID is required".to_string()));
        }
        let mut query = options.to_params()?;
        query.insert_list("ids", ids);
        self.inner.get_list(&TWEETS, &[], &query).await
    }

    /// Search tweets from the last seven days.
    pub async fn search_recent(&self, options: &SearchOptions) -> Result<Response<Vec<Tweet>>> {
        self.inner
            .get_list(&SEARCH_RECENT, &[], &options.to_params()?)
            .await
    }

    /// Search the full archive (academic access).
    pub async fn search_all(&self, options: &SearchOptions) -> Result<Response<Vec<Tweet>>> {
        self.inner
            .get_list(&SEARCH_ALL, &[], &options.to_params()?)
            .await
    }

    /// Stream every result of a recent search, following `next_token`.
    pub fn search_recent_stream(&self, options: SearchOptions) -> PaginatedStream<Tweet> {
        self.inner.paginate(SEARCH_RECENT, Vec::new(), options)
    }

    /// Tweets posted by a user, newest first.
    pub async fn timeline(
        &self,
        user_id: &UserId,
        options: &TimelineOptions,
    ) -> Result<Response<Vec<Tweet>>> {
        self.inner
            .get_list(&USER_TWEETS, &[("id", user_id.as_str())], &options.to_params()?)
            .await
    }

    /// Stream a user's whole timeline, following `pagination_token`.
    pub fn timeline_stream(&self, user_id: &UserId, options: TimelineOptions) -> PaginatedStream<Tweet> {
        self.inner
            .paginate(USER_TWEETS, vec![("id", user_id.to_string())], options)
    }

    /// Tweets mentioning a user, newest first.
    pub async fn mentions(
        &self,
        user_id: &UserId,
        options: &TimelineOptions,
    ) -> Result<Response<Vec<Tweet>>> {
        self.inner
            .get_list(&USER_MENTIONS, &[("id", user_id.as_str())], &options.to_params()?)
            .await
    }
}
