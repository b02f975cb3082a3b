//! Per-endpoint option sets.
//!
//! Every field is optional. A populated field contributes exactly one query
//! parameter; an unset or empty field contributes nothing.

use chrono::{DateTime, Utc};

use super::params::{QueryOptions, QueryParams};
use super::selector::{FieldSelector, FieldSet, Selector};
use crate::models::{
    Expansion, ListField, MediaField, PlaceField, PollField, RuleId, SpaceField, SpaceState,
    TopicField, TweetField, TweetId, UserField,
};
use crate::Result;

/// Field and expansion selectors shared by every read endpoint.
///
/// # Example
///
/// ```
/// use twitter_v2_rs::models::{Expansion, TweetField, UserField};
/// use twitter_v2_rs::query::{Fields, QueryOptions};
///
/// let fields = Fields::new()
///     .expansions([Expansion::AuthorId])
///     .tweet_fields([TweetField::CreatedAt, TweetField::Lang])
///     .user_fields([UserField::Username]);
///
/// let params = fields.to_params().unwrap();
/// assert_eq!(params.get("expansions"), Some("author_id"));
/// assert_eq!(params.get("tweet.fields"), Some("created_at,lang"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    /// `expansions`
    pub expansions: FieldSet<Expansion>,
    /// `tweet.fields`
    pub tweet: FieldSet<TweetField>,
    /// `user.fields`
    pub user: FieldSet<UserField>,
    /// `media.fields`
    pub media: FieldSet<MediaField>,
    /// `place.fields`
    pub place: FieldSet<PlaceField>,
    /// `poll.fields`
    pub poll: FieldSet<PollField>,
    /// `space.fields`
    pub space: FieldSet<SpaceField>,
    /// `topic.fields`
    pub topic: FieldSet<TopicField>,
    /// `list.fields`
    pub list: FieldSet<ListField>,
}

/// Options for single- and multi-entity lookups.
pub type LookupOptions = Fields;

impl Fields {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add expansions.
    pub fn expansions(mut self, values: impl IntoIterator<Item = Expansion>) -> Self {
        self.expansions.extend(values);
        self
    }

    /// Add tweet fields.
    pub fn tweet_fields(mut self, values: impl IntoIterator<Item = TweetField>) -> Self {
        self.tweet.extend(values);
        self
    }

    /// Add user fields.
    pub fn user_fields(mut self, values: impl IntoIterator<Item = UserField>) -> Self {
        self.user.extend(values);
        self
    }

    /// Add media fields.
    pub fn media_fields(mut self, values: impl IntoIterator<Item = MediaField>) -> Self {
        self.media.extend(values);
        self
    }

    /// Add place fields.
    pub fn place_fields(mut self, values: impl IntoIterator<Item = PlaceField>) -> Self {
        self.place.extend(values);
        self
    }

    /// Add poll fields.
    pub fn poll_fields(mut self, values: impl IntoIterator<Item = PollField>) -> Self {
        self.poll.extend(values);
        self
    }

    /// Add space fields.
    pub fn space_fields(mut self, values: impl IntoIterator<Item = SpaceField>) -> Self {
        self.space.extend(values);
        self
    }

    /// Add topic fields.
    pub fn topic_fields(mut self, values: impl IntoIterator<Item = TopicField>) -> Self {
        self.topic.extend(values);
        self
    }

    /// Add list fields.
    pub fn list_fields(mut self, values: impl IntoIterator<Item = ListField>) -> Self {
        self.list.extend(values);
        self
    }

    /// Union with another selection, family by family.
    pub fn merge(self, other: &Fields) -> Self {
        Self {
            expansions: self.expansions.merge(&other.expansions),
            tweet: self.tweet.merge(&other.tweet),
            user: self.user.merge(&other.user),
            media: self.media.merge(&other.media),
            place: self.place.merge(&other.place),
            poll: self.poll.merge(&other.poll),
            space: self.space.merge(&other.space),
            topic: self.topic.merge(&other.topic),
            list: self.list.merge(&other.list),
        }
    }

    /// Returns `true` if no family has a selector.
    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
            && self.tweet.is_empty()
            && self.user.is_empty()
            && self.media.is_empty()
            && self.place.is_empty()
            && self.poll.is_empty()
            && self.space.is_empty()
            && self.topic.is_empty()
            && self.list.is_empty()
    }
}

fn append_set<F: FieldSelector>(params: &mut QueryParams, set: &FieldSet<F>) -> Result<()> {
    if set.is_empty() {
        return Ok(());
    }
    params.insert_selectors(F::FAMILY, set.iter().map(|f| Selector::from(*f)))
}

impl QueryOptions for Fields {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        append_set(params, &self.expansions)?;
        append_set(params, &self.tweet)?;
        append_set(params, &self.user)?;
        append_set(params, &self.media)?;
        append_set(params, &self.place)?;
        append_set(params, &self.poll)?;
        append_set(params, &self.space)?;
        append_set(params, &self.topic)?;
        append_set(params, &self.list)
    }
}

/// An option set that carries a pagination token.
pub trait Paginated: Clone {
    /// Query parameter the token is sent in.
    const TOKEN_PARAM: &'static str;

    /// The token currently set, if any.
    fn page_token(&self) -> Option<&str>;

    /// Replace the token.
    fn set_page_token(&mut self, token: Option<String>);

    /// Builder-style [`set_page_token`](Self::set_page_token).
    fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.set_page_token(Some(token.into()));
        self
    }
}

macro_rules! paginated {
    ($ty:ty, $field:ident, $param:literal) => {
        impl Paginated for $ty {
            const TOKEN_PARAM: &'static str = $param;

            fn page_token(&self) -> Option<&str> {
                self.$field.as_deref()
            }

            fn set_page_token(&mut self, token: Option<String>) {
                self.$field = token;
            }
        }
    };
}

/// Ordering of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Newest first
    Recency,
    /// Best matches first
    Relevancy,
}

impl SortOrder {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Recency => "recency",
            SortOrder::Relevancy => "relevancy",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for recent and full-archive tweet search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Search query (required by the API)
    pub query: String,
    /// Field selection
    pub fields: Fields,
    /// Oldest creation time to include
    pub start_time: Option<DateTime<Utc>>,
    /// Newest creation time to include
    pub end_time: Option<DateTime<Utc>>,
    /// Only tweets newer than this ID
    pub since_id: Option<TweetId>,
    /// Only tweets older than this ID
    pub until_id: Option<TweetId>,
    /// Page size (10..=100 for recent search)
    pub max_results: Option<u32>,
    /// Result ordering
    pub sort_order: Option<SortOrder>,
    /// Pagination cursor
    pub next_token: Option<String>,
}

impl SearchOptions {
    /// Search for `query` with nothing else set.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the field selection.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Restrict to a creation-time window.
    pub fn with_time_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    /// Only return tweets newer than `id`.
    pub fn with_since_id(mut self, id: impl Into<TweetId>) -> Self {
        self.since_id = Some(id.into());
        self
    }

    /// Only return tweets older than `id`.
    pub fn with_until_id(mut self, id: impl Into<TweetId>) -> Self {
        self.until_id = Some(id.into());
        self
    }

    /// Set the page size.
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Set the result ordering.
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }
}

impl QueryOptions for SearchOptions {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        if !self.query.is_empty() {
            params.insert("query", self.query.as_str());
        }
        self.fields.append_to(params)?;
        params.insert_time("start_time", self.start_time.as_ref());
        params.insert_time("end_time", self.end_time.as_ref());
        params.insert_opt("since_id", self.since_id.as_ref());
        params.insert_opt("until_id", self.until_id.as_ref());
        params.insert_opt("max_results", self.max_results);
        params.insert_opt("sort_order", self.sort_order);
        params.insert_opt("next_token", self.next_token.as_deref());
        Ok(())
    }
}

paginated!(SearchOptions, next_token, "next_token");

/// Tweet kinds a timeline can leave out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exclude {
    /// Leave out retweets
    Retweets,
    /// Leave out replies
    Replies,
}

impl Exclude {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclude::Retweets => "retweets",
            Exclude::Replies => "replies",
        }
    }
}

impl std::fmt::Display for Exclude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a user's tweet or mention timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineOptions {
    /// Field selection
    pub fields: Fields,
    /// Tweet kinds to leave out
    pub exclude: Vec<Exclude>,
    /// Oldest creation time to include
    pub start_time: Option<DateTime<Utc>>,
    /// Newest creation time to include
    pub end_time: Option<DateTime<Utc>>,
    /// Only tweets newer than this ID
    pub since_id: Option<TweetId>,
    /// Only tweets older than this ID
    pub until_id: Option<TweetId>,
    /// Page size (5..=100)
    pub max_results: Option<u32>,
    /// Pagination cursor
    pub pagination_token: Option<String>,
}

impl TimelineOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field selection.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Leave out a tweet kind.
    pub fn excluding(mut self, kind: Exclude) -> Self {
        if !self.exclude.contains(&kind) {
            self.exclude.push(kind);
        }
        self
    }

    /// Set the page size.
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }
}

impl QueryOptions for TimelineOptions {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        self.fields.append_to(params)?;
        params.insert_list("exclude", &self.exclude);
        params.insert_time("start_time", self.start_time.as_ref());
        params.insert_time("end_time", self.end_time.as_ref());
        params.insert_opt("since_id", self.since_id.as_ref());
        params.insert_opt("until_id", self.until_id.as_ref());
        params.insert_opt("max_results", self.max_results);
        params.insert_opt("pagination_token", self.pagination_token.as_deref());
        Ok(())
    }
}

paginated!(TimelineOptions, pagination_token, "pagination_token");

/// Options for endpoints returning pages of users or list members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListOptions {
    /// Field selection
    pub fields: Fields,
    /// Page size (1..=1000)
    pub max_results: Option<u32>,
    /// Pagination cursor
    pub pagination_token: Option<String>,
}

impl UserListOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field selection.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Set the page size.
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }
}

impl QueryOptions for UserListOptions {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        self.fields.append_to(params)?;
        params.insert_opt("max_results", self.max_results);
        params.insert_opt("pagination_token", self.pagination_token.as_deref());
        Ok(())
    }
}

paginated!(UserListOptions, pagination_token, "pagination_token");

/// Options for the sampled and filtered streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// Field selection
    pub fields: Fields,
    /// Minutes of missed data to replay after a reconnect (1..=5)
    pub backfill_minutes: Option<u32>,
}

impl StreamOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field selection.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Request backfill after reconnects.
    pub fn with_backfill_minutes(mut self, minutes: u32) -> Self {
        self.backfill_minutes = Some(minutes);
        self
    }
}

impl QueryOptions for StreamOptions {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        self.fields.append_to(params)?;
        params.insert_opt("backfill_minutes", self.backfill_minutes);
        Ok(())
    }
}

/// Options for Space search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceSearchOptions {
    /// Search query (required by the API)
    pub query: String,
    /// Field selection
    pub fields: Fields,
    /// Only Spaces in this state
    pub state: Option<SpaceState>,
    /// Page size
    pub max_results: Option<u32>,
}

impl SpaceSearchOptions {
    /// Search for `query` with nothing else set.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the field selection.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Filter by state.
    pub fn with_state(mut self, state: SpaceState) -> Self {
        self.state = Some(state);
        self
    }
}

impl QueryOptions for SpaceSearchOptions {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        if !self.query.is_empty() {
            params.insert("query", self.query.as_str());
        }
        self.fields.append_to(params)?;
        params.insert_opt("state", self.state.map(|s| s.as_str()));
        params.insert_opt("max_results", self.max_results);
        Ok(())
    }
}

/// Options for listing filtered-stream rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesQuery {
    /// Only these rules
    pub ids: Vec<RuleId>,
    /// Page size
    pub max_results: Option<u32>,
    /// Pagination cursor
    pub pagination_token: Option<String>,
}

impl RulesQuery {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return the given rules.
    pub fn with_ids<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RuleId>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }
}

impl QueryOptions for RulesQuery {
    fn append_to(&self, params: &mut QueryParams) -> Result<()> {
        params.insert_list("ids", &self.ids);
        params.insert_opt("max_results", self.max_results);
        params.insert_opt("pagination_token", self.pagination_token.as_deref());
        Ok(())
    }
}

paginated!(RulesQuery, pagination_token, "pagination_token");
