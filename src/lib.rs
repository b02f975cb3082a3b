//! # twitter-v2-rs
//!
//! An async Rust client for the Twitter API v2.
//!
//! The crate covers the request/response endpoints (tweets, users, lists,
//! Spaces and filtered-stream rules) and the long-lived sampled and filtered
//! tweet streams.
//!
//! ## Features
//!
//! - **Typed selectors**: expansions and `*.fields` values are checked
//!   against their family before anything is sent
//! - **Side-loaded data**: every response keeps its `includes` table and
//!   per-item `errors`, so partial results are not lost
//! - **Pagination**: [`Cursor`] for manual paging, [`client::PaginatedStream`]
//!   to follow `next_token` lazily
//! - **Streaming**: a cancellation-aware session with reconnect and backoff
//!   (`streaming` feature, on by default)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use twitter_v2_rs::{TwitterClient, UserId};
//! use twitter_v2_rs::models::{Expansion, TweetField, UserField};
//! use twitter_v2_rs::query::{Fields, TimelineOptions};
//!
//! #[tokio::main]
//! async fn main() -> twitter_v2_rs::Result<()> {
//!     // Reads TWITTER_BEARER_TOKEN
//!     let client = TwitterClient::from_env()?;
//!
//!     let options = TimelineOptions::new()
//!         .with_max_results(10)
//!         .with_fields(
//!             Fields::new()
//!                 .expansions([Expansion::AuthorId])
//!                 .tweet_fields([TweetField::CreatedAt])
//!                 .user_fields([UserField::Username]),
//!         );
//!
//!     let page = client.tweets().timeline(&UserId::new("2244994945"), &options).await?;
//!     for tweet in &page.data {
//!         let author = page.includes.author_of(tweet).map(|u| u.username.as_str());
//!         println!("{:?} {}", author, tweet.text);
//!     }
//!
//!     if page.is_partial() {
//!         eprintln!("{} items could not be returned", page.errors().len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Paging
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use twitter_v2_rs::TwitterClient;
//! use twitter_v2_rs::query::SearchOptions;
//!
//! # async fn example(client: TwitterClient) -> twitter_v2_rs::Result<()> {
//! let mut tweets = client
//!     .tweets()
//!     .search_recent_stream(SearchOptions::new("from:TwitterDev").with_max_results(100));
//!
//! while let Some(tweet) = tweets.next().await {
//!     println!("{}", tweet?.text);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod query;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export primary types at crate root for convenience
pub use auth::BearerToken;
pub use client::{ClientConfig, Cursor, Response, TwitterClient};
pub use error::{Error, Result};
pub use models::{ListId, MediaKey, PlaceId, PollId, RuleId, SpaceId, TopicId, TweetId, UserId};

/// Prelude module for convenient imports.
///
/// ```rust
/// use twitter_v2_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::BearerToken;
    pub use crate::client::{ClientConfig, Cursor, Meta, PaginatedStream, Response, TwitterClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Identifiers
        ListId, MediaKey, PlaceId, PollId, RuleId, SpaceId, TopicId, TweetId, UserId,
        // Selector catalogs
        Expansion, ListField, MediaField, PlaceField, PollField, SpaceField, TopicField,
        TweetField, UserField,
        // Entities
        Includes, List, Media, NewRule, Place, Poll, Space, StreamRule, Topic, Tweet, User,
    };
    pub use crate::query::{
        Fields, LookupOptions, Paginated, QueryOptions, RulesQuery, SearchOptions,
        SpaceSearchOptions, StreamOptions, TimelineOptions, UserListOptions,
    };
    #[cfg(feature = "streaming")]
    pub use crate::streaming::{
        ReconnectConfig, StreamConfig, StreamError, StreamItem, StreamSession,
    };
}
