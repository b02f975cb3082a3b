//! HTTP client and transport engine for the Twitter API v2.
//!
//! This module provides the main entry point [`TwitterClient`] together with
//! the pieces every endpoint call goes through:
//!
//! - [`Endpoint`] / [`PreparedRequest`] build the request,
//! - [`Response`] is the decoded envelope (data, includes, meta, errors),
//! - [`Cursor`] and [`PaginatedStream`] walk paged results.
//!
//! # Example
//!
//! ```no_run
//! use twitter_v2_rs::{ClientConfig, TwitterClient, TweetId};
//! use twitter_v2_rs::query::LookupOptions;
//!
//! # async fn example() -> twitter_v2_rs::Result<()> {
//! let client = TwitterClient::new("bearer-token", ClientConfig::default())?;
//!
//! let tweet = client
//!     .tweets()
//!     .get(&TweetId::new("1460323737035677698"), &LookupOptions::new())
//!     .await?;
//! println!("{}", tweet.data.text);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod request;
mod response;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use http::TwitterClient;
pub use paginated::{Cursor, PaginatedStream};
pub use request::{Endpoint, PreparedRequest};
pub use response::{ApiProblem, Meta, Response};

pub(crate) use http::ClientInner;
#[cfg(feature = "streaming")]
pub(crate) use http::transport_error;
#[cfg(feature = "streaming")]
pub(crate) use response::decode_stream_object;
