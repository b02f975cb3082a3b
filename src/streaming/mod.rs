//! Long-lived streaming endpoints.
//!
//! A stream is one HTTP response whose body is an unbounded sequence of
//! newline-delimited JSON objects, interleaved with blank keep-alive lines.
//! [`StreamSession`] owns that connection on a background task, decodes each
//! object and publishes it on a data channel. Transient failures go to a
//! separate error channel and the session reconnects with backoff.
//!
//! # Filtered stream
//!
//! ```no_run
//! use futures_util::StreamExt;
//! use twitter_v2_rs::models::{Expansion, NewRule};
//! use twitter_v2_rs::query::{Fields, StreamOptions};
//!
//! # async fn example(client: twitter_v2_rs::TwitterClient) -> twitter_v2_rs::Result<()> {
//! client
//!     .rules()
//!     .add(&[NewRule::new("cat has:images").with_tag("cats")], false)
//!     .await?;
//!
//! let options = StreamOptions::new()
//!     .with_fields(Fields::new().expansions([Expansion::AuthorId]));
//! let mut session = client.streams().filtered(&options)?;
//!
//! while let Some(item) = session.next().await {
//!     let author = item.includes.author_of(&item.data);
//!     println!("{:?}: {}", author.map(|u| &u.username), item.data.text);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod connector;
mod lines;
mod session;

pub use config::{ReconnectConfig, StreamConfig};
pub use connector::{is_transient, ByteStream, Connector, HttpConnector};
pub use session::{StreamError, StreamItem, StreamSession};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::client::{ClientInner, Endpoint};
use crate::models::Tweet;
use crate::query::QueryOptions;
use crate::query::StreamOptions;
use crate::Result;

const SAMPLE_STREAM: Endpoint = Endpoint::get("/2/tweets/sample/stream");
const FILTERED_STREAM: Endpoint = Endpoint::get("/2/tweets/search/stream");

/// Entry point for the sampled and filtered tweet streams.
///
/// Each call validates the options and the credential synchronously, then
/// spawns a session on the current Tokio runtime using the client's
/// [`StreamConfig`].
pub struct StreamsService {
    inner: Arc<ClientInner>,
}

impl StreamsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Open the ~1% sample of all public tweets.
    pub fn sample(&self, options: &StreamOptions) -> Result<StreamSession<Tweet>> {
        self.sample_with_token(options, &CancellationToken::new())
    }

    /// Open the sample stream, stopping it when `parent` is cancelled.
    pub fn sample_with_token(
        &self,
        options: &StreamOptions,
        parent: &CancellationToken,
    ) -> Result<StreamSession<Tweet>> {
        self.open(SAMPLE_STREAM, options, parent)
    }

    /// Open the stream of tweets matching the active rules.
    ///
    /// Rules are managed through [`TwitterClient::rules`](crate::TwitterClient::rules);
    /// changes apply to a running session without reconnecting.
    pub fn filtered(&self, options: &StreamOptions) -> Result<StreamSession<Tweet>> {
        self.filtered_with_token(options, &CancellationToken::new())
    }

    /// Open the filtered stream, stopping it when `parent` is cancelled.
    pub fn filtered_with_token(
        &self,
        options: &StreamOptions,
        parent: &CancellationToken,
    ) -> Result<StreamSession<Tweet>> {
        self.open(FILTERED_STREAM, options, parent)
    }

    fn open(
        &self,
        endpoint: Endpoint,
        options: &StreamOptions,
        parent: &CancellationToken,
    ) -> Result<StreamSession<Tweet>> {
        let query = options.to_params()?;
        info!(path = endpoint.path, "Starting stream session");

        let connector = HttpConnector::new(self.inner.clone(), endpoint, query)?;
        Ok(StreamSession::spawn_with_token(
            connector,
            self.inner.config.stream.clone(),
            parent,
        ))
    }
}
