//! HTTP client implementation for the Twitter API v2.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::api::{ListsService, RulesService, SpacesService, TweetsService, UsersService};
use crate::auth::BearerToken;
use crate::query::{Paginated, QueryOptions, QueryParams};
use crate::{Error, Result};

use super::config::ClientConfig;
use super::paginated::PaginatedStream;
use super::request::{Endpoint, PreparedRequest};
use super::response::{decode_list, decode_single, Response};

/// The main client for interacting with the Twitter API v2.
///
/// This client provides access to all API services through method calls
/// that return service structs. Cloning is cheap; clones share one
/// connection pool and credential.
///
/// # Example
///
/// ```no_run
/// use twitter_v2_rs::{BearerToken, ClientConfig, TwitterClient};
/// use twitter_v2_rs::query::LookupOptions;
/// use twitter_v2_rs::models::UserField;
///
/// # async fn example() -> twitter_v2_rs::Result<()> {
/// let client = TwitterClient::new(BearerToken::from_env()?, ClientConfig::default())?;
///
/// let options = LookupOptions::new().user_fields([UserField::CreatedAt]);
/// let user = client.users().by_username("TwitterDev", &options).await?;
/// println!("{} joined {:?}", user.data.name, user.data.created_at);
/// # Ok(())
/// # }
/// ```
pub struct TwitterClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    /// Client without a total-request timeout, for long-lived streams.
    #[cfg(feature = "streaming")]
    pub(crate) stream_http: reqwest::Client,
    pub(crate) token: BearerToken,
    pub(crate) base_url: Url,
    pub(crate) config: ClientConfig,
}

impl TwitterClient {
    /// Create a client with a bearer token and configuration.
    pub fn new(token: impl Into<BearerToken>, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL cannot take a path: {}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        #[cfg(feature = "streaming")]
        let stream_http = reqwest::Client::builder()
            .connect_timeout(config.stream.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                #[cfg(feature = "streaming")]
                stream_http,
                token: token.into(),
                base_url,
                config,
            }),
        })
    }

    /// Create a client from `TWITTER_BEARER_TOKEN` with default settings.
    pub fn from_env() -> Result<Self> {
        Self::new(BearerToken::from_env()?, ClientConfig::default())
    }

    /// Get the tweets service.
    pub fn tweets(&self) -> TweetsService {
        TweetsService::new(self.inner.clone())
    }

    /// Get the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the lists service.
    pub fn lists(&self) -> ListsService {
        ListsService::new(self.inner.clone())
    }

    /// Get the Spaces service.
    pub fn spaces(&self) -> SpacesService {
        SpacesService::new(self.inner.clone())
    }

    /// Get the filtered-stream rules service.
    pub fn rules(&self) -> RulesService {
        RulesService::new(self.inner.clone())
    }

    /// Get the streaming service.
    #[cfg(feature = "streaming")]
    pub fn streams(&self) -> crate::streaming::StreamsService {
        crate::streaming::StreamsService::new(self.inner.clone())
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Build a request for `endpoint`.
    pub(crate) fn prepare<B: Serialize>(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &QueryParams,
        body: Option<&B>,
    ) -> Result<PreparedRequest> {
        let body = body.map(serde_json::to_value).transpose()?;
        PreparedRequest::build(
            Some(&self.token),
            &self.base_url,
            endpoint,
            path_params,
            query,
            body,
        )
    }

    /// Send a prepared request and read the whole body.
    pub(crate) async fn send(&self, request: PreparedRequest) -> Result<(u16, Bytes)> {
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = request
            .into_builder(&self.http)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        debug!(status, bytes = body.len(), "Received response");
        Ok((status, body))
    }

    /// Call a single-entity endpoint.
    pub(crate) async fn get_single<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &QueryParams,
    ) -> Result<Response<T>> {
        let request = self.prepare::<()>(endpoint, path_params, query, None)?;
        let (status, body) = self.send(request).await?;
        decode_single(status, &body)
    }

    /// Call a list endpoint.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        path_params: &[(&str, &str)],
        query: &QueryParams,
    ) -> Result<Response<Vec<T>>> {
        let request = self.prepare::<()>(endpoint, path_params, query, None)?;
        let (status, body) = self.send(request).await?;
        decode_list(status, &body)
    }

    /// Call a body-bearing endpoint that answers with a list envelope.
    pub(crate) async fn post_list<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &Endpoint,
        query: &QueryParams,
        body: &B,
    ) -> Result<Response<Vec<T>>> {
        let request = self.prepare(endpoint, &[], query, Some(body))?;
        let (status, body) = self.send(request).await?;
        decode_list(status, &body)
    }

    /// Follow the cursor of a list endpoint lazily.
    pub(crate) fn paginate<T, O>(
        self: &Arc<Self>,
        endpoint: Endpoint,
        path_params: Vec<(&'static str, String)>,
        options: O,
    ) -> PaginatedStream<T>
    where
        T: DeserializeOwned + Send + 'static,
        O: QueryOptions + Paginated + Send + Sync + 'static,
    {
        let inner = self.clone();
        let first = options.page_token().map(String::from);
        let endpoint = Arc::new(endpoint);
        let path_params = Arc::new(path_params);
        let options = Arc::new(options);

        PaginatedStream::new(first, move |token: Option<String>| {
            let inner = inner.clone();
            let endpoint = endpoint.clone();
            let path_params = path_params.clone();
            let options = options.clone();

            Box::pin(async move {
                let mut page = (*options).clone();
                page.set_page_token(token);
                let query = page.to_params()?;
                let params: Vec<(&str, &str)> = path_params
                    .iter()
                    .map(|(name, value)| (*name, value.as_str()))
                    .collect();
                inner.get_list::<T>(&endpoint, &params, &query).await
            })
        })
    }
}

/// Map a reqwest failure, keeping timeouts distinct.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Http(err)
    }
}

impl Clone for TwitterClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish()
    }
}
