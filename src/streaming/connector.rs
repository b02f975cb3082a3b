//! Opening the underlying connection.

use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::{Stream, StreamExt};
use tracing::debug;

use crate::client::{transport_error, ClientInner, Endpoint};
use crate::query::QueryParams;
use crate::{Error, Result};

/// The body of an open streaming connection.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Opens a streaming connection.
///
/// A session calls [`connect`](Connector::connect) once per
/// connection attempt. Implement this to drive a session from something
/// other than HTTP.
pub trait Connector: Send + Sync + 'static {
    /// Open a connection and return its body.
    ///
    /// Failures for which [`is_transient`] holds make the session
    /// reconnect; any other error closes it.
    fn connect(&self) -> BoxFuture<'static, Result<ByteStream>>;
}

/// Returns `true` if a connection failure is worth retrying.
///
/// Network errors, timeouts and HTTP 429/5xx are transient; credential,
/// request and other API errors are not.
pub fn is_transient(error: &Error) -> bool {
    error.is_transport() || error.is_retryable()
}

/// Connects to a streaming endpoint over HTTP.
pub struct HttpConnector {
    inner: Arc<ClientInner>,
    endpoint: Endpoint,
    query: QueryParams,
}

impl HttpConnector {
    pub(crate) fn new(inner: Arc<ClientInner>, endpoint: Endpoint, query: QueryParams) -> Result<Self> {
        // Surface credential and URL problems before a session is spawned
        inner.prepare::<()>(&endpoint, &[], &query, None)?;
        Ok(Self {
            inner,
            endpoint,
            query,
        })
    }
}

impl Connector for HttpConnector {
    fn connect(&self) -> BoxFuture<'static, Result<ByteStream>> {
        let inner = self.inner.clone();
        let endpoint = self.endpoint.clone();
        let query = self.query.clone();

        Box::pin(async move {
            let request = inner.prepare::<()>(&endpoint, &[], &query, None)?;
            debug!(url = %request.url(), "Opening stream");

            let response = request
                .into_builder(&inner.stream_http)
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status().as_u16();
            if !response.status().is_success() {
                let body = response.bytes().await.map_err(transport_error)?;
                let body = serde_json::from_slice(&body).unwrap_or_else(|_| {
                    serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())
                });
                return Err(Error::from_api_response(status, body));
            }

            let body: ByteStream =
                Box::pin(response.bytes_stream().map(|chunk| chunk.map_err(transport_error)));
            Ok(body)
        })
    }
}
