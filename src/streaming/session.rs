//! The streaming session state machine.
//!
//! ```text
//! Connecting ──ok──▶ Streaming ──drop/timeout──▶ Reconnecting ──backoff──▶ Connecting
//!     │                  │                            │
//!     └──fatal/cancel────┴──────────cancel────────────┴──exhausted──▶ Closed
//! ```
//!
//! The session runs on its own task. It is the only writer of the data and
//! error channels; when it reaches `Closed` it drops both senders, so the
//! consumer sees channel closure as the end of the stream.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, error, info, trace, warn};

use super::config::StreamConfig;
use super::connector::{is_transient, ByteStream, Connector};
use super::lines::{Frame, LineBuffer};
use crate::client::{decode_stream_object, ApiProblem};
use crate::models::{Includes, MatchingRule};
use crate::Error;

/// One object delivered by a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamItem<T> {
    /// Primary payload
    pub data: T,
    /// Side-loaded entities
    pub includes: Includes,
    /// Filter rules this item matched (filtered stream only)
    pub matching_rules: Vec<MatchingRule>,
    /// Per-item errors sent alongside the data
    pub errors: Vec<ApiProblem>,
}

/// An event on a session's error channel.
#[derive(Debug, ThisError)]
pub enum StreamError {
    /// A line could not be decoded and was skipped
    #[error("Undecodable stream line: {error}")]
    Decode {
        /// The raw line
        line: String,
        /// Why decoding failed
        error: Error,
    },

    /// Connecting or reading failed; the session will reconnect
    #[error("Stream transport error: {0}")]
    Transport(Error),

    /// The session closed because of this error
    #[error("Stream closed: {0}")]
    Fatal(Error),
}

impl StreamError {
    /// Returns `true` if this error ended the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StreamError::Fatal(_))
    }

    /// The underlying error.
    pub fn error(&self) -> &Error {
        match self {
            StreamError::Decode { error, .. } => error,
            StreamError::Transport(e) | StreamError::Fatal(e) => e,
        }
    }
}

/// Handle to a running streaming session.
///
/// Items arrive on the data channel in the order they were read. Errors
/// arrive on a separate channel. Reading it is optional: non-fatal events
/// that do not fit are dropped with a warning, and one slot is always kept
/// free for the error that closes the session. Dropping the handle cancels
/// the session.
///
/// # Example
///
/// ```no_run
/// use twitter_v2_rs::query::StreamOptions;
///
/// # async fn example(client: twitter_v2_rs::TwitterClient) -> twitter_v2_rs::Result<()> {
/// let mut session = client.streams().filtered(&StreamOptions::new())?;
///
/// loop {
///     tokio::select! {
///         item = session.next_item() => match item {
///             Some(item) => println!("{:?} {}", item.matching_rules, item.data.text),
///             None => break,
///         },
///         Some(err) = session.next_error() => eprintln!("{err}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct StreamSession<T> {
    data: mpsc::Receiver<StreamItem<T>>,
    errors: mpsc::Receiver<StreamError>,
    cancel: CancellationToken,
    guard: DropGuard,
    task: JoinHandle<()>,
}

impl<T: DeserializeOwned + Send + 'static> StreamSession<T> {
    /// Start a session on the current Tokio runtime.
    pub fn spawn<C: Connector>(connector: C, config: StreamConfig) -> Self {
        Self::spawn_with_token(connector, config, &CancellationToken::new())
    }

    /// Start a session that also stops when `parent` is cancelled.
    pub fn spawn_with_token<C: Connector>(
        connector: C,
        config: StreamConfig,
        parent: &CancellationToken,
    ) -> Self {
        let (data_tx, data) = mpsc::channel(config.data_capacity.max(1));
        let (error_tx, errors) = mpsc::channel(config.error_capacity.max(1) + 1);
        let cancel = parent.child_token();

        let worker = Worker {
            connector,
            config,
            data_tx,
            error_tx,
            cancel: cancel.clone(),
            attempts: 0,
            _marker: PhantomData::<fn() -> T>,
        };
        let task = tokio::spawn(worker.run());

        Self {
            data,
            errors,
            guard: cancel.clone().drop_guard(),
            cancel,
            task,
        }
    }
}

impl<T> StreamSession<T> {
    /// Wait for the next item. `None` means the session is closed.
    pub async fn next_item(&mut self) -> Option<StreamItem<T>> {
        self.data.recv().await
    }

    /// Wait for the next error event. `None` means the session is closed.
    pub async fn next_error(&mut self) -> Option<StreamError> {
        self.errors.recv().await
    }

    /// Ask the session to stop. Both channels close shortly after.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that stops this session when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns `true` once the session task has ended.
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the session and wait for its task to finish.
    pub async fn stop(self) {
        let (_data, _errors, cancel, task) = self.into_parts();
        cancel.cancel();
        if let Err(e) = task.await {
            error!(error = %e, "Stream task failed");
        }
    }

    /// Take the raw channels.
    ///
    /// The session keeps running until the returned token is cancelled, a
    /// fatal error occurs, or the data receiver is dropped.
    pub fn into_channels(
        self,
    ) -> (
        mpsc::Receiver<StreamItem<T>>,
        mpsc::Receiver<StreamError>,
        CancellationToken,
    ) {
        let (data, errors, cancel, _task) = self.into_parts();
        (data, errors, cancel)
    }

    fn into_parts(
        self,
    ) -> (
        mpsc::Receiver<StreamItem<T>>,
        mpsc::Receiver<StreamError>,
        CancellationToken,
        JoinHandle<()>,
    ) {
        let StreamSession {
            data,
            errors,
            cancel,
            guard,
            task,
        } = self;
        guard.disarm();
        (data, errors, cancel, task)
    }
}

impl<T> Stream for StreamSession<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.data.poll_recv(cx)
    }
}

impl<T> std::fmt::Debug for StreamSession<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSession")
            .field("closed", &self.is_closed())
            .finish()
    }
}

enum State {
    Connecting,
    Streaming(ByteStream),
    Reconnecting,
    Closed,
}

struct Worker<T, C> {
    connector: C,
    config: StreamConfig,
    data_tx: mpsc::Sender<StreamItem<T>>,
    error_tx: mpsc::Sender<StreamError>,
    cancel: CancellationToken,
    /// Consecutive failed connection attempts.
    attempts: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> Worker<T, C>
where
    T: DeserializeOwned + Send + 'static,
    C: Connector,
{
    async fn run(mut self) {
        let mut state = State::Connecting;
        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            state = match state {
                State::Connecting => self.connect().await,
                State::Streaming(body) => self.read(body).await,
                State::Reconnecting => self.backoff().await,
                State::Closed => break,
            };
        }
        info!("Stream session closed");
    }

    async fn connect(&mut self) -> State {
        debug!(attempt = self.attempts, "Connecting to stream");
        let connect = tokio::time::timeout(self.config.connect_timeout, self.connector.connect());

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return State::Closed,
            result = connect => result,
        };

        match result {
            Ok(Ok(body)) => {
                info!("Stream connected");
                self.attempts = 0;
                State::Streaming(body)
            }
            Ok(Err(e)) => self.fail(e),
            Err(_) => self.fail(Error::Timeout),
        }
    }

    async fn read(&mut self, mut body: ByteStream) -> State {
        let mut lines = LineBuffer::new(self.config.max_line_bytes);

        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return State::Closed,
                _ = self.data_tx.closed() => {
                    info!("Data receiver dropped, closing stream");
                    return State::Closed;
                }
                next = tokio::time::timeout(self.config.inactivity_timeout, body.next()) => next,
            };

            let chunk = match next {
                Ok(Some(Ok(chunk))) => chunk,
                Ok(Some(Err(e))) => return self.fail(e),
                Ok(None) => {
                    if lines.pending() > 0 {
                        debug!(bytes = lines.pending(), "Discarding partial line");
                    }
                    return self.fail(Error::StreamDisconnected);
                }
                Err(_) => {
                    warn!(
                        timeout_secs = self.config.inactivity_timeout.as_secs(),
                        "No data or heartbeat within timeout"
                    );
                    return self.fail(Error::Timeout);
                }
            };

            lines.push(&chunk);
            while let Some(frame) = lines.next_frame() {
                match frame {
                    Frame::Heartbeat => trace!("Heartbeat"),
                    Frame::Line(line) => {
                        if let Some(next) = self.publish(&line).await {
                            return next;
                        }
                    }
                    Frame::Oversized(len) => {
                        warn!(bytes = len, "Skipping oversized stream line");
                        self.report(StreamError::Decode {
                            line: String::new(),
                            error: Error::UnexpectedResponse(format!(
                                "line of {len} bytes exceeds limit of {}",
                                self.config.max_line_bytes
                            )),
                        });
                    }
                }
            }
        }
    }

    /// Decode and forward one line. Returns the next state if the current
    /// connection should be abandoned.
    async fn publish(&mut self, line: &[u8]) -> Option<State> {
        match decode_stream_object::<T>(line) {
            Ok((response, matching_rules)) => {
                let (data, includes, errors) = response.into_parts();
                let item = StreamItem {
                    data,
                    includes,
                    matching_rules,
                    errors,
                };
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Some(State::Closed),
                    sent = self.data_tx.send(item) => match sent {
                        Ok(()) => None,
                        Err(_) => {
                            info!("Data receiver dropped, closing stream");
                            Some(State::Closed)
                        }
                    },
                }
            }
            Err(Error::Api { errors, body, .. })
                if errors.iter().any(ApiProblem::is_operational_disconnect) =>
            {
                warn!(body = %body, "Server closed the stream");
                self.report(StreamError::Transport(Error::Api {
                    status: 200,
                    errors,
                    body,
                }));
                Some(State::Reconnecting)
            }
            Err(e @ Error::Api { .. }) => {
                error!(error = %e, "Stream terminated by server");
                self.report_fatal(e);
                Some(State::Closed)
            }
            Err(e) => {
                warn!(error = %e, "Skipping undecodable stream line");
                self.report(StreamError::Decode {
                    line: String::from_utf8_lossy(line).into_owned(),
                    error: e,
                });
                None
            }
        }
    }

    /// Handle a failed connect or read.
    fn fail(&self, error: Error) -> State {
        if !is_transient(&error) {
            error!(error = %error, "Stream failed");
            self.report_fatal(error);
            return State::Closed;
        }

        warn!(error = %error, "Stream disconnected");
        self.report(StreamError::Transport(error));
        State::Reconnecting
    }

    async fn backoff(&mut self) -> State {
        let reconnect = &self.config.reconnect;
        if !reconnect.enabled || reconnect.max_attempts_exceeded(self.attempts) {
            let attempts = self.attempts;
            self.report_fatal(Error::ReconnectExhausted { attempts });
            return State::Closed;
        }

        let delay = reconnect.backoff_for_attempt(self.attempts);
        self.attempts += 1;
        info!(
            attempt = self.attempts,
            delay_ms = delay.as_millis() as u64,
            "Reconnecting after delay"
        );

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => State::Closed,
            _ = self.data_tx.closed() => State::Closed,
            _ = tokio::time::sleep(delay) => State::Connecting,
        }
    }

    /// Report a non-fatal event without blocking the read loop.
    ///
    /// The last free slot belongs to the fatal event.
    fn report(&self, event: StreamError) {
        if self.error_tx.capacity() <= 1 {
            warn!(event = %event, "Error channel full, dropping event");
            return;
        }
        if let Err(TrySendError::Full(event)) = self.error_tx.try_send(event) {
            warn!(event = %event, "Error channel full, dropping event");
        }
    }

    /// Report the error that closes the session.
    ///
    /// Never blocks, so the session reaches `Closed` even if nobody reads
    /// the error channel.
    fn report_fatal(&self, error: Error) {
        if let Err(TrySendError::Full(event)) = self.error_tx.try_send(StreamError::Fatal(error)) {
            warn!(event = %event, "Error channel full, dropping fatal event");
        }
    }
}
