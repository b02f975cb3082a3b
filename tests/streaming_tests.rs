//! Integration tests for streaming sessions.
//!
//! Most tests drive the session with a scripted in-memory [`Connector`] so
//! that disconnects, malformed lines and refused connections happen exactly
//! when expected. The last section runs the HTTP connector against a local
//! `wiremock` server.
//!
//! Run with: cargo test --test streaming_tests

#![cfg(feature = "streaming")]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::{stream, StreamExt};
use serde_json::json;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

use twitter_v2_rs::models::Tweet;
use twitter_v2_rs::streaming::{
    ByteStream, Connector, ReconnectConfig, StreamConfig, StreamError, StreamSession,
};
use twitter_v2_rs::{Error, Result};

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

const WAIT: Duration = Duration::from_secs(5);

/// One scripted connection attempt.
enum Script {
    /// Accept and deliver these chunks; then end or stay open
    Accept { chunks: Vec<&'static str>, hang: bool },
    /// Refuse with this error
    Refuse(Error),
}

/// Replays scripted connections in order. Once the script runs out every
/// attempt is refused as a dropped connection.
#[derive(Clone)]
struct ScriptedConnector {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    attempts: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    fn new(scripts: impl IntoIterator<Item = Script>) -> Self {
        Self {
            scripts: Arc::new(Mutex::new(scripts.into_iter().collect())),
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Connector for ScriptedConnector {
    fn connect(&self) -> BoxFuture<'static, Result<ByteStream>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let next = self.scripts.lock().unwrap().pop_front();

        Box::pin(async move {
            match next {
                Some(Script::Accept { chunks, hang }) => {
                    let body = stream::iter(
                        chunks
                            .into_iter()
                            .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes()))),
                    );
                    if hang {
                        let body: ByteStream = Box::pin(body.chain(stream::pending()));
                        Ok(body)
                    } else {
                        let body: ByteStream = Box::pin(body);
                        Ok(body)
                    }
                }
                Some(Script::Refuse(error)) => Err(error),
                None => Err(Error::StreamDisconnected),
            }
        })
    }
}

fn accept(chunks: Vec<&'static str>) -> Script {
    Script::Accept { chunks, hang: false }
}

fn accept_and_hang(chunks: Vec<&'static str>) -> Script {
    Script::Accept { chunks, hang: true }
}

/// Short backoffs so reconnects happen promptly.
fn fast_config() -> StreamConfig {
    init_logging();
    StreamConfig::default().with_reconnect(
        ReconnectConfig::default()
            .with_backoff(Duration::from_millis(5), Duration::from_millis(20)),
    )
}

async fn next_text(session: &mut StreamSession<Tweet>) -> String {
    timeout(WAIT, session.next_item())
        .await
        .expect("item within timeout")
        .expect("session still open")
        .data
        .text
}

async fn next_error(session: &mut StreamSession<Tweet>) -> StreamError {
    timeout(WAIT, session.next_error())
        .await
        .expect("error within timeout")
        .expect("session still open")
}

/// Read error events until the channel closes.
async fn drain_errors(session: &mut StreamSession<Tweet>) -> Vec<StreamError> {
    let mut events = Vec::new();
    while let Some(event) = timeout(WAIT, session.next_error())
        .await
        .expect("error channel should close")
    {
        events.push(event);
    }
    events
}

// ============================================================================
// DELIVERY AND RECOVERY
// ============================================================================

mod delivery_tests {
    use super::*;

    #[tokio::test]
    async fn test_heartbeat_malformed_line_and_drop() {
        let connector = ScriptedConnector::new([
            accept(vec![
                "\r\n",
                "{\"data\":{\"id\":\"1\",\"text\":\"first\"}}\r\n",
                "{not json\r\n",
                "{\"data\":{\"id\":\"2\",\"text\":\"second\"}}\r\n",
            ]),
            accept_and_hang(vec!["{\"data\":{\"id\":\"3\",\"text\":\"third\"}}\r\n"]),
        ]);
        let mut session: StreamSession<Tweet> =
            StreamSession::spawn(connector.clone(), fast_config());

        assert_eq!(next_text(&mut session).await, "first");
        assert_eq!(next_text(&mut session).await, "second");
        assert_eq!(next_text(&mut session).await, "third");

        match next_error(&mut session).await {
            StreamError::Decode { line, error } => {
                assert_eq!(line, "{not json");
                assert!(matches!(error, Error::Json(_)));
            }
            other => panic!("expected a decode event, got {other:?}"),
        }
        match next_error(&mut session).await {
            StreamError::Transport(Error::StreamDisconnected) => {}
            other => panic!("expected a transport event, got {other:?}"),
        }

        assert_eq!(connector.attempts(), 2);
        session.stop().await;
    }

    #[tokio::test]
    async fn test_lines_split_across_chunks() {
        let connector = ScriptedConnector::new([accept_and_hang(vec![
            "{\"data\":{\"id\":\"1\",",
            "\"text\":\"split\"}}\r",
            "\n{\"data\":{\"id\":\"2\",\"text\":\"whole\"}}\r\n",
        ])]);
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector, fast_config());

        assert_eq!(next_text(&mut session).await, "split");
        assert_eq!(next_text(&mut session).await, "whole");
        session.stop().await;
    }

    #[tokio::test]
    async fn test_matching_rules_and_includes() {
        let connector = ScriptedConnector::new([accept_and_hang(vec![concat!(
            "{\"data\":{\"id\":\"7\",\"text\":\"meow\",\"author_id\":\"42\"},",
            "\"includes\":{\"users\":[{\"id\":\"42\",\"name\":\"Cat\",\"username\":\"cat\"}]},",
            "\"matching_rules\":[{\"id\":\"1273026480692322304\",\"tag\":\"cats\"}]}\r\n"
        )])]);
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector, fast_config());

        let item = timeout(WAIT, session.next())
            .await
            .expect("item within timeout")
            .expect("session still open");

        assert_eq!(item.matching_rules.len(), 1);
        assert_eq!(item.matching_rules[0].tag.as_deref(), Some("cats"));
        assert_eq!(item.includes.author_of(&item.data).unwrap().username, "cat");
        assert!(item.errors.is_empty());
        session.stop().await;
    }

    #[tokio::test]
    async fn test_operational_disconnect_reconnects() {
        let connector = ScriptedConnector::new([
            accept_and_hang(vec![
                "{\"data\":{\"id\":\"1\",\"text\":\"before\"}}\r\n",
                concat!(
                    "{\"errors\":[{\"title\":\"operational-disconnect\",",
                    "\"disconnect_type\":\"UpstreamOperationalDisconnect\",",
                    "\"detail\":\"This stream has been disconnected upstream for operational reasons.\",",
                    "\"type\":\"https://api.twitter.com/2/problems/operational-disconnect\"}]}\r\n"
                ),
            ]),
            accept_and_hang(vec!["{\"data\":{\"id\":\"2\",\"text\":\"after\"}}\r\n"]),
        ]);
        let mut session: StreamSession<Tweet> =
            StreamSession::spawn(connector.clone(), fast_config());

        assert_eq!(next_text(&mut session).await, "before");
        assert_eq!(next_text(&mut session).await, "after");

        let event = next_error(&mut session).await;
        assert!(!event.is_fatal());
        match event {
            StreamError::Transport(Error::Api { errors, .. }) => {
                assert!(errors[0].is_operational_disconnect());
            }
            other => panic!("expected a transport event, got {other:?}"),
        }
        assert_eq!(connector.attempts(), 2);
        session.stop().await;
    }

    #[tokio::test]
    async fn test_in_band_error_closes_session() {
        let connector = ScriptedConnector::new([accept_and_hang(vec![
            concat!(
                "{\"errors\":[{\"title\":\"ConnectionException\",",
                "\"detail\":\"This stream is currently at the maximum allowed connection limit.\",",
                "\"connection_issue\":\"TooManyConnections\",",
                "\"type\":\"https://api.twitter.com/2/problems/streaming-connection\"}]}\r\n"
            ),
            "{\"data\":{\"id\":\"1\",\"text\":\"never delivered\"}}\r\n",
        ])]);
        let mut session: StreamSession<Tweet> =
            StreamSession::spawn(connector.clone(), fast_config());

        let item = timeout(WAIT, session.next_item())
            .await
            .expect("data channel closes promptly");
        assert!(item.is_none());

        let events = drain_errors(&mut session).await;
        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamError::Fatal(Error::Api { errors, .. }) => {
                assert_eq!(errors[0].title.as_deref(), Some("ConnectionException"));
            }
            other => panic!("expected a fatal API error, got {other:?}"),
        }
        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn test_oversized_line_is_skipped() {
        let connector = ScriptedConnector::new([accept_and_hang(vec![
            "{\"data\":{\"id\":\"1\",\"text\":\"",
            "this text is far too long for the configured line limit",
            "\"}}\r\n",
            "{\"data\":{\"id\":\"2\",\"text\":\"short\"}}\r\n",
        ])]);
        let config = fast_config().with_max_line_bytes(64);
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector, config);

        assert_eq!(next_text(&mut session).await, "short");
        match next_error(&mut session).await {
            StreamError::Decode { line, error } => {
                assert!(line.is_empty());
                assert!(matches!(error, Error::UnexpectedResponse(_)));
            }
            other => panic!("expected a decode event, got {other:?}"),
        }
        session.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_inactivity_timeout_reconnects() {
        let connector = ScriptedConnector::new([
            accept_and_hang(vec!["{\"data\":{\"id\":\"1\",\"text\":\"before\"}}\r\n"]),
            accept_and_hang(vec!["{\"data\":{\"id\":\"2\",\"text\":\"after\"}}\r\n"]),
        ]);
        let config = fast_config().with_inactivity_timeout(Duration::from_secs(2));
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector.clone(), config);

        assert_eq!(next_text(&mut session).await, "before");
        // Paused time advances to the inactivity deadline once every task idles.
        assert_eq!(next_text(&mut session).await, "after");

        match next_error(&mut session).await {
            StreamError::Transport(Error::Timeout) => {}
            other => panic!("expected a timeout, got {other:?}"),
        }
        assert_eq!(connector.attempts(), 2);
        session.stop().await;
    }
}

// ============================================================================
// TERMINATION
// ============================================================================

mod termination_tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_during_backoff_closes_both_channels() {
        init_logging();
        let connector = ScriptedConnector::new([Script::Refuse(Error::Timeout)]);
        let config = StreamConfig::default().with_reconnect(
            ReconnectConfig::default()
                .with_backoff(Duration::from_secs(3600), Duration::from_secs(3600)),
        );
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector.clone(), config);

        assert!(matches!(
            next_error(&mut session).await,
            StreamError::Transport(Error::Timeout)
        ));
        session.cancel();

        let item = timeout(Duration::from_secs(1), session.next_item())
            .await
            .expect("data channel closes promptly");
        assert!(item.is_none());
        let event = timeout(Duration::from_secs(1), session.next_error())
            .await
            .expect("error channel closes promptly");
        assert!(event.is_none());
        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn test_parent_token_cancels_session() {
        init_logging();
        let parent = tokio_util::sync::CancellationToken::new();
        let connector = ScriptedConnector::new([accept_and_hang(vec![])]);
        let mut session: StreamSession<Tweet> =
            StreamSession::spawn_with_token(connector, fast_config(), &parent);

        parent.cancel();
        let item = timeout(WAIT, session.next_item())
            .await
            .expect("data channel closes promptly");
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn test_exhausted_reconnects_are_fatal() {
        let connector = ScriptedConnector::new([]);
        let config = fast_config().with_reconnect(
            ReconnectConfig::default()
                .with_max_attempts(2)
                .with_backoff(Duration::from_millis(1), Duration::from_millis(5)),
        );
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector.clone(), config);

        let events = drain_errors(&mut session).await;
        let (last, transient) = events.split_last().expect("at least one event");

        assert_eq!(transient.len(), 3);
        assert!(transient
            .iter()
            .all(|e| matches!(e, StreamError::Transport(Error::StreamDisconnected))));
        match last {
            StreamError::Fatal(Error::ReconnectExhausted { attempts }) => assert_eq!(*attempts, 2),
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert!(session.next_item().await.is_none());
        assert_eq!(connector.attempts(), 3);
    }

    #[tokio::test]
    async fn test_unread_error_channel_still_closes() {
        let connector = ScriptedConnector::new([]);
        let config = fast_config().with_capacity(4, 1).with_reconnect(
            ReconnectConfig::default()
                .with_max_attempts(2)
                .with_backoff(Duration::from_millis(1), Duration::from_millis(5)),
        );
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector.clone(), config);

        // Only the data channel is read while the session fails.
        let item = timeout(WAIT, session.next_item())
            .await
            .expect("data channel closes once reconnects are exhausted");
        assert!(item.is_none());
        assert_eq!(connector.attempts(), 3);

        let events = drain_errors(&mut session).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], StreamError::Transport(Error::StreamDisconnected)));
        assert!(matches!(
            events[1],
            StreamError::Fatal(Error::ReconnectExhausted { attempts: 2 })
        ));
    }

    #[tokio::test]
    async fn test_successful_connect_resets_attempts() {
        let connector = ScriptedConnector::new([
            Script::Refuse(Error::Timeout),
            accept(vec!["{\"data\":{\"id\":\"1\",\"text\":\"one\"}}\n"]),
            Script::Refuse(Error::Timeout),
            accept_and_hang(vec!["{\"data\":{\"id\":\"2\",\"text\":\"two\"}}\n"]),
        ]);
        let config = fast_config().with_reconnect(
            ReconnectConfig::default()
                .with_max_attempts(2)
                .with_backoff(Duration::from_millis(1), Duration::from_millis(5)),
        );
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector.clone(), config);

        assert_eq!(next_text(&mut session).await, "one");
        assert_eq!(next_text(&mut session).await, "two");
        assert_eq!(connector.attempts(), 4);
        session.stop().await;
    }

    #[tokio::test]
    async fn test_reconnect_disabled() {
        let connector = ScriptedConnector::new([accept(vec![
            "{\"data\":{\"id\":\"1\",\"text\":\"only\"}}\r\n",
        ])]);
        let config = fast_config().with_reconnect(ReconnectConfig::disabled());
        let mut session: StreamSession<Tweet> = StreamSession::spawn(connector.clone(), config);

        assert_eq!(next_text(&mut session).await, "only");
        let events = drain_errors(&mut session).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], StreamError::Transport(Error::StreamDisconnected)));
        assert!(matches!(
            events[1],
            StreamError::Fatal(Error::ReconnectExhausted { attempts: 0 })
        ));
        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_connect_is_fatal() {
        let connector = ScriptedConnector::new([Script::Refuse(Error::Api {
            status: 401,
            errors: vec![],
            body: json!({ "title": "Unauthorized", "status": 401 }),
        })]);
        let mut session: StreamSession<Tweet> =
            StreamSession::spawn(connector.clone(), fast_config());

        let events = drain_errors(&mut session).await;
        assert_eq!(events.len(), 1);
        assert!(events[0].is_fatal());
        assert!(events[0].error().is_auth_error());
        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn test_dropping_data_receiver_ends_session() {
        let connector = ScriptedConnector::new([accept_and_hang(vec![
            "{\"data\":{\"id\":\"1\",\"text\":\"unread\"}}\r\n",
        ])]);
        let session: StreamSession<Tweet> = StreamSession::spawn(connector, fast_config());
        let (data, mut errors, _cancel) = session.into_channels();
        drop(data);

        let closed = timeout(WAIT, errors.recv())
            .await
            .expect("error channel closes promptly");
        assert!(closed.is_none());
    }
}

// ============================================================================
// HTTP STREAMS
// ============================================================================

mod http_stream_tests {
    use super::*;
    use twitter_v2_rs::models::TweetField;
    use twitter_v2_rs::query::{Fields, StreamOptions};
    use twitter_v2_rs::{ClientConfig, TwitterClient};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_client(server: &MockServer, reconnect: ReconnectConfig) -> TwitterClient {
        init_logging();
        let config = ClientConfig::default()
            .with_base_url(server.uri())
            .with_stream(StreamConfig::default().with_reconnect(reconnect));
        TwitterClient::new("test-token", config).expect("client")
    }

    #[tokio::test]
    async fn test_filtered_stream_over_http() {
        let server = MockServer::start().await;
        let body = concat!(
            "{\"data\":{\"id\":\"1\",\"text\":\"cat\",\"lang\":\"en\"},",
            "\"matching_rules\":[{\"id\":\"5\",\"tag\":\"cats\"}]}\r\n",
            "\r\n",
            "{\"data\":{\"id\":\"2\",\"text\":\"kitten\"},",
            "\"matching_rules\":[{\"id\":\"5\",\"tag\":\"cats\"}]}\r\n",
        );
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/stream"))
            .and(header("authorization", "Bearer test-token"))
            .and(query_param("tweet.fields", "lang"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server, ReconnectConfig::disabled());
        let options =
            StreamOptions::new().with_fields(Fields::new().tweet_fields([TweetField::Lang]));
        let mut session = client.streams().filtered(&options).expect("session");

        assert_eq!(next_text(&mut session).await, "cat");
        assert_eq!(next_text(&mut session).await, "kitten");

        let events = drain_errors(&mut session).await;
        assert!(matches!(
            events.last(),
            Some(StreamError::Fatal(Error::ReconnectExhausted { attempts: 0 }))
        ));
    }

    #[tokio::test]
    async fn test_rejected_credentials_close_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/sample/stream"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "title": "Unauthorized",
                "type": "about:blank",
                "status": 401,
                "detail": "Unauthorized"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server, ReconnectConfig::default());
        let mut session = client.streams().sample(&StreamOptions::new()).expect("session");

        let events = drain_errors(&mut session).await;
        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamError::Fatal(Error::Api { status, .. }) => assert_eq!(*status, 401),
            other => panic!("expected a fatal API error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_token_fails_before_spawn() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
        let client = TwitterClient::new("", config).expect("client");

        let result = client.streams().filtered(&StreamOptions::new());
        assert!(matches!(result, Err(Error::Unauthenticated)));

        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
        let client = TwitterClient::new("   ", config).expect("client");
        let result = client.streams().sample(&StreamOptions::new());
        assert!(matches!(result, Err(Error::Unauthenticated)));
    }
}
