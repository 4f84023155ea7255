//! WebSocket notification stream.
//!
//! Connects to the backend's notification endpoint and streams parsed
//! messages through a [`tokio::sync::broadcast`] channel, reconnecting
//! with exponential backoff + jitter. Authentication travels as a `token`
//! query parameter on the upgrade URL, per the backend's wire contract.
//!
//! [`smoke_test`] is the one-shot diagnostic behind `campus ws-test`:
//! connect, send a probe frame, collect whatever arrives within a short
//! window, and report.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::Error;
use crate::models::Message;

const EVENT_CHANNEL_CAPACITY: usize = 256;

// ── Event type ───────────────────────────────────────────────────────

/// A frame received from the notification WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NotificationEvent {
    /// A well-formed message record.
    Message(Message),
    /// Anything else the server sends (acks, probes, system frames).
    Raw(serde_json::Value),
}

// ── URL construction ─────────────────────────────────────────────────

/// Build the notification WebSocket URL from the API base URL and a token.
///
/// `http(s)://host/api` becomes `ws(s)://host/api/ws/notification?token=...`.
pub fn notification_url(base_url: &Url, token: &str) -> Result<Url, Error> {
    let scheme = match base_url.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    let rest = base_url
        .as_str()
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url.as_str());
    let full = format!("{scheme}://{}/ws/notification", rest.trim_end_matches('/'));

    let mut url = Url::parse(&full).map_err(Error::InvalidUrl)?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url)
}

// ── ReconnectConfig ──────────────────────────────────────────────────

/// Exponential backoff configuration for WebSocket reconnection.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt. Default: 1s.
    pub initial_delay: Duration,

    /// Upper bound on backoff delay. Default: 30s.
    pub max_delay: Duration,

    /// Maximum reconnection attempts before giving up.
    /// `None` means retry forever.
    pub max_retries: Option<u32>,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            max_retries: None,
        }
    }
}

// ── NotificationHandle ───────────────────────────────────────────────

/// Handle to a running notification stream.
///
/// Drop all receivers and call [`shutdown`](Self::shutdown) to tear down
/// the background task.
pub struct NotificationHandle {
    event_rx: broadcast::Receiver<Arc<NotificationEvent>>,
    cancel: CancellationToken,
}

impl NotificationHandle {
    /// Spawn the reconnection loop against the given WebSocket URL.
    ///
    /// Returns immediately; the first connection attempt happens
    /// asynchronously. Subscribe to the receiver to consume events.
    pub fn connect(ws_url: Url, reconnect: ReconnectConfig, cancel: CancellationToken) -> Self {
        let (event_tx, event_rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            ws_loop(ws_url, event_tx, reconnect, task_cancel).await;
        });

        Self { event_rx, cancel }
    }

    /// Get a new broadcast receiver for the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<NotificationEvent>> {
        self.event_rx.resubscribe()
    }

    /// Signal the background task to shut down gracefully.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

// ── Background reconnection loop ─────────────────────────────────────

/// Main loop: connect → read → on error, backoff → reconnect.
async fn ws_loop(
    ws_url: Url,
    event_tx: broadcast::Sender<Arc<NotificationEvent>>,
    reconnect: ReconnectConfig,
    cancel: CancellationToken,
) {
    let mut attempt: u32 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = connect_and_read(&ws_url, &event_tx, &cancel) => {
                match result {
                    // Clean disconnect: reset the counter and reconnect.
                    Ok(()) => {
                        tracing::info!("notification stream disconnected cleanly, reconnecting");
                        attempt = 0;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, attempt, "notification stream error");

                        if let Some(max) = reconnect.max_retries {
                            if attempt >= max {
                                tracing::error!(max_retries = max, "reconnection limit reached, giving up");
                                break;
                            }
                        }

                        let delay = calculate_backoff(attempt, &reconnect);
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => break,
                            _ = tokio::time::sleep(delay) => {}
                        }

                        attempt += 1;
                    }
                }
            }
        }
    }
}

/// Establish a single WebSocket connection and read until it drops.
async fn connect_and_read(
    url: &Url,
    event_tx: &broadcast::Sender<Arc<NotificationEvent>>,
    cancel: &CancellationToken,
) -> Result<(), Error> {
    tracing::debug!(url = %url, "connecting to notification stream");

    let (ws_stream, _response) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .map_err(|e| Error::WebSocketConnect(e.to_string()))?;

    tracing::info!("notification stream connected");

    let (_write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            frame = read.next() => {
                match frame {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        let _ = event_tx.send(Arc::new(parse_frame(&text)));
                    }
                    Some(Ok(tungstenite::Message::Ping(_))) => {
                        // tungstenite replies with pong automatically
                    }
                    Some(Ok(tungstenite::Message::Close(frame))) => {
                        if let Some(ref cf) = frame {
                            tracing::info!(code = %cf.code, reason = %cf.reason, "close frame received");
                        }
                        return Ok(());
                    }
                    Some(Err(e)) => return Err(Error::WebSocketConnect(e.to_string())),
                    None => {
                        tracing::info!("notification stream ended");
                        return Ok(());
                    }
                    _ => {
                        // Binary, Pong, Frame -- ignore
                    }
                }
            }
        }
    }
}

/// Parse a text frame into a typed message where possible.
fn parse_frame(text: &str) -> NotificationEvent {
    if let Ok(message) = serde_json::from_str::<Message>(text) {
        return NotificationEvent::Message(message);
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => NotificationEvent::Raw(value),
        Err(_) => NotificationEvent::Raw(serde_json::Value::String(text.to_owned())),
    }
}

// ── Backoff calculation ──────────────────────────────────────────────

/// Exponential backoff with jitter.
///
/// `delay = min(initial * 2^attempt, max) + jitter`
///
/// Jitter is +-25% to spread out reconnection storms from multiple clients.
fn calculate_backoff(attempt: u32, config: &ReconnectConfig) -> Duration {
    let base = config.initial_delay.as_secs_f64() * 2.0_f64.powi(attempt as i32);
    let capped = base.min(config.max_delay.as_secs_f64());

    // Deterministic "jitter" seeded from the attempt number.
    let jitter_factor = 1.0 + 0.25 * (f64::from(attempt) * 7.3).sin();
    let with_jitter = (capped * jitter_factor).max(0.0);

    Duration::from_secs_f64(with_jitter)
}

// ── Smoke test ───────────────────────────────────────────────────────

/// Result of a [`smoke_test`] run.
#[derive(Debug)]
pub struct SmokeReport {
    /// Frames received (as text) before the window closed.
    pub frames: Vec<String>,
    /// Whether the server closed the connection itself.
    pub server_closed: bool,
}

/// One-shot connection diagnostic.
///
/// Connects to `ws_url`, sends a JSON probe frame, then collects incoming
/// text frames for `window` before closing. Connection failure is the
/// only error; an empty frame list is a valid (quiet) outcome.
pub async fn smoke_test(ws_url: &Url, window: Duration) -> Result<SmokeReport, Error> {
    let (ws_stream, _response) = tokio_tungstenite::connect_async(ws_url.as_str())
        .await
        .map_err(|e| Error::WebSocketConnect(e.to_string()))?;

    let (mut write, mut read) = ws_stream.split();

    let probe = serde_json::json!({
        "type": "test",
        "message": "hello from campus-cli",
    });
    write
        .send(tungstenite::Message::text(probe.to_string()))
        .await
        .map_err(|e| Error::WebSocketConnect(e.to_string()))?;

    let mut frames = Vec::new();
    let mut server_closed = false;
    let deadline = tokio::time::sleep(window);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            frame = read.next() => {
                match frame {
                    Some(Ok(tungstenite::Message::Text(text))) => frames.push(text.to_string()),
                    Some(Ok(tungstenite::Message::Close(_))) | None => {
                        server_closed = true;
                        break;
                    }
                    Some(Err(e)) => return Err(Error::WebSocketConnect(e.to_string())),
                    _ => {}
                }
            }
        }
    }

    let _ = write.send(tungstenite::Message::Close(None)).await;
    Ok(SmokeReport {
        frames,
        server_closed,
    })
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_url_from_http_base() {
        let base = Url::parse("http://localhost:8080/api").expect("url");
        let ws = notification_url(&base, "tok123").expect("ws url");
        assert_eq!(
            ws.as_str(),
            "ws://localhost:8080/api/ws/notification?token=tok123"
        );
    }

    #[test]
    fn notification_url_from_https_base() {
        let base = Url::parse("https://campus.example.edu/api/").expect("url");
        let ws = notification_url(&base, "t").expect("ws url");
        assert!(ws.as_str().starts_with("wss://campus.example.edu/api/ws/notification"));
    }

    #[test]
    fn default_reconnect_config() {
        let config = ReconnectConfig::default();
        assert_eq!(config.initial_delay, Duration::from_secs(1));
        assert_eq!(config.max_delay, Duration::from_secs(30));
        assert!(config.max_retries.is_none());
    }

    #[test]
    fn backoff_increases_exponentially() {
        let config = ReconnectConfig::default();

        let d0 = calculate_backoff(0, &config);
        let d1 = calculate_backoff(1, &config);
        let d2 = calculate_backoff(2, &config);

        assert!(d1 > d0, "d1 ({d1:?}) should be greater than d0 ({d0:?})");
        assert!(d2 > d1, "d2 ({d2:?}) should be greater than d1 ({d1:?})");
    }

    #[test]
    fn backoff_caps_at_max_delay() {
        let config = ReconnectConfig {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            max_retries: None,
        };

        let d10 = calculate_backoff(10, &config);
        // With jitter factor up to 1.25, max effective is 12.5s
        assert!(
            d10 <= Duration::from_secs(13),
            "delay at attempt 10 ({d10:?}) should be capped near max_delay"
        );
    }

    #[test]
    fn parse_frame_typed_message() {
        let text = r#"{
            "id": 9, "senderId": 1, "receiverId": 2,
            "content": "assignment posted", "isRead": false
        }"#;
        match parse_frame(text) {
            NotificationEvent::Message(m) => assert_eq!(m.content, "assignment posted"),
            NotificationEvent::Raw(_) => panic!("expected typed message"),
        }
    }

    #[test]
    fn parse_frame_falls_back_to_raw() {
        match parse_frame(r#"{"type":"ack"}"#) {
            NotificationEvent::Raw(v) => assert_eq!(v["type"], "ack"),
            NotificationEvent::Message(_) => panic!("expected raw frame"),
        }

        match parse_frame("not json") {
            NotificationEvent::Raw(v) => assert_eq!(v, "not json"),
            NotificationEvent::Message(_) => panic!("expected raw frame"),
        }
    }
}
