//! Streaming realtime transport over a long-lived HTTP response.
//!
//! The server pushes newline-delimited SSE frames (`data: {json}`) on
//! `GET /events`. A pump task reads the byte stream and forwards parsed
//! events as [`ChannelSignal`]s; closing the connection aborts the pump,
//! which drops the HTTP response and tears the link down.

use futures::StreamExt;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use matmart_core::error::{MatmartError, Result};
use matmart_core::realtime::event::{ChannelSignal, RealtimeEvent};
use matmart_core::realtime::transport::{ConnectionHandle, RealtimeConnection, RealtimeTransport};

/// Buffered signals between the pump task and the store.
const SIGNAL_CHANNEL_CAPACITY: usize = 64;

/// SSE-style [`RealtimeTransport`] over reqwest.
#[derive(Clone)]
pub struct SseTransport {
    client: Client,
    base_url: String,
}

impl SseTransport {
    /// Creates a transport for the given API base URL (no trailing slash).
    ///
    /// No request timeout is set on this client: the event stream is a
    /// deliberately long-lived response.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| MatmartError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

/// Close handle that aborts the pump task.
struct AbortOnClose {
    handle: AbortHandle,
}

impl ConnectionHandle for AbortOnClose {
    fn close(&self) {
        self.handle.abort();
    }
}

#[async_trait::async_trait]
impl RealtimeTransport for SseTransport {
    async fn connect(&self, token: &str) -> Result<RealtimeConnection> {
        let response = self
            .client
            .get(format!("{}/events", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MatmartError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(if status == reqwest::StatusCode::UNAUTHORIZED {
                MatmartError::auth("event stream rejected the session token")
            } else {
                MatmartError::api(status.as_u16(), "event stream unavailable")
            });
        }

        let (tx, rx) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);
        // The link is established once the response headers arrive.
        let _ = tx.send(ChannelSignal::Connected).await;

        let pump = tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();
            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        debug!("event stream interrupted: {e}");
                        break;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));
                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].to_string();
                    buffer.drain(..=newline);
                    if let Some(event) = parse_event_line(&line) {
                        if tx.send(ChannelSignal::Event(event)).await.is_err() {
                            // Receiver gone: the store disconnected.
                            return;
                        }
                    }
                }
            }
            let _ = tx.send(ChannelSignal::Disconnected).await;
        });

        let handle = AbortOnClose {
            handle: pump.abort_handle(),
        };
        Ok(RealtimeConnection::new(Box::new(handle), rx))
    }
}

/// Parses one SSE line, returning the event carried by a `data:` frame.
///
/// Blank lines (frame separators), comment lines, and `event:`/`id:`
/// fields are skipped; the event name travels inside the JSON payload's
/// `type` tag. Unparseable payloads are logged and dropped rather than
/// tearing the stream down.
fn parse_event_line(line: &str) -> Option<RealtimeEvent> {
    let line = line.trim();
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }
    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("dropping malformed push event: {e}");
            None
        }
    }
}
