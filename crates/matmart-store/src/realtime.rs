//! Realtime slice: ownership of the single push-event connection and
//! dispatch of inbound events.
//!
//! The slice exclusively owns the connection handle; other slices never
//! touch it. Inbound signals are drained by one pump task and re-dispatched
//! through per-event-kind handler registries, so transport concerns stay
//! out of the business slices.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use matmart_core::realtime::{
    ChannelSignal, ConnectionHandle, RealtimeEvent, RealtimeEventKind, RealtimeTransport,
};

use crate::store::Store;

/// State of the realtime slice.
#[derive(Default)]
pub struct RealtimeSlice {
    pub(crate) connection: Option<Box<dyn ConnectionHandle>>,
    pub(crate) pump: Option<JoinHandle<()>>,
    pub connected: bool,
    pub unread_chat: u32,
    pub chat_panel_open: bool,
}

/// Snapshot of the externally visible realtime state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeStatus {
    pub connected: bool,
    pub unread_chat: u32,
    pub chat_panel_open: bool,
}

impl Store {
    /// Opens the push-event channel for the current session.
    ///
    /// Idempotent: a missing token or an existing connection makes this a
    /// no-op. A connect failure is logged; the transport owns any
    /// reconnect policy, so the store does not retry.
    pub async fn connect_realtime(self: &Arc<Self>) {
        let Some(token) = self.auth_token().await else {
            return;
        };
        if self.realtime.lock().await.connection.is_some() {
            return;
        }

        let connection = match self.transport.connect(&token).await {
            Ok(connection) => connection,
            Err(e) => {
                warn!("realtime connect failed: {e}");
                return;
            }
        };
        let (handle, mut signals) = connection.split();

        let store = Arc::clone(self);
        let pump = tokio::spawn(async move {
            while let Some(signal) = signals.recv().await {
                store.dispatch_signal(signal).await;
            }
        });

        let mut slice = self.realtime.lock().await;
        if slice.connection.is_some() {
            // Lost the race to a concurrent connect; discard ours.
            handle.close();
            pump.abort();
            return;
        }
        slice.connection = Some(handle);
        slice.pump = Some(pump);
    }

    /// Closes the channel, if open, and resets the whole slice. Safe to
    /// call when already disconnected.
    pub async fn disconnect_realtime(&self) {
        let mut slice = self.realtime.lock().await;
        if let Some(handle) = slice.connection.take() {
            handle.close();
        }
        if let Some(pump) = slice.pump.take() {
            pump.abort();
        }
        *slice = RealtimeSlice::default();
    }

    /// Registers a handler for one event kind.
    ///
    /// Registries are independent per kind and survive reconnects;
    /// handlers are hooks for views to schedule their own re-fetches and
    /// must not block.
    pub fn on_realtime_event<F>(&self, kind: RealtimeEventKind, handler: F)
    where
        F: Fn(&RealtimeEvent) + Send + Sync + 'static,
    {
        self.handlers
            .write()
            .expect("handler registry lock poisoned")
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Opens or closes the chat panel.
    pub async fn set_chat_panel_open(&self, open: bool) {
        let mut slice = self.realtime.lock().await;
        slice.chat_panel_open = open;
        if open {
            // Viewing the panel consumes the unread badge.
            slice.unread_chat = 0;
        }
    }

    /// Returns the externally visible realtime state.
    pub async fn realtime_status(&self) -> RealtimeStatus {
        let slice = self.realtime.lock().await;
        RealtimeStatus {
            connected: slice.connected,
            unread_chat: slice.unread_chat,
            chat_panel_open: slice.chat_panel_open,
        }
    }

    pub(crate) async fn dispatch_signal(&self, signal: ChannelSignal) {
        match signal {
            ChannelSignal::Connected => {
                self.realtime.lock().await.connected = true;
            }
            ChannelSignal::Disconnected => {
                debug!("realtime channel lost; transport owns reconnection");
                self.realtime.lock().await.connected = false;
            }
            ChannelSignal::Event(event) => {
                if matches!(event, RealtimeEvent::ChatMessageReceived { .. }) {
                    self.realtime.lock().await.unread_chat += 1;
                }
                let handlers = self
                    .handlers
                    .read()
                    .expect("handler registry lock poisoned");
                if let Some(registered) = handlers.get(&event.kind()) {
                    for handler in registered {
                        handler(&event);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{harness, settle, Harness};
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn connected_harness() -> Harness {
        let h = harness();
        h.store.login("builder@example.com", "pw").await.unwrap();
        settle().await;
        h
    }

    fn chat_message(id: &str) -> ChannelSignal {
        ChannelSignal::Event(RealtimeEvent::ChatMessageReceived {
            conversation_id: id.to_string(),
            sender_id: "u-2".to_string(),
            preview: None,
        })
    }

    #[tokio::test]
    async fn test_connect_without_token_is_noop() {
        let h = harness();
        h.store.connect_realtime().await;
        assert_eq!(h.transport.connects(), 0);
    }

    #[tokio::test]
    async fn test_connect_sets_connected_flag() {
        let h = connected_harness().await;
        let status = h.store.realtime_status().await;
        assert!(status.connected);
        assert_eq!(status.unread_chat, 0);
    }

    #[tokio::test]
    async fn test_connect_is_idempotent() {
        let h = connected_harness().await;
        h.store.connect_realtime().await;
        h.store.connect_realtime().await;
        assert_eq!(h.transport.connects(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_is_swallowed() {
        let h = harness();
        h.transport.fail_connect.store(true, Ordering::SeqCst);
        h.store.login("builder@example.com", "pw").await.unwrap();
        settle().await;

        // Login itself still succeeds; the channel just stays down.
        assert!(h.store.session_snapshot().await.is_authenticated());
        assert!(!h.store.realtime_status().await.connected);
    }

    #[tokio::test]
    async fn test_chat_message_increments_unread_counter() {
        let h = connected_harness().await;
        h.transport.push(chat_message("c-1")).await;
        h.transport.push(chat_message("c-1")).await;
        settle().await;

        assert_eq!(h.store.realtime_status().await.unread_chat, 2);
    }

    #[tokio::test]
    async fn test_open_chat_panel_consumes_unread() {
        let h = connected_harness().await;
        h.transport.push(chat_message("c-1")).await;
        settle().await;

        h.store.set_chat_panel_open(true).await;
        assert_eq!(h.store.realtime_status().await.unread_chat, 0);
    }

    #[tokio::test]
    async fn test_named_events_reach_registered_handlers_only() {
        let h = connected_harness().await;
        let order_hits = Arc::new(AtomicU32::new(0));
        let hits = order_hits.clone();
        h.store
            .on_realtime_event(RealtimeEventKind::OrderStatusChanged, move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });

        h.transport
            .push(ChannelSignal::Event(RealtimeEvent::OrderStatusChanged {
                order_id: "o-1".to_string(),
                status: "shipped".to_string(),
            }))
            .await;
        h.transport
            .push(ChannelSignal::Event(RealtimeEvent::InventoryUpdate {
                product_id: "p-1".to_string(),
                quantity_available: 3,
            }))
            .await;
        settle().await;

        assert_eq!(order_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disconnected_signal_clears_connected_flag() {
        let h = connected_harness().await;
        h.transport.push(ChannelSignal::Disconnected).await;
        settle().await;
        assert!(!h.store.realtime_status().await.connected);

        // The transport reconnecting shows up as a later Connected.
        h.transport.push(ChannelSignal::Connected).await;
        settle().await;
        assert!(h.store.realtime_status().await.connected);
    }

    #[tokio::test]
    async fn test_disconnect_resets_slice_and_closes_handle() {
        let h = connected_harness().await;
        h.transport.push(chat_message("c-1")).await;
        settle().await;
        h.store.set_chat_panel_open(true).await;

        h.store.disconnect_realtime().await;

        let status = h.store.realtime_status().await;
        assert!(!status.connected);
        assert_eq!(status.unread_chat, 0);
        assert!(!status.chat_panel_open);
        assert!(h.transport.is_closed());

        // Safe when already disconnected.
        h.store.disconnect_realtime().await;
    }
}
