//! Transport seam for the realtime push channel.
//!
//! The store owns at most one connection per session and never touches
//! transport internals: it receives [`ChannelSignal`]s through a channel
//! and closes the link through an opaque handle. Reconnect behavior, if
//! any, lives entirely behind this seam.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::realtime::event::ChannelSignal;

/// Opaque handle to a live connection; dropping or closing it tears the
/// link down.
pub trait ConnectionHandle: Send + Sync {
    /// Closes the underlying connection. Idempotent.
    fn close(&self);
}

/// A live push-event connection: an exclusive close handle plus the
/// signal stream the transport feeds.
pub struct RealtimeConnection {
    handle: Box<dyn ConnectionHandle>,
    signals: mpsc::Receiver<ChannelSignal>,
}

impl RealtimeConnection {
    pub fn new(handle: Box<dyn ConnectionHandle>, signals: mpsc::Receiver<ChannelSignal>) -> Self {
        Self { handle, signals }
    }

    /// Splits the connection into its close handle and signal stream, so
    /// the owner can keep the handle while a pump task drains the stream.
    pub fn split(self) -> (Box<dyn ConnectionHandle>, mpsc::Receiver<ChannelSignal>) {
        (self.handle, self.signals)
    }
}

/// Factory for push-event connections.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Opens a connection authenticated with the session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be established at all;
    /// transient drops after establishment are reported through the
    /// signal stream instead.
    async fn connect(&self, token: &str) -> Result<RealtimeConnection>;
}
