//! Realtime push-channel events and transport seam.

pub mod event;
pub mod transport;

pub use event::{ChannelSignal, RealtimeEvent, RealtimeEventKind};
pub use transport::{ConnectionHandle, RealtimeConnection, RealtimeTransport};
