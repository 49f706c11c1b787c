//! Named push events delivered over the realtime channel.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// High-level events pushed by the server while a channel is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeEvent {
    /// An order the actor is involved in changed status.
    OrderStatusChanged {
        order_id: String,
        status: String,
    },
    /// Stock level of a product changed.
    InventoryUpdate {
        product_id: String,
        quantity_available: i64,
    },
    /// A chat message arrived for the actor.
    ChatMessageReceived {
        conversation_id: String,
        sender_id: String,
        #[serde(default)]
        preview: Option<String>,
    },
}

impl RealtimeEvent {
    /// Returns the registry key for this event.
    pub fn kind(&self) -> RealtimeEventKind {
        match self {
            Self::OrderStatusChanged { .. } => RealtimeEventKind::OrderStatusChanged,
            Self::InventoryUpdate { .. } => RealtimeEventKind::InventoryUpdate,
            Self::ChatMessageReceived { .. } => RealtimeEventKind::ChatMessageReceived,
        }
    }
}

/// Discriminant of [`RealtimeEvent`], used to key handler registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RealtimeEventKind {
    OrderStatusChanged,
    InventoryUpdate,
    ChatMessageReceived,
}

/// What a transport feeds the channel manager.
///
/// `Connected`/`Disconnected` reflect the transport's own view of the
/// link; reconnection is the transport's concern and shows up here as a
/// later `Connected` on the same channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSignal {
    Connected,
    Disconnected,
    Event(RealtimeEvent),
}
