//! Local mirror of the authoritative server-side cart.
//!
//! The mirror is never partially updated: every mutation on the server is
//! followed by a full re-fetch, and the only way to build a non-empty
//! [`CartMirror`] is from a complete server response. Derived fields
//! (total item count, subtotal) are recomputed on construction and never
//! mutated independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line item in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart line-item identifier
    pub id: String,
    pub product_id: String,
    pub supplier_id: String,
    /// Always >= 1; a quantity of 0 is expressed by removing the item.
    pub quantity: u32,
    /// Unit price in minor currency units (cents).
    pub unit_price: i64,
    // Denormalized display fields, carried so list views need no extra fetch.
    pub product_name: String,
    #[serde(default)]
    pub product_image_url: Option<String>,
}

/// Response of `GET /cart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    /// Subtotal in minor currency units, computed server-side.
    pub subtotal: i64,
}

/// Client-held copy of the server-owned cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CartMirror {
    pub items: Vec<CartItem>,
    /// Sum of item quantities, derived at construction time.
    pub total_items: u32,
    /// Subtotal in minor currency units, taken from the server response.
    pub subtotal: i64,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl CartMirror {
    /// The empty mirror, used for anonymous and non-customer sessions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a mirror from a complete server response, recomputing the
    /// total item count from the item list.
    pub fn from_response(response: CartResponse, refreshed_at: DateTime<Utc>) -> Self {
        let total_items = response.items.iter().map(|item| item.quantity).sum();
        Self {
            items: response.items,
            total_items,
            subtotal: response.subtotal,
            last_refreshed: Some(refreshed_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
