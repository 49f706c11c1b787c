//! Cart slice: a mirror of the authoritative server-side cart.
//!
//! Mutations never touch the mirror directly: each one issues its request
//! and then re-fetches the whole cart, trading a round trip for never
//! displaying a state the server has not confirmed. The mirror is only
//! ever overwritten by a successful, still-latest fetch.

use std::sync::atomic::Ordering;

use chrono::Utc;
use tracing::{debug, warn};

use matmart_core::api::CartApi;
use matmart_core::cart::CartMirror;
use matmart_core::error::Result;

use crate::store::Store;

/// State of the cart slice.
#[derive(Debug, Clone, Default)]
pub struct CartSlice {
    pub mirror: CartMirror,
    pub is_loading: bool,
}

impl Store {
    /// Replaces the mirror from the server.
    ///
    /// A no-op unless the session is an authenticated customer. A network
    /// failure leaves the previous mirror untouched and clears the
    /// loading flag; a response that arrives after a newer fetch was
    /// issued is discarded.
    pub async fn fetch_cart(&self) {
        let Some(token) = self.customer_token().await else {
            return;
        };
        self.cart.write().await.is_loading = true;
        let seq = self.cart_seq.fetch_add(1, Ordering::SeqCst) + 1;

        match self.cart_api.fetch_cart(&token).await {
            Ok(response) => {
                if self.cart_seq.load(Ordering::SeqCst) != seq {
                    debug!("discarding stale cart response");
                    return;
                }
                let mut slice = self.cart.write().await;
                slice.mirror = CartMirror::from_response(response, Utc::now());
                slice.is_loading = false;
            }
            Err(e) => {
                warn!("cart fetch failed, keeping previous mirror: {e}");
                self.cart.write().await.is_loading = false;
            }
        }
    }

    /// Adds a product to the cart, then resynchronizes.
    ///
    /// A failed mutation propagates to the caller and leaves the mirror
    /// unchanged; the re-fetch only happens after a successful mutation.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<()> {
        let Some(token) = self.customer_token().await else {
            return Ok(());
        };
        self.cart_api.add_item(&token, product_id, quantity).await?;
        self.fetch_cart().await;
        Ok(())
    }

    /// Changes a line item's quantity, then resynchronizes.
    pub async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<()> {
        let Some(token) = self.customer_token().await else {
            return Ok(());
        };
        self.cart_api.update_item(&token, item_id, quantity).await?;
        self.fetch_cart().await;
        Ok(())
    }

    /// Removes a line item, then resynchronizes.
    pub async fn remove_cart_item(&self, item_id: &str) -> Result<()> {
        let Some(token) = self.customer_token().await else {
            return Ok(());
        };
        self.cart_api.remove_item(&token, item_id).await?;
        self.fetch_cart().await;
        Ok(())
    }

    /// Empties the cart.
    ///
    /// Clearing is terminal and idempotent, so the mirror is reset
    /// locally without a re-fetch.
    pub async fn clear_cart(&self) -> Result<()> {
        let Some(token) = self.customer_token().await else {
            return Ok(());
        };
        self.cart_api.clear_cart(&token).await?;
        // Invalidate in-flight fetches so a late response cannot
        // resurrect the cleared mirror.
        self.cart_seq.fetch_add(1, Ordering::SeqCst);
        *self.cart.write().await = CartSlice::default();
        Ok(())
    }

    /// Returns a copy of the cart slice.
    pub async fn cart_snapshot(&self) -> CartSlice {
        self.cart.read().await.clone()
    }
}
