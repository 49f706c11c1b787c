//! Notification slice: a bounded window of notifications plus the global
//! unread count.
//!
//! The unread count always comes from the server response; the page may
//! be truncated while the count is global, so recomputing it client-side
//! would undercount.

use std::sync::atomic::Ordering;

use tracing::{debug, warn};

use matmart_core::api::NotificationApi;
use matmart_core::error::Result;
use matmart_core::notification::NotificationPage;

use crate::store::Store;

/// Page size requested from the server.
pub const NOTIFICATION_PAGE_SIZE: u32 = 20;

/// State of the notification slice.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlice {
    pub feed: NotificationPage,
    pub is_loading: bool,
}

impl Store {
    /// Replaces the feed (page and global unread count) from the server.
    ///
    /// A no-op when not authenticated. Failure leaves the previous feed
    /// untouched and clears the loading flag; stale responses are
    /// discarded.
    pub async fn fetch_notifications(&self) {
        let Some(token) = self.auth_token().await else {
            return;
        };
        self.notifications.write().await.is_loading = true;
        let seq = self.notification_seq.fetch_add(1, Ordering::SeqCst) + 1;

        match self
            .notification_api
            .fetch(&token, NOTIFICATION_PAGE_SIZE, 0)
            .await
        {
            Ok(page) => {
                if self.notification_seq.load(Ordering::SeqCst) != seq {
                    debug!("discarding stale notification response");
                    return;
                }
                let mut slice = self.notifications.write().await;
                slice.feed = page;
                slice.is_loading = false;
            }
            Err(e) => {
                warn!("notification fetch failed, keeping previous feed: {e}");
                self.notifications.write().await.is_loading = false;
            }
        }
    }

    /// Marks one notification read, then re-fetches.
    ///
    /// Marking an already-read notification is a server-side no-op and
    /// simply triggers a redundant refresh.
    pub async fn mark_notification_read(&self, id: &str) -> Result<()> {
        let Some(token) = self.auth_token().await else {
            return Ok(());
        };
        self.notification_api.mark_read(&token, id).await?;
        self.fetch_notifications().await;
        Ok(())
    }

    /// Marks every notification read, then re-fetches.
    pub async fn mark_all_notifications_read(&self) -> Result<()> {
        let Some(token) = self.auth_token().await else {
            return Ok(());
        };
        self.notification_api.mark_all_read(&token).await?;
        self.fetch_notifications().await;
        Ok(())
    }

    /// Returns a copy of the notification slice.
    pub async fn notification_snapshot(&self) -> NotificationSlice {
        self.notifications.read().await.clone()
    }
}
