//! The process-wide client state container.
//!
//! One [`Store`] owns six disjoint state slices. Actions (methods on the
//! store) are the only mutation path; views read snapshots and never
//! assign fields directly, which is what keeps the slice invariants
//! enforceable.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use tokio::sync::{Mutex, RwLock};

use matmart_core::api::{AuthApi, CartApi, NotificationApi};
use matmart_core::error::Result;
use matmart_core::realtime::{RealtimeEvent, RealtimeEventKind, RealtimeTransport};
use matmart_core::search::SearchTracker;
use matmart_core::state::StateRepository;
use matmart_core::ui::UiFlags;

use matmart_infrastructure::{HttpApi, SseTransport, TomlStateRepository};

use crate::cart::CartSlice;
use crate::notifications::NotificationSlice;
use crate::realtime::RealtimeSlice;
use crate::session::SessionSlice;

/// Callback invoked when a push event of a registered kind arrives.
///
/// Handlers are hooks for views to schedule their own follow-up work
/// (typically a re-fetch); they must not block.
pub type EventHandler = Box<dyn Fn(&RealtimeEvent) + Send + Sync>;

/// The global client store.
///
/// Each slice sits behind its own lock; no two slices co-own a field.
/// External collaborators (REST API, persisted state, realtime transport)
/// are injected as trait objects so tests can substitute mocks.
pub struct Store {
    pub(crate) auth_api: Arc<dyn AuthApi>,
    pub(crate) cart_api: Arc<dyn CartApi>,
    pub(crate) notification_api: Arc<dyn NotificationApi>,
    pub(crate) state_repository: Arc<dyn StateRepository>,
    pub(crate) transport: Arc<dyn RealtimeTransport>,

    pub(crate) session: RwLock<SessionSlice>,
    pub(crate) cart: RwLock<CartSlice>,
    pub(crate) notifications: RwLock<NotificationSlice>,
    pub(crate) search: RwLock<SearchTracker>,
    pub(crate) ui: RwLock<UiFlags>,
    pub(crate) realtime: Mutex<RealtimeSlice>,

    /// Per-event-kind handler registries for realtime dispatch.
    pub(crate) handlers: std::sync::RwLock<HashMap<RealtimeEventKind, Vec<EventHandler>>>,

    // Per-slice monotonically increasing fetch sequence numbers. A fetch
    // response is applied only if no newer fetch was issued for the slice
    // in the meantime, so a stale response cannot overwrite newer data.
    pub(crate) cart_seq: AtomicU64,
    pub(crate) notification_seq: AtomicU64,
}

impl Store {
    /// Creates a store with injected collaborators.
    ///
    /// Returned as `Arc` because the realtime pump task holds a reference
    /// back to the store for event dispatch.
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        cart_api: Arc<dyn CartApi>,
        notification_api: Arc<dyn NotificationApi>,
        state_repository: Arc<dyn StateRepository>,
        transport: Arc<dyn RealtimeTransport>,
    ) -> Arc<Self> {
        Arc::new(Self {
            auth_api,
            cart_api,
            notification_api,
            state_repository,
            transport,
            session: RwLock::new(SessionSlice::default()),
            cart: RwLock::new(CartSlice::default()),
            notifications: RwLock::new(NotificationSlice::default()),
            search: RwLock::new(SearchTracker::new()),
            ui: RwLock::new(UiFlags::new()),
            realtime: Mutex::new(RealtimeSlice::default()),
            handlers: std::sync::RwLock::new(HashMap::new()),
            cart_seq: AtomicU64::new(0),
            notification_seq: AtomicU64::new(0),
        })
    }

    /// Creates a store wired to the real marketplace API at `base_url`,
    /// with file-backed persisted state and the streaming transport.
    pub fn for_api(base_url: &str) -> Result<Arc<Self>> {
        let api = Arc::new(HttpApi::new(base_url)?);
        let state_repository = Arc::new(TomlStateRepository::new()?);
        let transport = Arc::new(SseTransport::new(base_url)?);
        Ok(Self::new(
            api.clone(),
            api.clone(),
            api,
            state_repository,
            transport,
        ))
    }

    /// Restores persisted local state and attempts session restore.
    ///
    /// Called once at process start.
    pub async fn initialize(self: &Arc<Self>) {
        self.restore_local_state().await;
        self.initialize_auth().await;
    }

    /// Loads persisted recent searches and comparison set into the
    /// search tracker. Failure leaves the tracker empty.
    pub(crate) async fn restore_local_state(&self) {
        match self.state_repository.get_state().await {
            Ok(state) => {
                let mut search = self.search.write().await;
                *search = SearchTracker::restore(state.recent_searches, state.comparison);
            }
            Err(e) => {
                tracing::warn!("failed to restore persisted state: {e}");
            }
        }
    }

    /// Returns the session token, if authenticated.
    pub(crate) async fn auth_token(&self) -> Option<String> {
        self.session.read().await.token.clone()
    }

    /// Returns the session token only for an authenticated customer.
    pub(crate) async fn customer_token(&self) -> Option<String> {
        let session = self.session.read().await;
        match session.session {
            Some(ref s) if s.is_customer() => session.token.clone(),
            _ => None,
        }
    }
}
