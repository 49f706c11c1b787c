//! Session slice: authentication lifecycle and the post-login sequence.
//!
//! The session gates every other slice: cart, notifications, and the
//! realtime channel only act while a token is present, and all three are
//! kicked off together after a successful authentication.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::{debug, warn};

use matmart_core::api::AuthApi;
use matmart_core::error::{MatmartError, Result};
use matmart_core::session::{AuthStatus, CustomerRegistration, Session, SupplierRegistration};
use matmart_core::state::StateRepository;

use crate::cart::CartSlice;
use crate::notifications::NotificationSlice;
use crate::store::Store;

/// State of the session slice.
#[derive(Debug, Clone, Default)]
pub struct SessionSlice {
    pub status: AuthStatus,
    pub session: Option<Session>,
    /// Bearer token for the current session. Owned here; other slices
    /// read it through the store's accessors.
    pub token: Option<String>,
    /// Human-readable message from the last failed login/registration.
    pub error: Option<String>,
    pub is_loading: bool,
}

impl SessionSlice {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }
}

impl Store {
    /// Authenticates with email and password.
    ///
    /// On success the session is replaced wholesale and the post-login
    /// sequence runs before this returns. On failure the session stays
    /// anonymous, a user-visible message is recorded on the slice, and
    /// the error is also returned so the caller can react if it wants to.
    pub async fn login(self: &Arc<Self>, email: &str, password: &str) -> Result<()> {
        self.begin_auth().await;
        let response = match self.auth_api.login(email, password).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail_auth(e).await),
        };
        let (token, session) = match response.into_session() {
            Ok(pair) => pair,
            Err(e) => return Err(self.fail_auth(e).await),
        };
        self.apply_auth_success(token, session).await;
        Ok(())
    }

    /// Registers a customer account and signs it in.
    pub async fn register_customer(self: &Arc<Self>, data: &CustomerRegistration) -> Result<()> {
        self.begin_auth().await;
        let response = match self.auth_api.register_customer(data).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail_auth(e).await),
        };
        let (token, session) = match response.into_session() {
            Ok(pair) => pair,
            Err(e) => return Err(self.fail_auth(e).await),
        };
        self.apply_auth_success(token, session).await;
        Ok(())
    }

    /// Registers a supplier account.
    ///
    /// Suppliers must pass a verification step before their account can
    /// become an active session, so a successful registration leaves the
    /// session anonymous.
    pub async fn register_supplier(self: &Arc<Self>, data: &SupplierRegistration) -> Result<()> {
        self.begin_auth().await;
        match self.auth_api.register_supplier(data).await {
            Ok(()) => {
                let mut slice = self.session.write().await;
                slice.status = AuthStatus::Anonymous;
                slice.is_loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail_auth(e).await),
        }
    }

    /// Ends the session.
    ///
    /// The server is notified best-effort; local state is reset
    /// unconditionally, so from the client's point of view logout always
    /// succeeds.
    pub async fn logout(&self) {
        if let Some(token) = self.auth_token().await {
            if let Err(e) = self.auth_api.logout(&token).await {
                warn!("server logout failed, clearing local session anyway: {e}");
            }
        }
        if let Err(e) = self.state_repository.clear_auth_token().await {
            warn!("failed to clear persisted token: {e}");
        }
        // Invalidate any in-flight cart/notification fetches so a late
        // response cannot repopulate the cleared slices.
        self.cart_seq.fetch_add(1, Ordering::SeqCst);
        self.notification_seq.fetch_add(1, Ordering::SeqCst);
        *self.session.write().await = SessionSlice::default();
        *self.cart.write().await = CartSlice::default();
        *self.notifications.write().await = NotificationSlice::default();
        self.disconnect_realtime().await;
    }

    /// Attempts to restore the previous session from the stored token.
    ///
    /// With no stored token this settles into the anonymous state without
    /// any network call. A rejected token is discarded silently: the user
    /// simply lands on the anonymous experience. A profile fetch failure
    /// does not abort restoration; the session stays authenticated with
    /// no profile.
    pub async fn initialize_auth(self: &Arc<Self>) {
        let Some(token) = self.state_repository.get_auth_token().await else {
            return;
        };
        self.begin_auth().await;

        let user = match self.auth_api.current_user(&token).await {
            Ok(user) => user,
            Err(e) => {
                if e.is_auth_failure() {
                    debug!("stored session token rejected, discarding");
                    if let Err(e) = self.state_repository.clear_auth_token().await {
                        warn!("failed to discard rejected token: {e}");
                    }
                } else {
                    // Transient failure: keep the token for the next
                    // attempt, but settle anonymous for this run.
                    warn!("session restore failed: {e}");
                }
                *self.session.write().await = SessionSlice::default();
                return;
            }
        };

        let profile = match self.auth_api.fetch_role_profile(&token, user.role).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("role profile fetch failed, continuing without profile: {e}");
                None
            }
        };
        let session = match Session::new(user.clone(), profile) {
            Ok(session) => session,
            Err(e) => {
                warn!("ignoring mismatched role profile: {e}");
                Session {
                    user,
                    role_profile: None,
                }
            }
        };
        self.apply_auth_success(token, session).await;
    }

    /// Clears the stored auth error message. No other side effects.
    pub async fn clear_auth_error(&self) {
        self.session.write().await.error = None;
    }

    /// Returns a copy of the session slice.
    pub async fn session_snapshot(&self) -> SessionSlice {
        self.session.read().await.clone()
    }

    async fn begin_auth(&self) {
        let mut slice = self.session.write().await;
        slice.status = AuthStatus::Authenticating;
        slice.is_loading = true;
        slice.error = None;
    }

    /// Resets to anonymous with a user-visible message, returning the
    /// error for the caller.
    async fn fail_auth(&self, error: MatmartError) -> MatmartError {
        let mut slice = self.session.write().await;
        slice.status = AuthStatus::Anonymous;
        slice.session = None;
        slice.token = None;
        slice.is_loading = false;
        slice.error = Some(error.user_message());
        error
    }

    async fn apply_auth_success(self: &Arc<Self>, token: String, session: Session) {
        if let Err(e) = self.state_repository.set_auth_token(token.clone()).await {
            warn!("failed to persist session token: {e}");
        }
        {
            let mut slice = self.session.write().await;
            slice.status = AuthStatus::Authenticated;
            slice.session = Some(session);
            slice.token = Some(token);
            slice.error = None;
            slice.is_loading = false;
        }
        self.post_login().await;
    }

    /// The fixed post-login sequence: open the realtime channel, refresh
    /// the cart (a no-op for non-customers), refresh notifications. The
    /// three run concurrently and may complete in any order.
    pub(crate) async fn post_login(self: &Arc<Self>) {
        tokio::join!(
            self.connect_realtime(),
            self.fetch_cart(),
            self.fetch_notifications(),
        );
    }
}
