//! Shared mock collaborators for store tests.
//!
//! The API mock is stateful where the tests need it to be: the cart and
//! notification endpoints operate on in-memory lists, so re-fetch-after-
//! mutation behavior is exercised against a server-like source of truth
//! instead of scripted responses.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use matmart_core::api::{AuthApi, CartApi, NotificationApi};
use matmart_core::cart::{CartItem, CartResponse};
use matmart_core::error::{MatmartError, Result};
use matmart_core::notification::{Notification, NotificationKind, NotificationPage};
use matmart_core::realtime::{
    ChannelSignal, ConnectionHandle, RealtimeConnection, RealtimeTransport,
};
use matmart_core::session::{AuthResponse, CustomerRegistration, SupplierRegistration};
use matmart_core::state::{PersistedState, StateRepository};
use matmart_core::user::{CustomerProfile, RoleProfile, User, UserRole};

use crate::store::Store;

pub fn customer_user() -> User {
    User {
        id: "u-1".to_string(),
        email: "builder@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Mason".to_string(),
        role: UserRole::Customer,
        is_verified: true,
    }
}

pub fn admin_user() -> User {
    User {
        id: "u-9".to_string(),
        email: "admin@example.com".to_string(),
        first_name: "Olu".to_string(),
        last_name: "Grey".to_string(),
        role: UserRole::Admin,
        is_verified: true,
    }
}

pub fn customer_profile() -> RoleProfile {
    RoleProfile::Customer(CustomerProfile {
        id: "c-1".to_string(),
        user_id: "u-1".to_string(),
        company_name: Some("Mason & Co".to_string()),
        delivery_address: None,
        phone: None,
    })
}

pub fn notification(id: &str, is_read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        kind: NotificationKind::Order,
        title: "Order update".to_string(),
        message: "Status changed".to_string(),
        related: None,
        is_read,
        created_at: Utc::now(),
    }
}

/// Stateful mock of the three API traits.
///
/// Errors are injected per endpoint and returned on every call while set.
pub struct MockApi {
    pub calls: Mutex<Vec<String>>,

    pub login_user: Mutex<User>,
    pub login_profile: Mutex<Option<RoleProfile>>,
    pub login_error: Mutex<Option<MatmartError>>,
    pub logout_error: Mutex<Option<MatmartError>>,
    pub register_supplier_error: Mutex<Option<MatmartError>>,
    pub current_user_error: Mutex<Option<MatmartError>>,
    pub role_profile_error: Mutex<Option<MatmartError>>,

    pub cart_items: Mutex<Vec<CartItem>>,
    pub cart_fetch_error: Mutex<Option<MatmartError>>,
    pub cart_mutation_error: Mutex<Option<MatmartError>>,
    /// Per-fetch artificial latency, popped front on each `fetch_cart`.
    pub cart_fetch_delays: Mutex<VecDeque<Duration>>,

    pub notifications: Mutex<Vec<Notification>>,
    pub notification_fetch_error: Mutex<Option<MatmartError>>,
    pub notification_mutation_error: Mutex<Option<MatmartError>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            login_user: Mutex::new(customer_user()),
            login_profile: Mutex::new(Some(customer_profile())),
            login_error: Mutex::new(None),
            logout_error: Mutex::new(None),
            register_supplier_error: Mutex::new(None),
            current_user_error: Mutex::new(None),
            role_profile_error: Mutex::new(None),
            cart_items: Mutex::new(Vec::new()),
            cart_fetch_error: Mutex::new(None),
            cart_mutation_error: Mutex::new(None),
            cart_fetch_delays: Mutex::new(VecDeque::new()),
            notifications: Mutex::new(Vec::new()),
            notification_fetch_error: Mutex::new(None),
            notification_mutation_error: Mutex::new(None),
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|call| call.starts_with(name))
    }

    fn auth_response(&self) -> AuthResponse {
        let user = self.login_user.lock().unwrap().clone();
        let profile = self.login_profile.lock().unwrap().clone();
        let (customer, supplier, admin) = match profile {
            Some(RoleProfile::Customer(p)) => (Some(p), None, None),
            Some(RoleProfile::Supplier(p)) => (None, Some(p), None),
            Some(RoleProfile::Admin(p)) => (None, None, Some(p)),
            None => (None, None, None),
        };
        AuthResponse {
            token: "tok-test".to_string(),
            user,
            customer,
            supplier,
            admin,
        }
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse> {
        self.record(format!("login {email}"));
        if let Some(e) = self.login_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.auth_response())
    }

    async fn logout(&self, _token: &str) -> Result<()> {
        self.record("logout");
        if let Some(e) = self.logout_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(())
    }

    async fn register_customer(&self, data: &CustomerRegistration) -> Result<AuthResponse> {
        self.record(format!("register_customer {}", data.email));
        if let Some(e) = self.login_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.auth_response())
    }

    async fn register_supplier(&self, data: &SupplierRegistration) -> Result<()> {
        self.record(format!("register_supplier {}", data.email));
        if let Some(e) = self.register_supplier_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(())
    }

    async fn current_user(&self, _token: &str) -> Result<User> {
        self.record("current_user");
        if let Some(e) = self.current_user_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.login_user.lock().unwrap().clone())
    }

    async fn fetch_role_profile(&self, _token: &str, role: UserRole) -> Result<RoleProfile> {
        self.record(format!("fetch_role_profile {role}"));
        if let Some(e) = self.role_profile_error.lock().unwrap().clone() {
            return Err(e);
        }
        self.login_profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| MatmartError::not_found("profile", role.to_string()))
    }
}

#[async_trait]
impl CartApi for MockApi {
    async fn fetch_cart(&self, _token: &str) -> Result<CartResponse> {
        self.record("fetch_cart");
        if let Some(e) = self.cart_fetch_error.lock().unwrap().clone() {
            return Err(e);
        }
        // Snapshot at request time; an injected delay then models a
        // response that is computed early but delivered late.
        let items = self.cart_items.lock().unwrap().clone();
        let subtotal = items
            .iter()
            .map(|item| i64::from(item.quantity) * item.unit_price)
            .sum();
        let delay = self.cart_fetch_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(CartResponse { items, subtotal })
    }

    async fn add_item(&self, _token: &str, product_id: &str, quantity: u32) -> Result<()> {
        self.record(format!("add_item {product_id} x{quantity}"));
        if let Some(e) = self.cart_mutation_error.lock().unwrap().clone() {
            return Err(e);
        }
        let mut items = self.cart_items.lock().unwrap();
        let id = format!("i-{}", items.len() + 1);
        items.push(CartItem {
            id,
            product_id: product_id.to_string(),
            supplier_id: "s-1".to_string(),
            quantity,
            unit_price: 1000,
            product_name: format!("Product {product_id}"),
            product_image_url: None,
        });
        Ok(())
    }

    async fn update_item(&self, _token: &str, item_id: &str, quantity: u32) -> Result<()> {
        self.record(format!("update_item {item_id} x{quantity}"));
        if let Some(e) = self.cart_mutation_error.lock().unwrap().clone() {
            return Err(e);
        }
        let mut items = self.cart_items.lock().unwrap();
        match items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(MatmartError::not_found("cart item", item_id)),
        }
    }

    async fn remove_item(&self, _token: &str, item_id: &str) -> Result<()> {
        self.record(format!("remove_item {item_id}"));
        if let Some(e) = self.cart_mutation_error.lock().unwrap().clone() {
            return Err(e);
        }
        self.cart_items
            .lock()
            .unwrap()
            .retain(|item| item.id != item_id);
        Ok(())
    }

    async fn clear_cart(&self, _token: &str) -> Result<()> {
        self.record("clear_cart");
        if let Some(e) = self.cart_mutation_error.lock().unwrap().clone() {
            return Err(e);
        }
        self.cart_items.lock().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl NotificationApi for MockApi {
    async fn fetch(&self, _token: &str, limit: u32, offset: u32) -> Result<NotificationPage> {
        self.record(format!("fetch_notifications limit={limit} offset={offset}"));
        if let Some(e) = self.notification_fetch_error.lock().unwrap().clone() {
            return Err(e);
        }
        let all = self.notifications.lock().unwrap();
        let unread_count = all.iter().filter(|n| !n.is_read).count() as u32;
        let notifications = all
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(NotificationPage {
            notifications,
            unread_count,
        })
    }

    async fn mark_read(&self, _token: &str, id: &str) -> Result<()> {
        self.record(format!("mark_read {id}"));
        if let Some(e) = self.notification_mutation_error.lock().unwrap().clone() {
            return Err(e);
        }
        if let Some(n) = self
            .notifications
            .lock()
            .unwrap()
            .iter_mut()
            .find(|n| n.id == id)
        {
            n.is_read = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self, _token: &str) -> Result<()> {
        self.record("mark_all_read");
        if let Some(e) = self.notification_mutation_error.lock().unwrap().clone() {
            return Err(e);
        }
        for n in self.notifications.lock().unwrap().iter_mut() {
            n.is_read = true;
        }
        Ok(())
    }
}

/// In-memory [`StateRepository`].
pub struct MockStateRepository {
    pub state: Mutex<PersistedState>,
}

impl MockStateRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PersistedState::default()),
        }
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            state: Mutex::new(PersistedState {
                auth_token: Some(token.to_string()),
                ..PersistedState::default()
            }),
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateRepository for MockStateRepository {
    async fn save_state(&self, state: PersistedState) -> Result<()> {
        *self.state.lock().unwrap() = state;
        Ok(())
    }

    async fn get_state(&self) -> Result<PersistedState> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn get_auth_token(&self) -> Option<String> {
        self.state.lock().unwrap().auth_token.clone()
    }

    async fn set_auth_token(&self, token: String) -> Result<()> {
        self.state.lock().unwrap().auth_token = Some(token);
        Ok(())
    }

    async fn clear_auth_token(&self) -> Result<()> {
        self.state.lock().unwrap().auth_token = None;
        Ok(())
    }

    async fn set_recent_searches(&self, searches: Vec<String>) -> Result<()> {
        self.state.lock().unwrap().recent_searches = searches;
        Ok(())
    }

    async fn set_comparison(&self, comparison: Vec<String>) -> Result<()> {
        self.state.lock().unwrap().comparison = comparison;
        Ok(())
    }
}

struct MockHandle {
    closed: Arc<AtomicBool>,
}

impl ConnectionHandle for MockHandle {
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Transport mock that hands the test a sender side for pushing signals.
pub struct MockTransport {
    pub connect_count: AtomicU32,
    pub fail_connect: AtomicBool,
    pub closed: Arc<AtomicBool>,
    signal_tx: Mutex<Option<mpsc::Sender<ChannelSignal>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            connect_count: AtomicU32::new(0),
            fail_connect: AtomicBool::new(false),
            closed: Arc::new(AtomicBool::new(false)),
            signal_tx: Mutex::new(None),
        }
    }

    /// Pushes a signal into the live connection, as the server would.
    pub async fn push(&self, signal: ChannelSignal) {
        let tx = self
            .signal_tx
            .lock()
            .unwrap()
            .clone()
            .expect("no live connection to push into");
        tx.send(signal).await.expect("pump receiver dropped");
    }

    pub fn connects(&self) -> u32 {
        self.connect_count.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RealtimeTransport for MockTransport {
    async fn connect(&self, _token: &str) -> Result<RealtimeConnection> {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(MatmartError::network("connection refused"));
        }
        let (tx, rx) = mpsc::channel(16);
        tx.send(ChannelSignal::Connected)
            .await
            .expect("fresh channel");
        *self.signal_tx.lock().unwrap() = Some(tx);
        let handle = MockHandle {
            closed: self.closed.clone(),
        };
        Ok(RealtimeConnection::new(Box::new(handle), rx))
    }
}

/// A store wired to mocks, with the mocks kept reachable for assertions.
pub struct Harness {
    pub api: Arc<MockApi>,
    pub state: Arc<MockStateRepository>,
    pub transport: Arc<MockTransport>,
    pub store: Arc<Store>,
}

pub fn harness() -> Harness {
    harness_with_state(MockStateRepository::new())
}

pub fn harness_with_state(state: MockStateRepository) -> Harness {
    let api = Arc::new(MockApi::new());
    let state = Arc::new(state);
    let transport = Arc::new(MockTransport::new());
    let store = Store::new(
        api.clone(),
        api.clone(),
        api.clone(),
        state.clone(),
        transport.clone(),
    );
    Harness {
        api,
        state,
        transport,
        store,
    }
}

/// Lets spawned pump tasks run before assertions.
pub async fn settle() {
    for _ in 0..25 {
        tokio::task::yield_now().await;
    }
}
