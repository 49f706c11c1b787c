//! Trait seams for the marketplace REST API.
//!
//! The store depends only on these traits; the reqwest-backed
//! implementation lives in the infrastructure crate, and tests substitute
//! hand-written mocks. Every call other than login/register carries the
//! session token as a bearer credential, passed explicitly so the caller
//! (the store) stays the single owner of the credential.

use async_trait::async_trait;

use crate::cart::CartResponse;
use crate::error::Result;
use crate::notification::NotificationPage;
use crate::session::{AuthResponse, CustomerRegistration, SupplierRegistration};
use crate::user::{RoleProfile, User, UserRole};

/// Authentication and identity endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;

    /// `POST /auth/logout`. Callers treat failure as best-effort.
    async fn logout(&self, token: &str) -> Result<()>;

    /// `POST /auth/register/customer` — auto-authenticates.
    async fn register_customer(&self, data: &CustomerRegistration) -> Result<AuthResponse>;

    /// `POST /auth/register/supplier` — returns no token; the account
    /// awaits verification before it can log in.
    async fn register_supplier(&self, data: &SupplierRegistration) -> Result<()>;

    /// `GET /users/me` — validates a stored token.
    async fn current_user(&self, token: &str) -> Result<User>;

    /// Role-conditional `GET /customers/me | /suppliers/me | /admins/me`.
    ///
    /// Used as a best-effort secondary call during session restore.
    async fn fetch_role_profile(&self, token: &str, role: UserRole) -> Result<RoleProfile>;
}

/// Cart endpoints.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// `GET /cart`
    async fn fetch_cart(&self, token: &str) -> Result<CartResponse>;

    /// `POST /cart/items`
    async fn add_item(&self, token: &str, product_id: &str, quantity: u32) -> Result<()>;

    /// `PATCH /cart/items/{id}`
    async fn update_item(&self, token: &str, item_id: &str, quantity: u32) -> Result<()>;

    /// `DELETE /cart/items/{id}`
    async fn remove_item(&self, token: &str, item_id: &str) -> Result<()>;

    /// `DELETE /cart`
    async fn clear_cart(&self, token: &str) -> Result<()>;
}

/// Notification endpoints.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// `GET /notifications?limit&offset`
    async fn fetch(&self, token: &str, limit: u32, offset: u32) -> Result<NotificationPage>;

    /// `PATCH /notifications/{id}/read`. Idempotent server-side.
    async fn mark_read(&self, token: &str, id: &str) -> Result<()>;

    /// `POST /notifications/read-all`
    async fn mark_all_read(&self, token: &str) -> Result<()>;
}
