//! Authentication request/response wire types.
//!
//! These mirror the marketplace API's auth endpoints. The response carries
//! at most one role-conditional profile object; [`AuthResponse::into_session`]
//! selects the one matching the user's role and ignores the rest.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::model::Session;
use crate::user::{AdminProfile, CustomerProfile, RoleProfile, SupplierProfile, User, UserRole};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register/customer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRegistration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `POST /auth/register/supplier`.
///
/// Supplier registration does not return a token: the account must pass a
/// verification step before it can become an active session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRegistration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_registration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_address: Option<String>,
}

/// Response of `POST /auth/login` and `POST /auth/register/customer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub customer: Option<CustomerProfile>,
    #[serde(default)]
    pub supplier: Option<SupplierProfile>,
    #[serde(default)]
    pub admin: Option<AdminProfile>,
}

impl AuthResponse {
    /// Consumes the response, producing the session and its token.
    ///
    /// Only the profile object matching the user's role is kept; a
    /// response carrying extra profile objects is tolerated rather than
    /// rejected, since the session invariant cares only about what is
    /// stored.
    pub fn into_session(self) -> Result<(String, Session)> {
        let profile = match self.user.role {
            UserRole::Customer => self.customer.map(RoleProfile::Customer),
            UserRole::Supplier => self.supplier.map(RoleProfile::Supplier),
            UserRole::Admin => self.admin.map(RoleProfile::Admin),
        };
        let session = Session::new(self.user, profile)?;
        Ok((self.token, session))
    }
}
