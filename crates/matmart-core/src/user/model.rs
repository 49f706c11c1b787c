//! Domain models for the signed-in actor.
//!
//! A [`User`] is the identity record returned by the marketplace API.
//! Role-specific data lives in exactly one of the three profile structs,
//! wrapped in [`RoleProfile`] so that holding two profiles at once is
//! unrepresentable.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The role of a marketplace account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    /// Buys building materials.
    Customer,
    /// Sells building materials; requires verification before activation.
    Supplier,
    /// Moderates content and reviews supplier applications.
    Admin,
}

/// Identity record for a marketplace account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID format)
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Whether the account's email (and, for suppliers, business
    /// registration) has been verified.
    pub is_verified: bool,
}

impl User {
    /// Returns the user's display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Customer-specific profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Supplier-specific profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierProfile {
    pub id: String,
    pub user_id: String,
    pub business_name: String,
    #[serde(default)]
    pub business_registration: Option<String>,
    #[serde(default)]
    pub warehouse_address: Option<String>,
    /// Set by an admin once the supplier application is approved.
    pub is_approved: bool,
}

/// Admin-specific profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub department: Option<String>,
}

/// Role-specific profile, at most one per session.
///
/// The enum form guarantees the invariant "at most one of the three
/// profile slots is non-null" at the type level; agreement with the
/// user's role is checked where a session is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleProfile {
    Customer(CustomerProfile),
    Supplier(SupplierProfile),
    Admin(AdminProfile),
}

impl RoleProfile {
    /// Returns the role this profile belongs to.
    pub fn role(&self) -> UserRole {
        match self {
            Self::Customer(_) => UserRole::Customer,
            Self::Supplier(_) => UserRole::Supplier,
            Self::Admin(_) => UserRole::Admin,
        }
    }

    /// Returns the customer profile, if this is one.
    pub fn as_customer(&self) -> Option<&CustomerProfile> {
        match self {
            Self::Customer(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the supplier profile, if this is one.
    pub fn as_supplier(&self) -> Option<&SupplierProfile> {
        match self {
            Self::Supplier(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the admin profile, if this is one.
    pub fn as_admin(&self) -> Option<&AdminProfile> {
        match self {
            Self::Admin(p) => Some(p),
            _ => None,
        }
    }
}
