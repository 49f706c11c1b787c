//! Session domain model.
//!
//! A [`Session`] is the authenticated identity and role-profile bundle for
//! the current actor. It is created on successful login, registration, or
//! session restore, replaced wholesale on every identity-affecting action,
//! and destroyed on logout.

use serde::{Deserialize, Serialize};

use crate::error::{MatmartError, Result};
use crate::user::{RoleProfile, User, UserRole};

/// Externally visible authentication state.
///
/// `Anonymous -> Authenticating -> Authenticated` on the happy path;
/// `Authenticating -> Anonymous` (with a stored error message) on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

/// The authenticated identity and role-profile bundle.
///
/// The role profile is optional: session restore keeps the user
/// authenticated even when the best-effort profile fetch fails, so a
/// `Session` with `role_profile = None` is a valid, fully signed-in state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub role_profile: Option<RoleProfile>,
}

impl Session {
    /// Assembles a session, rejecting a profile that disagrees with the
    /// user's role.
    pub fn new(user: User, role_profile: Option<RoleProfile>) -> Result<Self> {
        if let Some(ref profile) = role_profile {
            if profile.role() != user.role {
                return Err(MatmartError::internal(format!(
                    "role profile mismatch: user is {} but profile is {}",
                    user.role,
                    profile.role()
                )));
            }
        }
        Ok(Self { user, role_profile })
    }

    /// Returns the session's role.
    pub fn role(&self) -> UserRole {
        self.user.role
    }

    /// Returns true if this is a customer session.
    pub fn is_customer(&self) -> bool {
        self.user.role == UserRole::Customer
    }
}
