//! User identity and role-specific profile models.

pub mod model;

pub use model::{
    AdminProfile, CustomerProfile, RoleProfile, SupplierProfile, User, UserRole,
};
