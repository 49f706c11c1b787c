//! Session model and authentication wire types.

pub mod model;
pub mod request;

pub use model::{AuthStatus, Session};
pub use request::{
    AuthResponse, CustomerRegistration, LoginRequest, SupplierRegistration,
};
