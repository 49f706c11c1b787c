//! Cart mirror domain models.

pub mod model;

pub use model::{CartItem, CartMirror, CartResponse};
