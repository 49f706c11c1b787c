//! Domain layer for the matmart client.
//!
//! Contains the data model of the client state container (session, cart
//! mirror, notification feed, search/comparison tracker, realtime events,
//! UI flags, persisted state) plus the trait seams behind which the
//! infrastructure crate supplies HTTP, storage, and transport.

pub mod api;
pub mod cart;
pub mod error;
pub mod notification;
pub mod realtime;
pub mod search;
pub mod session;
pub mod state;
pub mod ui;
pub mod user;

// Re-export common error type
pub use error::MatmartError;
