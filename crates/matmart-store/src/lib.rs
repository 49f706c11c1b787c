//! Global client state container for the materials marketplace.
//!
//! The [`Store`] owns every piece of cross-view client state: the
//! authenticated session, a mirror of the server-side cart, the
//! notification feed, search and comparison tracking, the realtime push
//! channel, and transient UI flags. Views read snapshots and call
//! actions; they never mutate slices directly.

pub mod cart;
pub mod notifications;
pub mod realtime;
pub mod search;
pub mod session;
pub mod store;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use cart::CartSlice;
pub use notifications::{NotificationSlice, NOTIFICATION_PAGE_SIZE};
pub use realtime::{RealtimeSlice, RealtimeStatus};
pub use session::SessionSlice;
pub use store::{EventHandler, Store};
