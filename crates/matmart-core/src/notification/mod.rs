//! Notification feed domain models.

pub mod model;

pub use model::{Notification, NotificationKind, NotificationPage, RelatedEntity};
