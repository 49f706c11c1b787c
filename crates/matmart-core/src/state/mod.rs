//! Persisted client state and its repository trait.

pub mod model;
pub mod repository;

pub use model::PersistedState;
pub use repository::StateRepository;
