//! Infrastructure layer for the matmart client.
//!
//! Concrete implementations of the core trait seams: the reqwest-backed
//! REST client, the TOML-backed persisted-state repository, and the
//! streaming realtime transport.

pub mod event_stream;
pub mod http_api;
pub mod paths;
pub mod state_repository;

pub use event_stream::SseTransport;
pub use http_api::HttpApi;
pub use state_repository::TomlStateRepository;
