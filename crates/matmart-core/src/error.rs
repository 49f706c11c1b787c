//! Error types for the matmart client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire matmart client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MatmartError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Authentication failure (bad credentials, expired/invalid token)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-success HTTP response from the marketplace API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network/transport failure (connect, timeout, stream interruption)
    #[error("Network error: {message}")]
    Network { message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MatmartError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates an Api error from a status code and response body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error represents an authentication failure.
    ///
    /// A 401 API response is treated as an authentication failure so that
    /// session-restore can distinguish "expired credential" from an
    /// ordinary transport problem.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Api { status: 401, .. })
    }

    /// Returns a short human-readable message suitable for display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(msg) => msg.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Network { .. } => "Could not reach the server. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for MatmartError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MatmartError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MatmartError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MatmartError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Convenience Result type alias using MatmartError.
pub type Result<T> = std::result::Result<T, MatmartError>;
