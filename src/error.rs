//! Error types for registry configuration.
//!
//! The registry itself never fails: `subscribe`, `trigger` and `unsubscribe`
//! are infallible. These errors only come from loading a [`RegistryConfig`].
//!
//! [`RegistryConfig`]: crate::config::RegistryConfig

use thiserror::Error;

/// Main error type for configuration loading.
#[derive(Debug, Error)]
pub enum ModifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid pattern {pattern:?} for event {event}: {source}")]
    InvalidPattern {
        event: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl From<serde_json::Error> for ModifierError {
    fn from(e: serde_json::Error) -> Self {
        ModifierError::Config(e.to_string())
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ModifierError>;
