//! Error types for the generation pass.

use std::path::PathBuf;

use rebind_i18n::{I18nError, MissingKeyError};
use thiserror::Error;

/// Errors loading a [`GenerationConfig`](crate::GenerationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Errors binding one interface for one locale.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// The host could not enumerate an interface's keys.
    #[error("interface '{interface}': {reason}")]
    Oracle { interface: String, reason: String },

    /// A method declaration cannot be bound for this kind of interface.
    #[error("interface '{interface}' method '{method}': {reason}")]
    InvalidDeclaration {
        interface: String,
        method: String,
        reason: String,
    },

    /// The host rejected a generated artifact.
    #[error("failed to emit '{class_name}': {reason}")]
    Emit { class_name: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<MissingKeyError> for GenerateError {
    fn from(err: MissingKeyError) -> Self {
        Self::I18n(I18nError::MissingKey(err))
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
