//! Error types for formatter lookup and string transforms

use thiserror::Error;

/// Errors raised by the registry and by formatter instances
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unknown formatter '{name}'")]
    UnknownFormatter { name: String },

    #[error("Formatter name must not be empty")]
    InvalidName,

    #[error("Invalid definition for formatter '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("Malformed input for formatter '{formatter}': {reason}")]
    MalformedInput { formatter: String, reason: String },

    #[error("A global formatter registry is already installed")]
    AlreadyInstalled,
}

impl FormatError {
    pub(crate) fn malformed(formatter: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            formatter: formatter.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error comes from the value being transformed rather
    /// than from the registry or a definition
    pub fn is_input_error(&self) -> bool {
        matches!(self, FormatError::MalformedInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
