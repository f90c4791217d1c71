//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid short name '{0}': expected 0-4 ASCII letters (A-Z, a-z)")]
    InvalidShortName(String),

    #[error("Invalid port: port name cannot be empty")]
    EmptyPort,

    #[error("'{0}' is a placeholder, not a serial port")]
    PlaceholderPort(String),
}

impl DomainError {
    /// Check if this error was caused by selecting the "no ports" placeholder
    pub fn is_placeholder(&self) -> bool {
        matches!(self, DomainError::PlaceholderPort(_))
    }
}
