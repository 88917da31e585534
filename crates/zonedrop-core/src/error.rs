//! Error types shared by the controller and its hosts.

use thiserror::Error;

/// Message shown to the user whenever an operation fails.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal error, please contact with developers";

/// Drag errors.
#[derive(Debug, Error)]
pub enum DragError {
    #[error("Required element not found: #{0}")]
    MissingElement(String),
    #[error("Host operation failed: {0}")]
    Host(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DragError {
    /// Whether the error should halt startup instead of degrading the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingElement(_) | Self::Config(_))
    }
}

/// Result type for drag operations.
pub type DragResult<T> = Result<T, DragError>;
