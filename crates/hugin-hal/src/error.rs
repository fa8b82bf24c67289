//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Backend capabilities failed validation at registration.
    #[error("Invalid capabilities for backend '{name}': {reason}")]
    InvalidCapabilities {
        /// The backend name.
        name: String,
        /// What was wrong.
        reason: String,
    },

    /// A backend with this name is already registered.
    #[error("Backend '{0}' is already registered")]
    DuplicateBackend(String),

    /// No backend registered under this id.
    #[error("Backend not found: {0}")]
    BackendNotFound(String),

    /// Backend is not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Circuit or shot count exceeds backend capabilities.
    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Job execution failed on the backend.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
