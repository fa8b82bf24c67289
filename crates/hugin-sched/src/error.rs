//! Error handling for the scheduler.

use thiserror::Error;

use crate::arena::ArenaId;

/// Result type for scheduler operations.
pub type SchedResult<T> = Result<T, SchedError>;

/// Errors that can occur during scheduler operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchedError {
    /// Circuit not found (or its id is stale).
    #[error("Circuit not found: {0}")]
    CircuitNotFound(ArenaId),

    /// Job not found (or its id is stale).
    #[error("Job not found: {0}")]
    JobNotFound(ArenaId),

    /// Invalid job state for the requested operation.
    #[error("Invalid job state: expected {expected}, found {found}")]
    InvalidJobState {
        /// The state the operation requires.
        expected: String,
        /// The state the job was in.
        found: String,
    },

    /// Shot count outside the accepted range.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Caller-supplied histogram buffer is too small.
    #[error("Histogram buffer too small: need {needed}, got {got}")]
    HistogramTooSmall {
        /// Buckets required.
        needed: usize,
        /// Buckets supplied.
        got: usize,
    },

    /// The executor has been shut down.
    #[error("Executor is shut down")]
    Shutdown,

    /// Timeout waiting for job completion.
    #[error("Job timeout: {0}")]
    Timeout(ArenaId),

    /// Circuit construction error.
    #[error(transparent)]
    Ir(#[from] hugin_ir::IrError),

    /// Backend error.
    #[error(transparent)]
    Hal(#[from] hugin_hal::HalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchedError::InvalidJobState {
            expected: "Submitted".to_string(),
            found: "Running".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid job state: expected Submitted, found Running"
        );

        let err = SchedError::HistogramTooSmall { needed: 8, got: 4 };
        assert_eq!(err.to_string(), "Histogram buffer too small: need 8, got 4");
    }
}
