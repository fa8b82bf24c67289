//! Error types for the engine crate.

use thiserror::Error;

/// Errors produced by the statevector engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Requested qubit count exceeds the amplitude-buffer limit.
    #[error("{requested} qubits exceeds the engine limit of {max} (amplitude buffer is 2^n)")]
    TooManyQubits {
        /// Requested qubit count.
        requested: u32,
        /// Maximum supported qubit count.
        max: u32,
    },

    /// State constructed over zero qubits.
    #[error("Statevector requires at least 1 qubit")]
    ZeroQubits,

    /// A gate targets a qubit outside the state.
    #[error("Gate '{gate_name}' targets qubit {qubit} but state only has {num_qubits} qubits")]
    QubitOutOfRange {
        /// Name of the gate.
        gate_name: String,
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the state.
        num_qubits: u32,
    },

    /// Matrix size does not match the gate's target count.
    #[error("Matrix has {got} entries, expected {expected} for {num_targets} target qubit(s)")]
    MatrixDimensionMismatch {
        /// Expected number of entries ((2^k)^2).
        expected: usize,
        /// Actual number of entries.
        got: usize,
        /// Number of target qubits.
        num_targets: usize,
    },

    /// Total probability drifted beyond tolerance.
    ///
    /// Gates are unitary, so this indicates a malformed custom matrix or an
    /// internal fault; execution must fail rather than report silently
    /// drifted results.
    #[error("Total probability {total} drifted beyond tolerance from 1.0")]
    NormDrift {
        /// Observed probability mass.
        total: f64,
    },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
