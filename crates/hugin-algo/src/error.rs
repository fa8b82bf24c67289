//! Error types for the algorithm builders.

use thiserror::Error;

/// Errors that can occur while building algorithm circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// The search space needs more qubits than an exact phase-flip gate
    /// supports.
    #[error("Search space needs {qubits} qubits, exact oracle supports at most {max}")]
    SearchSpaceTooLarge {
        /// Qubits the search space requires.
        qubits: u32,
        /// Largest supported register.
        max: u32,
    },

    /// The marked state is outside the search space.
    #[error("Target {target} outside search space of {size} states")]
    TargetOutOfRange {
        /// The requested marked state.
        target: u64,
        /// Number of states in the space.
        size: u64,
    },

    /// A register must have at least one qubit.
    #[error("Register must have at least one qubit")]
    EmptyRegister,

    /// Circuit construction error.
    #[error(transparent)]
    Ir(#[from] hugin_ir::IrError),
}

/// Result type for algorithm builders.
pub type AlgoResult<T> = Result<T, AlgoError>;
