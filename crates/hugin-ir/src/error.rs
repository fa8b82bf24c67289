//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while constructing circuits and gates.
///
/// All of these are construction-time errors: the call that introduces an
/// invalid reference fails, and the circuit is left unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate or measurement references a qubit outside the circuit.
    #[error("Qubit {qubit} out of range: circuit has {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// A measurement references a classical bit outside the circuit.
    #[error("Classical bit {clbit} out of range: circuit has {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },

    /// Gate constructed with the wrong number of target qubits.
    #[error("Gate '{gate_name}' requires {expected} target qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of targets.
        expected: u32,
        /// Actual number of targets provided.
        got: u32,
    },

    /// The same qubit appears twice in one gate's target list.
    #[error("Duplicate qubit {qubit} in gate '{gate_name}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: String,
    },

    /// A custom gate's matrix does not match its qubit count.
    #[error(
        "Custom gate '{gate_name}' matrix has {got} entries, expected {expected} \
         for {num_qubits} qubits"
    )]
    MatrixDimensionMismatch {
        /// Name of the custom gate.
        gate_name: String,
        /// Expected number of matrix entries ((2^n)^2).
        expected: usize,
        /// Actual number of entries supplied.
        got: usize,
        /// Declared qubit count.
        num_qubits: u32,
    },

    /// Circuit or gate declared over zero qubits.
    #[error("Qubit count must be at least 1")]
    ZeroQubits,
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
