//! Hugin Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Hugin. Circuits are append-only logs of gates plus a list of
//! measurement bindings; insertion order is execution order and is never
//! reordered by the system.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`StandardGate`] for built-in gates (H, X, CX, etc.) and
//!   [`CustomGate`] for user-supplied unitaries, bound to their target
//!   qubits through [`Gate`]
//! - **Circuit**: [`Circuit`] append-only builder API
//! - **Noise**: [`NoiseModel`] value-object noise configuration, consulted
//!   by backends at execution time
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use hugin_ir::{Circuit, QubitId, ClbitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.gates().len(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `T` | 1 | Phase gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `P`, `U1` | 1 | Phase rotations |
//! | `U2`, `U3` | 1 | General single-qubit gates |
//! | `CX`, `CZ` | 2 | Controlled Pauli gates |
//! | `CP` | 2 | Controlled phase rotation |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli gate |
//! | `CSwap` | 3 | Fredkin gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod noise;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate, MAX_GATE_QUBITS};
pub use noise::NoiseModel;
pub use qubit::{ClbitId, QubitId};
