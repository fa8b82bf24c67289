//! `hugin-engine` — statevector simulation core.
//!
//! This crate owns the exponential-size amplitude buffer and everything that
//! touches it: the gate catalog (dense unitary matrices), matrix-on-subspace
//! gate application, stochastic noise channel sampling, and measurement shot
//! sampling.
//!
//! Gate application is deterministic: `apply` is a pure function of
//! `(state, gate)` with no hidden global state. Randomness enters only
//! through the noise and sampling entry points, which take a caller-seeded
//! RNG so that a fixed seed is bit-reproducible.
//!
//! # Quick start
//!
//! ```rust
//! use hugin_engine::Statevector;
//! use hugin_ir::{Gate, StandardGate, QubitId};
//!
//! let mut state = Statevector::new(2).unwrap();
//! state.apply(&Gate::new(StandardGate::H, [QubitId(0)]).unwrap()).unwrap();
//! state.apply(&Gate::new(StandardGate::CX, [QubitId(0), QubitId(1)]).unwrap()).unwrap();
//!
//! // Bell state: probability mass on |00⟩ and |11⟩ only.
//! let probs = state.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//! ```

pub mod catalog;
pub mod error;
pub mod noise;
pub mod sampling;
pub mod statevector;

pub use error::{EngineError, EngineResult};
pub use sampling::sample_counts;
pub use statevector::{Statevector, MAX_QUBITS, NORM_TOLERANCE};
