//! Reference algorithm circuit builders for Hugin.
//!
//! - [`GroverSearch`] — unstructured search with an exact phase-flip
//!   oracle and the optimal iteration count
//! - [`qft`] / [`inverse_qft`] — the quantum Fourier transform
//!
//! Builders produce plain [`hugin_ir::Circuit`] values; nothing here
//! touches a backend.

pub mod error;
pub mod grover;
pub mod qft;

pub use error::{AlgoError, AlgoResult};
pub use grover::{optimal_iterations, GroverSearch};
pub use qft::{inverse_qft, qft};
