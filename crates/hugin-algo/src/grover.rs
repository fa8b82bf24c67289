//! Grover's search algorithm circuit builder.
//!
//! Grover's algorithm finds a marked item in an unstructured space of `N`
//! states with `O(sqrt(N))` oracle queries. The builder emits the textbook
//! structure: uniform superposition, then `floor(pi/4 * sqrt(N))` rounds of
//! oracle plus diffusion, then measurement of every qubit.
//!
//! The phase-flip oracle and the diffusion's multi-controlled Z are exact
//! diagonal unitaries attached as custom gates, so the amplification math
//! is correct for every register size the gate model supports (up to
//! [`MAX_GATE_QUBITS`] qubits).

use std::f64::consts::PI;

use num_complex::Complex64;

use hugin_ir::{Circuit, CustomGate, QubitId, MAX_GATE_QUBITS};

use crate::error::{AlgoError, AlgoResult};

/// Number of qubits needed to index a space of `size` states.
fn qubits_for(size: u64) -> u32 {
    (64 - (size - 1).leading_zeros()).max(1)
}

/// Optimal number of Grover iterations for a single marked state.
pub fn optimal_iterations(num_qubits: u32) -> usize {
    let n = (1u64 << num_qubits) as f64;
    ((PI / 4.0 * n.sqrt()).floor() as usize).max(1)
}

/// A diagonal unitary that flips the phase of one basis state.
fn phase_flip(num_qubits: u32, index: u64) -> AlgoResult<CustomGate> {
    let dim = 1usize << num_qubits;
    let mut matrix = vec![Complex64::new(0.0, 0.0); dim * dim];
    for i in 0..dim {
        matrix[i * dim + i] = if i as u64 == index {
            Complex64::new(-1.0, 0.0)
        } else {
            Complex64::new(1.0, 0.0)
        };
    }
    Ok(CustomGate::new("phase_flip", num_qubits, matrix)?)
}

/// Grover search over a space of `size` states with one marked `target`.
#[derive(Debug, Clone)]
pub struct GroverSearch {
    num_qubits: u32,
    target: u64,
    iterations: usize,
}

impl GroverSearch {
    /// Plan a search over `size` states for the marked state `target`.
    ///
    /// The register size is the smallest one indexing the space, and the
    /// iteration count is the optimal `floor(pi/4 * sqrt(N))`. Spaces
    /// needing more than [`MAX_GATE_QUBITS`] qubits are rejected; the
    /// exact oracle does not degrade into an approximation.
    pub fn new(size: u64, target: u64) -> AlgoResult<Self> {
        if size < 2 {
            return Err(AlgoError::EmptyRegister);
        }
        if target >= size {
            return Err(AlgoError::TargetOutOfRange { target, size });
        }
        let num_qubits = qubits_for(size);
        if num_qubits > MAX_GATE_QUBITS {
            return Err(AlgoError::SearchSpaceTooLarge {
                qubits: num_qubits,
                max: MAX_GATE_QUBITS,
            });
        }
        Ok(Self {
            num_qubits,
            target,
            iterations: optimal_iterations(num_qubits),
        })
    }

    /// Override the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// The register size in qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The planned number of oracle/diffusion rounds.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Build the full circuit, measurements included.
    pub fn build(&self) -> AlgoResult<Circuit> {
        let n = self.num_qubits;
        let mut circuit = Circuit::with_size("grover", n, n);
        let all: Vec<QubitId> = (0..n).map(QubitId).collect();

        // Uniform superposition.
        for &q in &all {
            circuit.h(q)?;
        }

        let oracle = phase_flip(n, self.target)?;
        // 2|s⟩⟨s| - I conjugated to the computational basis: a phase flip
        // of |0...0⟩ sandwiched in Hadamards, up to a global phase.
        let zero_flip = phase_flip(n, 0)?;

        for _ in 0..self.iterations {
            circuit.add_custom(oracle.clone(), all.iter().copied())?;
            for &q in &all {
                circuit.h(q)?;
            }
            circuit.add_custom(zero_flip.clone(), all.iter().copied())?;
            for &q in &all {
                circuit.h(q)?;
            }
        }

        circuit.measure_all()?;
        Ok(circuit)
    }
}
