//! Statevector: the amplitude store and gate application engine.

use num_complex::Complex64;
use tracing::trace;

use hugin_ir::{Gate, GateKind};

use crate::catalog;
use crate::error::{EngineError, EngineResult};

/// Maximum qubit count the engine will allocate an amplitude buffer for.
///
/// The buffer holds `2^n` complex doubles, so this is a hard memory guard,
/// not a tunable.
pub const MAX_QUBITS: u32 = 32;

/// Allowed drift of total probability mass from 1.0.
pub const NORM_TOLERANCE: f64 = 1e-6;

/// A quantum state over `n` qubits: `2^n` complex amplitudes plus a cached
/// probability table.
///
/// Index `i` encodes the computational basis state whose bit for qubit `q`
/// is `(i >> q) & 1`. The probability cache is recomputed after every gate
/// application and is never hand-edited; callers must not read it
/// mid-application.
#[derive(Debug)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers), exclusively owned.
    amplitudes: Vec<Complex64>,
    /// Cached |amplitude|^2 per basis state.
    probabilities: Vec<f64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl Statevector {
    /// Create a new statevector initialized to `|0...0⟩`.
    pub fn new(num_qubits: u32) -> EngineResult<Self> {
        if num_qubits == 0 {
            return Err(EngineError::ZeroQubits);
        }
        if num_qubits > MAX_QUBITS {
            return Err(EngineError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let dim = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        let mut probabilities = vec![0.0; dim];
        probabilities[0] = 1.0;
        Ok(Self {
            amplitudes,
            probabilities,
            num_qubits,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Dimension of the amplitude buffer (`2^n`).
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// The cached probabilities, indexed by basis state.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Consume the state, returning the raw amplitude buffer.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Total probability mass (should be `1.0` within [`NORM_TOLERANCE`]).
    pub fn total_probability(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Marginal probability that qubit `q` measures as 1.
    pub fn probability_of_one(&self, qubit: u32) -> f64 {
        let mask = 1usize << qubit;
        self.probabilities
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, p)| p)
            .sum()
    }

    /// Fail if total probability drifted beyond [`NORM_TOLERANCE`].
    pub fn check_norm(&self) -> EngineResult<()> {
        let total = self.total_probability();
        if (total - 1.0).abs() > NORM_TOLERANCE {
            return Err(EngineError::NormDrift { total });
        }
        Ok(())
    }

    /// Apply a gate to this state.
    ///
    /// Pure given `(state, gate)`: looks up the gate's dense unitary in the
    /// catalog (or takes the custom matrix) and applies it to the targeted
    /// subspace. Probabilities are recomputed before returning.
    pub fn apply(&mut self, gate: &Gate) -> EngineResult<()> {
        let targets: Vec<usize> = gate.qubits().iter().map(|q| q.index()).collect();
        for (q, &t) in gate.qubits().iter().zip(&targets) {
            if t >= self.num_qubits as usize {
                return Err(EngineError::QubitOutOfRange {
                    gate_name: gate.name().to_string(),
                    qubit: q.0,
                    num_qubits: self.num_qubits,
                });
            }
        }
        trace!(gate = gate.name(), ?targets, "applying gate");

        match gate.kind() {
            GateKind::Standard(std_gate) => {
                let m = catalog::matrix(std_gate);
                self.apply_matrix(&m, &targets)
            }
            GateKind::Custom(custom) => self.apply_matrix(&custom.matrix, &targets),
        }
    }

    /// Apply a dense `2^k × 2^k` unitary to the subspace spanned by
    /// `targets`, where bit `b` of a subspace index addresses `targets[b]`.
    ///
    /// Writes into a freshly allocated output buffer and swaps it in, so the
    /// input is never aliased mid-computation. This is the standard
    /// tensor-contraction trick: the full `2^n × 2^n` unitary is never
    /// materialized.
    pub fn apply_matrix(&mut self, matrix: &[Complex64], targets: &[usize]) -> EngineResult<()> {
        let k = targets.len();
        let dim = 1usize << k;
        if matrix.len() != dim * dim {
            return Err(EngineError::MatrixDimensionMismatch {
                expected: dim * dim,
                got: matrix.len(),
                num_targets: k,
            });
        }

        let masks: Vec<usize> = targets.iter().map(|&q| 1usize << q).collect();
        let combined: usize = masks.iter().sum();

        let mut out = vec![Complex64::new(0.0, 0.0); self.amplitudes.len()];
        for i in 0..self.amplitudes.len() {
            // Position of basis state i within its gate-subspace group.
            let mut row = 0usize;
            for (b, &mask) in masks.iter().enumerate() {
                if i & mask != 0 {
                    row |= 1 << b;
                }
            }
            let base = i & !combined;

            let mut acc = Complex64::new(0.0, 0.0);
            for col in 0..dim {
                let mut j = base;
                for (b, &mask) in masks.iter().enumerate() {
                    if col & (1 << b) != 0 {
                        j |= mask;
                    }
                }
                acc += matrix[row * dim + col] * self.amplitudes[j];
            }
            out[i] = acc;
        }
        self.amplitudes = out;
        self.refresh_probabilities();
        Ok(())
    }

    /// Rescale amplitudes so total probability is exactly 1.
    ///
    /// No-op on a zero vector.
    pub fn renormalize(&mut self) {
        let norm = self.total_probability().sqrt();
        if norm > 0.0 {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
            self.refresh_probabilities();
        }
    }

    fn refresh_probabilities(&mut self) {
        for (p, amp) in self.probabilities.iter_mut().zip(&self.amplitudes) {
            *p = amp.norm_sqr();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hugin_ir::{CustomGate, GateKind, QubitId, StandardGate};
    use std::f64::consts::FRAC_1_SQRT_2;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn gate(g: StandardGate, qubits: &[u32]) -> Gate {
        Gate::new(g, qubits.iter().map(|&q| QubitId(q))).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2).unwrap();
        assert_eq!(sv.dimension(), 4);
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.probabilities()[0], 1.0);
        assert_eq!(sv.total_probability(), 1.0);
    }

    #[test]
    fn test_qubit_limits() {
        assert!(matches!(
            Statevector::new(0).unwrap_err(),
            EngineError::ZeroQubits
        ));
        assert!(matches!(
            Statevector::new(MAX_QUBITS + 1).unwrap_err(),
            EngineError::TooManyQubits { .. }
        ));
    }

    #[test]
    fn test_hadamard_on_zero() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();

        assert!(approx_eq(
            sv.amplitudes()[0],
            Complex64::new(FRAC_1_SQRT_2, 0.0)
        ));
        assert!(approx_eq(
            sv.amplitudes()[1],
            Complex64::new(FRAC_1_SQRT_2, 0.0)
        ));
        sv.check_norm().unwrap();
    }

    #[test]
    fn test_x_on_zero_is_one_exactly() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply(&gate(StandardGate::X, &[0])).unwrap();

        assert_eq!(sv.amplitudes()[0], Complex64::new(0.0, 0.0));
        assert_eq!(sv.amplitudes()[1], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();
        sv.apply(&gate(StandardGate::CX, &[0, 1])).unwrap();

        assert!(approx_eq(
            sv.amplitudes()[0],
            Complex64::new(FRAC_1_SQRT_2, 0.0)
        ));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(
            sv.amplitudes()[3],
            Complex64::new(FRAC_1_SQRT_2, 0.0)
        ));
    }

    #[test]
    fn test_cnot_maps_10_to_11() {
        // Control = qubit 1, target = qubit 0: |10⟩ (index 2) → |11⟩.
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::X, &[1])).unwrap();
        sv.apply(&gate(StandardGate::CX, &[1, 0])).unwrap();

        assert!(approx_eq(sv.amplitudes()[3], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.probabilities()[3], 1.0);
    }

    #[test]
    fn test_toffoli() {
        let mut sv = Statevector::new(3).unwrap();
        sv.apply(&gate(StandardGate::X, &[0])).unwrap();
        sv.apply(&gate(StandardGate::X, &[1])).unwrap();
        sv.apply(&gate(StandardGate::CCX, &[0, 1, 2])).unwrap();

        // |011⟩ with both controls set flips the target: |111⟩ = index 7.
        assert!(approx_eq(sv.amplitudes()[7], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_swap() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::X, &[0])).unwrap();
        sv.apply(&gate(StandardGate::Swap, &[0, 1])).unwrap();

        // |01⟩ (index 1) → |10⟩ (index 2).
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_probability_of_one() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply(&gate(StandardGate::H, &[0])).unwrap();

        assert!((sv.probability_of_one(0) - 0.5).abs() < 1e-12);
        assert!(sv.probability_of_one(1).abs() < 1e-12);
    }

    #[test]
    fn test_custom_matrix_dimension_mismatch() {
        let mut sv = Statevector::new(2).unwrap();
        let eye2 = catalog::identity(2);
        // 2x2 matrix on two targets is a contract violation.
        let err = sv.apply_matrix(&eye2, &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MatrixDimensionMismatch { expected: 16, got: 4, num_targets: 2 }
        ));
    }

    #[test]
    fn test_gate_out_of_range() {
        let mut sv = Statevector::new(1).unwrap();
        let err = sv.apply(&gate(StandardGate::H, &[1])).unwrap_err();
        assert!(matches!(err, EngineError::QubitOutOfRange { qubit: 1, .. }));
    }

    #[test]
    fn test_custom_gate_applies() {
        // A custom X built from its matrix behaves like StandardGate::X.
        let x = CustomGate::new(
            "my_x",
            1,
            vec![
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
            ],
        )
        .unwrap();
        let g = Gate::new(GateKind::Custom(x), [QubitId(0)]).unwrap();

        let mut sv = Statevector::new(1).unwrap();
        sv.apply(&g).unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_norm_drift_detected() {
        let mut sv = Statevector::new(1).unwrap();
        // A non-unitary "gate" loses probability mass.
        let half = vec![
            Complex64::new(0.5, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.5, 0.0),
        ];
        sv.apply_matrix(&half, &[0]).unwrap();
        assert!(matches!(
            sv.check_norm().unwrap_err(),
            EngineError::NormDrift { .. }
        ));
    }

    #[test]
    fn test_determinism() {
        // Same circuit twice produces bit-identical amplitudes.
        let run = || {
            let mut sv = Statevector::new(3).unwrap();
            sv.apply(&gate(StandardGate::H, &[0])).unwrap();
            sv.apply(&gate(StandardGate::CX, &[0, 1])).unwrap();
            sv.apply(&gate(StandardGate::Rz(0.37), &[2])).unwrap();
            sv.into_amplitudes()
        };
        assert_eq!(run(), run());
    }
}
