//! Gate catalog: dense unitary matrices for every standard gate.
//!
//! Matrices are row-major over the gate's own subspace. Subspace basis
//! convention: bit `b` of a subspace index corresponds to the gate's
//! `b`-th target qubit, matching the statevector's little-endian encoding.
//! For CX the operand order is (control, target), so control is bit 0.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use hugin_ir::StandardGate;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

#[inline]
fn phase(theta: f64) -> Complex64 {
    Complex64::from_polar(1.0, theta)
}

/// Produce the dense unitary for a standard gate.
///
/// The returned matrix has `(2^k)^2` entries for a `k`-qubit gate.
pub fn matrix(gate: &StandardGate) -> Vec<Complex64> {
    match gate {
        StandardGate::I => vec![ONE, ZERO, ZERO, ONE],
        StandardGate::X => vec![ZERO, ONE, ONE, ZERO],
        StandardGate::Y => vec![
            ZERO,
            Complex64::new(0.0, -1.0),
            Complex64::new(0.0, 1.0),
            ZERO,
        ],
        StandardGate::Z => vec![ONE, ZERO, ZERO, -ONE],
        StandardGate::H => {
            let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
            vec![h, h, h, -h]
        }
        StandardGate::S => vec![ONE, ZERO, ZERO, Complex64::new(0.0, 1.0)],
        StandardGate::T => vec![ONE, ZERO, ZERO, phase(PI / 4.0)],
        StandardGate::Rx(theta) => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new(0.0, -(theta / 2.0).sin());
            vec![c, s, s, c]
        }
        StandardGate::Ry(theta) => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new((theta / 2.0).sin(), 0.0);
            vec![c, -s, s, c]
        }
        StandardGate::Rz(theta) => {
            vec![phase(-theta / 2.0), ZERO, ZERO, phase(theta / 2.0)]
        }
        StandardGate::P(theta) | StandardGate::U1(theta) => {
            vec![ONE, ZERO, ZERO, phase(*theta)]
        }
        StandardGate::U2(phi, lambda) => {
            let h = FRAC_1_SQRT_2;
            vec![
                Complex64::new(h, 0.0),
                -phase(*lambda) * h,
                phase(*phi) * h,
                phase(phi + lambda) * h,
            ]
        }
        StandardGate::U3(theta, phi, lambda) => {
            let c = (theta / 2.0).cos();
            let s = (theta / 2.0).sin();
            vec![
                Complex64::new(c, 0.0),
                -phase(*lambda) * s,
                phase(*phi) * s,
                phase(phi + lambda) * c,
            ]
        }
        StandardGate::CX => {
            // Operands (control, target): control is subspace bit 0.
            let mut m = vec![ZERO; 16];
            m[0] = ONE; // |00⟩ → |00⟩
            m[2 * 4 + 2] = ONE; // |t=1,c=0⟩ fixed
            m[3 * 4 + 1] = ONE; // |c=1,t=0⟩ → |c=1,t=1⟩
            m[4 + 3] = ONE;
            m
        }
        StandardGate::CZ => {
            let mut m = identity(4);
            m[3 * 4 + 3] = -ONE;
            m
        }
        StandardGate::CP(theta) => {
            let mut m = identity(4);
            m[3 * 4 + 3] = phase(*theta);
            m
        }
        StandardGate::Swap => {
            let mut m = vec![ZERO; 16];
            m[0] = ONE;
            m[4 + 2] = ONE;
            m[2 * 4 + 1] = ONE;
            m[3 * 4 + 3] = ONE;
            m
        }
        StandardGate::CCX => {
            // Operands (c1, c2, target): swap |011⟩ ↔ |111⟩ (target is bit 2).
            let mut m = identity(8);
            m[3 * 8 + 3] = ZERO;
            m[7 * 8 + 7] = ZERO;
            m[3 * 8 + 7] = ONE;
            m[7 * 8 + 3] = ONE;
            m
        }
        StandardGate::CSwap => {
            // Operands (control, t1, t2): swap bits 1 and 2 when bit 0 set.
            let mut m = identity(8);
            m[3 * 8 + 3] = ZERO;
            m[5 * 8 + 5] = ZERO;
            m[3 * 8 + 5] = ONE;
            m[5 * 8 + 3] = ONE;
            m
        }
    }
}

/// Row-major identity matrix of the given dimension.
pub fn identity(dim: usize) -> Vec<Complex64> {
    let mut m = vec![ZERO; dim * dim];
    for i in 0..dim {
        m[i * dim + i] = ONE;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_unitary(m: &[Complex64], dim: usize) -> bool {
        // M · M† = I within tolerance.
        for r in 0..dim {
            for c in 0..dim {
                let mut acc = ZERO;
                for k in 0..dim {
                    acc += m[r * dim + k] * m[c * dim + k].conj();
                }
                let expected = if r == c { 1.0 } else { 0.0 };
                if (acc - Complex64::new(expected, 0.0)).norm() > 1e-12 {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_all_standard_matrices_are_unitary() {
        let gates = vec![
            StandardGate::I,
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::T,
            StandardGate::Rx(0.7),
            StandardGate::Ry(1.3),
            StandardGate::Rz(-2.1),
            StandardGate::P(0.4),
            StandardGate::U1(0.4),
            StandardGate::U2(0.3, 1.1),
            StandardGate::U3(0.9, 0.2, -0.5),
            StandardGate::CX,
            StandardGate::CZ,
            StandardGate::CP(PI / 8.0),
            StandardGate::Swap,
            StandardGate::CCX,
            StandardGate::CSwap,
        ];
        for gate in gates {
            let dim = 1usize << gate.num_qubits();
            let m = matrix(&gate);
            assert_eq!(m.len(), dim * dim, "size of {}", gate.name());
            assert!(is_unitary(&m, dim), "{} is not unitary", gate.name());
        }
    }

    #[test]
    fn test_p_equals_u1() {
        assert_eq!(
            matrix(&StandardGate::P(0.77)),
            matrix(&StandardGate::U1(0.77))
        );
    }

    #[test]
    fn test_cx_permutation() {
        // CX maps subspace state |c=1, t=0⟩ (index 1) to |c=1, t=1⟩ (index 3).
        let m = matrix(&StandardGate::CX);
        assert_eq!(m[3 * 4 + 1], ONE);
        assert_eq!(m[4 + 3], ONE);
        assert_eq!(m[4 + 1], ZERO);
    }

    #[test]
    fn test_rz_is_diagonal_phase() {
        let m = matrix(&StandardGate::Rz(PI));
        assert!((m[0] - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!((m[3] - Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }
}
