//! Quantum Fourier transform circuit builder.

use std::f64::consts::PI;

use hugin_ir::{Circuit, QubitId};

use crate::error::{AlgoError, AlgoResult};

/// Build an `n`-qubit QFT circuit, without measurements.
///
/// Textbook layout: a Hadamard on each qubit followed by controlled phase
/// rotations of `pi / 2^k` from each later qubit, then a swap cascade for
/// the bit reversal.
pub fn qft(n: u32) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::EmptyRegister);
    }
    let mut circuit = Circuit::with_size("qft", n, 0);

    for i in 0..n {
        circuit.h(QubitId(i))?;
        for j in (i + 1)..n {
            let k = j - i;
            let angle = PI / (1u64 << k) as f64;
            circuit.cp(angle, QubitId(j), QubitId(i))?;
        }
    }

    for i in 0..n / 2 {
        circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
    }

    Ok(circuit)
}

/// Build the inverse QFT: the QFT's gates reversed with negated angles.
pub fn inverse_qft(n: u32) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::EmptyRegister);
    }
    let mut circuit = Circuit::with_size("iqft", n, 0);

    for i in 0..n / 2 {
        circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
    }

    for i in (0..n).rev() {
        for j in ((i + 1)..n).rev() {
            let k = j - i;
            let angle = -PI / (1u64 << k) as f64;
            circuit.cp(angle, QubitId(j), QubitId(i))?;
        }
        circuit.h(QubitId(i))?;
    }

    Ok(circuit)
}
