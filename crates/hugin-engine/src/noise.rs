//! Stochastic noise channels, Monte Carlo style.
//!
//! Each channel is realized as a probabilistic Pauli (or damping) event on a
//! single qubit, drawn from the caller's RNG. Runs are reproducible given
//! the same seed: every draw comes from the one RNG the executor threads
//! through the shot.

use num_complex::Complex64;
use rand::Rng;
use tracing::trace;

use hugin_ir::{NoiseModel, StandardGate};

use crate::catalog;
use crate::error::EngineResult;
use crate::statevector::Statevector;

/// Apply the model's gate-error channels to each qubit a gate just acted on.
///
/// Order is fixed: bit flip, phase flip, depolarization, amplitude damping,
/// phase damping. A disabled model is a no-op.
pub fn apply_gate_noise<R: Rng>(
    state: &mut Statevector,
    model: &NoiseModel,
    targets: &[usize],
    rng: &mut R,
) -> EngineResult<()> {
    if !model.enabled || !model.has_gate_noise() {
        return Ok(());
    }

    for &qubit in targets {
        if model.bit_flip_rate > 0.0 && rng.gen::<f64>() < model.bit_flip_rate {
            trace!(qubit, "bit flip");
            apply_pauli(state, StandardGate::X, qubit)?;
        }
        if model.phase_flip_rate > 0.0 && rng.gen::<f64>() < model.phase_flip_rate {
            trace!(qubit, "phase flip");
            apply_pauli(state, StandardGate::Z, qubit)?;
        }
        if model.depolarization_rate > 0.0 && rng.gen::<f64>() < model.depolarization_rate {
            // Uniform choice among the three non-identity Paulis.
            let pauli = match rng.gen_range(0..3) {
                0 => StandardGate::X,
                1 => StandardGate::Y,
                _ => StandardGate::Z,
            };
            trace!(qubit, gate = pauli.name(), "depolarization");
            apply_pauli(state, pauli, qubit)?;
        }
        if model.amplitude_damping_rate > 0.0 {
            apply_amplitude_damping(state, model.amplitude_damping_rate, qubit, rng)?;
        }
        if model.phase_damping_rate > 0.0 && rng.gen::<f64>() < model.phase_damping_rate {
            trace!(qubit, "phase damping");
            apply_pauli(state, StandardGate::Z, qubit)?;
        }
    }
    Ok(())
}

fn apply_pauli(state: &mut Statevector, gate: StandardGate, qubit: usize) -> EngineResult<()> {
    let m = catalog::matrix(&gate);
    state.apply_matrix(&m, &[qubit])
}

/// Quantum-trajectory amplitude damping: the qubit decays `|1⟩ → |0⟩` with
/// probability `rate * P(1)`, and the surviving state is renormalized.
fn apply_amplitude_damping<R: Rng>(
    state: &mut Statevector,
    rate: f64,
    qubit: usize,
    rng: &mut R,
) -> EngineResult<()> {
    let p_one = state.probability_of_one(qubit as u32);
    if p_one <= 0.0 {
        return Ok(());
    }
    if rng.gen::<f64>() < rate * p_one {
        trace!(qubit, "amplitude damping jump");
        // Lowering operator |0⟩⟨1|: moves the |1⟩ amplitude to |0⟩.
        let lower = [
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
        ];
        state.apply_matrix(&lower, &[qubit])?;
        state.renormalize();
    }
    Ok(())
}
