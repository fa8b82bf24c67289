//! Shot sampling: turning a statevector into a measurement histogram.

use rand::Rng;

use hugin_ir::{ClbitId, NoiseModel, QubitId};

use crate::statevector::Statevector;

/// Sample `shots` measurement outcomes into a histogram.
///
/// Each `(qubit, clbit)` binding is sampled independently from the qubit's
/// marginal `P(1)`; the drawn bit lands at position `clbit` of the outcome
/// index. The histogram has length `2^n` for an `n`-qubit state; bindings
/// whose classical bit falls outside that range are ignored. Correlations
/// between qubits are not preserved by the histogram; callers that need
/// them read the final amplitudes instead.
///
/// When the model carries readout error the draw probability is biased to
/// `p1 * (1 - e_1to0) + (1 - p1) * e_0to1`, clamped to `[0, 1]`.
///
/// Every random draw comes from `rng`, so a seeded RNG makes the whole
/// histogram reproducible.
pub fn sample_counts<R: Rng>(
    state: &Statevector,
    measurements: &[(QubitId, ClbitId)],
    shots: u64,
    noise: &NoiseModel,
    rng: &mut R,
) -> Vec<u64> {
    let num_qubits = state.num_qubits();
    let mut counts = vec![0u64; state.dimension()];

    // Marginal P(bit = 1) per binding, biased by readout error up front.
    let bindings: Vec<(u32, f64)> = measurements
        .iter()
        .filter(|(_, c)| c.0 < num_qubits)
        .map(|(q, c)| {
            let mut p = state.probability_of_one(q.0);
            if noise.has_readout_error() {
                p = (p * (1.0 - noise.readout_error_1to0)
                    + (1.0 - p) * noise.readout_error_0to1)
                    .clamp(0.0, 1.0);
            }
            (c.0, p)
        })
        .collect();

    for _ in 0..shots {
        let mut outcome = 0usize;
        for &(clbit, p) in &bindings {
            if rng.gen::<f64>() < p {
                outcome |= 1 << clbit;
            }
        }
        counts[outcome] += 1;
    }
    counts
}
