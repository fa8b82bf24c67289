//! Noise model configuration.
//!
//! The noise model is a plain value object: it is cloned into each job at
//! submission time, so two jobs can run concurrently with different noise
//! configurations without interference. A disabled model makes execution
//! bit-reproducible given a fixed PRNG seed; an enabled model only changes
//! sampling, never the gate application engine's matrix math.

use serde::{Deserialize, Serialize};

/// Stochastic error-channel configuration for simulated execution.
///
/// Five independent per-gate error rates plus two readout error rates, all
/// probabilities in `[0, 1]`. The default is everything zero and disabled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Per-gate depolarization probability (random Pauli on error).
    pub depolarization_rate: f64,
    /// Per-gate bit-flip (X) probability.
    pub bit_flip_rate: f64,
    /// Per-gate phase-flip (Z) probability.
    pub phase_flip_rate: f64,
    /// Per-gate amplitude damping (T1 relaxation) probability.
    pub amplitude_damping_rate: f64,
    /// Per-gate phase damping (T2 dephasing) probability.
    pub phase_damping_rate: f64,
    /// Probability a measured 0 is read out as 1.
    pub readout_error_0to1: f64,
    /// Probability a measured 1 is read out as 0.
    pub readout_error_1to0: f64,
    /// Master switch. When false, every rate is ignored.
    pub enabled: bool,
}

impl NoiseModel {
    /// A disabled noise model (all rates zero).
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A uniform depolarizing model with probability `p` on every gate.
    pub fn depolarizing(p: f64) -> Self {
        Self {
            depolarization_rate: p,
            enabled: true,
            ..Self::default()
        }
    }

    /// Whether any gate-level channel has a non-zero rate.
    pub fn has_gate_noise(&self) -> bool {
        self.enabled
            && (self.depolarization_rate > 0.0
                || self.bit_flip_rate > 0.0
                || self.phase_flip_rate > 0.0
                || self.amplitude_damping_rate > 0.0
                || self.phase_damping_rate > 0.0)
    }

    /// Whether readout error is in effect.
    pub fn has_readout_error(&self) -> bool {
        self.enabled && (self.readout_error_0to1 > 0.0 || self.readout_error_1to0 > 0.0)
    }
}
