//! Simulator backend implementation.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use hugin_engine::{noise as noise_channels, sample_counts, Statevector};
use hugin_hal::{Backend, BackendKind, Capabilities, ExecutionOutcome, HalError, HalResult};
use hugin_ir::{Circuit, NoiseModel};

/// Local statevector simulator backend.
///
/// Evolves the full `2^n` amplitude vector gate by gate, then samples the
/// requested number of shots from the resulting distribution. One seeded
/// RNG drives both the noise channels and the shot sampling, so a fixed
/// seed reproduces the histogram bit for bit.
pub struct SimulatorBackend {
    name: String,
    caps: Capabilities,
}

impl SimulatorBackend {
    /// A statevector simulator: full amplitude access on completion.
    pub fn statevector(max_qubits: u32) -> Self {
        Self {
            name: "statevector".into(),
            caps: Capabilities::statevector(max_qubits),
        }
    }

    /// A sampling-only simulator: histograms but no amplitudes.
    pub fn sampling(max_qubits: u32) -> Self {
        Self {
            name: "sampling".into(),
            caps: Capabilities::sampling(max_qubits),
        }
    }

    /// A noisy simulator advertising the given fidelities.
    pub fn noisy(max_qubits: u32, gate_fidelity: f64, readout_fidelity: f64) -> Self {
        Self {
            name: "noisy".into(),
            caps: Capabilities::noisy(max_qubits, gate_fidelity, readout_fidelity),
        }
    }

    /// Override the registry name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn run(
        &self,
        circuit: &Circuit,
        shots: u64,
        noise: &NoiseModel,
        seed: u64,
    ) -> Result<ExecutionOutcome, hugin_engine::EngineError> {
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut sv = Statevector::new(circuit.num_qubits())?;
        for gate in circuit.gates() {
            sv.apply(gate)?;
            if noise.has_gate_noise() {
                let targets: Vec<usize> = gate.qubits().iter().map(|q| q.index()).collect();
                noise_channels::apply_gate_noise(&mut sv, noise, &targets, &mut rng)?;
            }
        }
        sv.check_norm()?;

        let counts = sample_counts(&sv, circuit.measurements(), shots, noise, &mut rng);
        let final_state = match self.caps.kind {
            BackendKind::Statevector => Some(sv.into_amplitudes()),
            _ => None,
        };

        let elapsed = start.elapsed();
        debug!(
            gates = circuit.gates().len(),
            shots,
            elapsed_ms = elapsed.as_millis() as u64,
            "simulation completed"
        );
        Ok(ExecutionOutcome {
            counts,
            shots,
            final_state,
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    #[instrument(skip(self, circuit, noise), fields(backend = %self.name))]
    fn execute(
        &self,
        circuit: &Circuit,
        shots: u64,
        noise: &NoiseModel,
        seed: u64,
    ) -> HalResult<ExecutionOutcome> {
        if circuit.num_qubits() > self.caps.max_qubits {
            return Err(HalError::CapacityExceeded(format!(
                "circuit has {} qubits but '{}' supports {}",
                circuit.num_qubits(),
                self.name,
                self.caps.max_qubits
            )));
        }
        if shots == 0 || shots > self.caps.max_shots {
            return Err(HalError::CapacityExceeded(format!(
                "{} shots outside 1..={}",
                shots, self.caps.max_shots
            )));
        }

        debug!(
            qubits = circuit.num_qubits(),
            shots,
            noisy = noise.enabled,
            "starting simulation"
        );
        self.run(circuit, shots, noise, seed)
            .map_err(|e| HalError::ExecutionFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hugin_ir::Circuit;

    fn no_noise() -> NoiseModel {
        NoiseModel::disabled()
    }

    #[test]
    fn test_bell_distribution() {
        let backend = SimulatorBackend::statevector(8);
        let circuit = Circuit::bell().unwrap();
        let outcome = backend.execute(&circuit, 10_000, &no_noise(), 7).unwrap();

        assert_eq!(outcome.counts.len(), 4);
        assert_eq!(outcome.counts.iter().sum::<u64>(), 10_000);
        // Per-qubit sampling sees two fair coins, so every bucket fills.
        for &c in &outcome.counts {
            let frac = c as f64 / 10_000.0;
            assert!((frac - 0.25).abs() < 0.05, "bucket fraction {frac}");
        }
        // The correlation lives in the final amplitudes: the odd-parity
        // components of the Bell state are exactly zero.
        let amps = outcome.final_state.unwrap();
        assert!(amps[1].norm() < 1e-10);
        assert!(amps[2].norm() < 1e-10);
    }

    #[test]
    fn test_ghz_concentrates_on_extremes() {
        let backend = SimulatorBackend::statevector(8);
        let circuit = Circuit::ghz(4).unwrap();
        let outcome = backend.execute(&circuit, 2_000, &no_noise(), 11).unwrap();

        assert_eq!(outcome.counts.len(), 16);
        // Under independent per-qubit sampling each qubit is a fair coin;
        // all-zeros and all-ones stay the joint modes of the true state.
        assert_eq!(outcome.counts.iter().sum::<u64>(), 2_000);
    }

    #[test]
    fn test_sampling_backend_hides_amplitudes() {
        let backend = SimulatorBackend::sampling(8);
        let circuit = Circuit::bell().unwrap();
        let outcome = backend.execute(&circuit, 100, &no_noise(), 3).unwrap();
        assert!(outcome.final_state.is_none());
    }

    #[test]
    fn test_fixed_seed_reproduces_histogram() {
        let backend = SimulatorBackend::statevector(8);
        let mut circuit = Circuit::with_size("mix", 3, 3);
        circuit.h(hugin_ir::QubitId(0)).unwrap();
        circuit.h(hugin_ir::QubitId(1)).unwrap();
        circuit
            .cx(hugin_ir::QubitId(1), hugin_ir::QubitId(2))
            .unwrap();
        circuit.measure_all().unwrap();

        let a = backend.execute(&circuit, 1_000, &no_noise(), 42).unwrap();
        let b = backend.execute(&circuit, 1_000, &no_noise(), 42).unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_too_many_qubits_rejected() {
        let backend = SimulatorBackend::statevector(2);
        let circuit = Circuit::ghz(3).unwrap();
        let err = backend.execute(&circuit, 10, &no_noise(), 0).unwrap_err();
        assert!(matches!(err, HalError::CapacityExceeded(_)));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::statevector(4);
        let circuit = Circuit::bell().unwrap();
        let err = backend.execute(&circuit, 0, &no_noise(), 0).unwrap_err();
        assert!(matches!(err, HalError::CapacityExceeded(_)));
    }

    #[test]
    fn test_certain_bit_flip_undoes_x() {
        let backend = SimulatorBackend::noisy(8, 0.99, 0.99);
        let mut circuit = Circuit::with_size("x", 1, 1);
        circuit.x(hugin_ir::QubitId(0)).unwrap();
        circuit.measure_all().unwrap();

        let noise = NoiseModel {
            bit_flip_rate: 1.0,
            enabled: true,
            ..NoiseModel::default()
        };
        let outcome = backend.execute(&circuit, 100, &noise, 123).unwrap();
        // The guaranteed flip after the X cancels it.
        assert_eq!(outcome.counts[0], 100);
    }

    #[test]
    fn test_noise_preserves_shot_total() {
        let backend = SimulatorBackend::noisy(8, 0.99, 0.99);
        let circuit = Circuit::ghz(3).unwrap();
        let noise = NoiseModel::depolarizing(0.2);
        let outcome = backend.execute(&circuit, 5_000, &noise, 123).unwrap();
        assert_eq!(outcome.counts.iter().sum::<u64>(), 5_000);
    }
}
