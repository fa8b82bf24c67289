//! Backend capability introspection.
//!
//! [`Capabilities`] describes what a backend can do: qubit and shot limits,
//! feature flags, and fidelity figures. The registry validates a descriptor
//! once at registration; after that it is read-mostly data that schedulers
//! consult for admission checks.

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// The kind of simulation (or hardware) a backend performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// Full statevector simulation; final amplitudes are retrievable.
    Statevector,
    /// Shot sampling only; amplitudes are not exposed.
    ShotSampling,
    /// Density-matrix simulation.
    DensityMatrix,
    /// GPU-accelerated simulation.
    Gpu,
    /// Stand-in for real hardware with realistic limits.
    HardwareStub,
}

impl BackendKind {
    /// Human-readable name, used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Statevector => "statevector",
            BackendKind::ShotSampling => "shot_sampling",
            BackendKind::DensityMatrix => "density_matrix",
            BackendKind::Gpu => "gpu",
            BackendKind::HardwareStub => "hardware_stub",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware capabilities of a backend.
///
/// Limits and flags a scheduler checks before admitting a job. Fidelities
/// are probabilities in `[0, 1]`; `1.0` means ideal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// The kind of backend.
    pub kind: BackendKind,
    /// Number of qubits available.
    pub max_qubits: u32,
    /// Maximum number of shots per job.
    pub max_shots: u64,
    /// Whether user-supplied unitaries are accepted.
    pub supports_custom_gates: bool,
    /// Whether noise-model execution is supported.
    pub supports_noise: bool,
    /// Whether error-corrected execution is supported.
    pub supports_error_correction: bool,
    /// Average gate fidelity in `[0, 1]`.
    pub gate_fidelity: f64,
    /// Average readout fidelity in `[0, 1]`.
    pub readout_fidelity: f64,
}

impl Capabilities {
    /// Capabilities of an ideal statevector simulator.
    pub fn statevector(max_qubits: u32) -> Self {
        Self {
            kind: BackendKind::Statevector,
            max_qubits,
            max_shots: 10_000_000,
            supports_custom_gates: true,
            supports_noise: true,
            supports_error_correction: false,
            gate_fidelity: 1.0,
            readout_fidelity: 1.0,
        }
    }

    /// Capabilities of a sampling-only simulator (no amplitude access).
    pub fn sampling(max_qubits: u32) -> Self {
        Self {
            kind: BackendKind::ShotSampling,
            ..Self::statevector(max_qubits)
        }
    }

    /// Capabilities of a noisy simulator with the given fidelities.
    pub fn noisy(max_qubits: u32, gate_fidelity: f64, readout_fidelity: f64) -> Self {
        Self {
            kind: BackendKind::Statevector,
            gate_fidelity,
            readout_fidelity,
            ..Self::statevector(max_qubits)
        }
    }

    /// Capabilities of a hardware stand-in with tight limits.
    pub fn hardware_stub(max_qubits: u32, max_shots: u64) -> Self {
        Self {
            kind: BackendKind::HardwareStub,
            max_qubits,
            max_shots,
            supports_custom_gates: false,
            supports_noise: true,
            supports_error_correction: false,
            gate_fidelity: 0.995,
            readout_fidelity: 0.98,
        }
    }

    /// Validate this descriptor for registration under `name`.
    pub fn validate(&self, name: &str) -> HalResult<()> {
        if self.max_qubits == 0 {
            return Err(HalError::InvalidCapabilities {
                name: name.to_string(),
                reason: "max_qubits must be at least 1".into(),
            });
        }
        if self.max_shots == 0 {
            return Err(HalError::InvalidCapabilities {
                name: name.to_string(),
                reason: "max_shots must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.gate_fidelity) {
            return Err(HalError::InvalidCapabilities {
                name: name.to_string(),
                reason: format!("gate_fidelity {} outside [0, 1]", self.gate_fidelity),
            });
        }
        if !(0.0..=1.0).contains(&self.readout_fidelity) {
            return Err(HalError::InvalidCapabilities {
                name: name.to_string(),
                reason: format!("readout_fidelity {} outside [0, 1]", self.readout_fidelity),
            });
        }
        Ok(())
    }
}
