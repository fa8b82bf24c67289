//! Backend trait.
//!
//! [`Backend`] is the execution seam between the scheduler and a simulator.
//! Execution is synchronous, CPU-bound code; the scheduler drives it on a
//! blocking thread, so the trait has no async surface.
//!
//! # Contract
//!
//! - `capabilities()` is synchronous and infallible. Implementations cache
//!   the descriptor at construction time and return a reference.
//! - `execute()` is pure with respect to `(circuit, shots, noise, seed)`:
//!   given a disabled noise model and the same seed, the returned histogram
//!   is bit-identical across runs.
//! - `execute()` never panics on a well-formed circuit; failures come back
//!   as `HalError::ExecutionFailed`.

use hugin_ir::{Circuit, NoiseModel};

use crate::capability::{BackendKind, Capabilities};
use crate::error::HalResult;
use crate::result::ExecutionOutcome;

/// Trait for execution backends.
pub trait Backend: Send + Sync {
    /// The name of this backend, unique within a registry.
    fn name(&self) -> &str;

    /// The capabilities of this backend.
    ///
    /// Cached at construction time; never performs I/O.
    fn capabilities(&self) -> &Capabilities;

    /// The kind of backend, as declared by its capabilities.
    fn kind(&self) -> BackendKind {
        self.capabilities().kind
    }

    /// Execute a circuit for `shots` measurement shots.
    ///
    /// `noise` has already been snapshotted by the caller; `seed` drives
    /// every random draw the backend makes.
    fn execute(
        &self,
        circuit: &Circuit,
        shots: u64,
        noise: &NoiseModel,
        seed: u64,
    ) -> HalResult<ExecutionOutcome>;
}

impl std::fmt::Debug for dyn Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").field("name", &self.name()).finish()
    }
}
