//! Job scheduling and execution for Hugin.
//!
//! The [`Executor`] owns a circuit arena, a shared job table, and a fixed
//! pool of tokio workers draining a bounded work queue. Submission
//! validates against the backend's capabilities and snapshots the circuit
//! and noise model, so a queued job is immune to later edits; claiming is
//! a single check-and-set under the job-table lock and execution runs on a
//! blocking thread with no lock held.
//!
//! ```no_run
//! use std::sync::Arc;
//! use hugin_adapter_sim::SimulatorBackend;
//! use hugin_hal::BackendRegistry;
//! use hugin_ir::Circuit;
//! use hugin_sched::{Executor, ExecutorConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(BackendRegistry::new());
//! let backend = registry.register(Arc::new(SimulatorBackend::statevector(24)))?;
//!
//! let executor = Executor::new(ExecutorConfig::default(), registry);
//! let circuit = executor.insert_circuit(Circuit::bell()?);
//! let job = executor.submit_job(circuit, backend, 1000).await?;
//! executor.wait(job).await?;
//! let counts = executor.job_counts(job)?;
//! # Ok(())
//! # }
//! ```

pub mod arena;
pub mod error;
pub mod executor;
pub mod job;

pub use arena::{Arena, ArenaId};
pub use error::{SchedError, SchedResult};
pub use executor::{Executor, ExecutorConfig};
pub use job::{CircuitId, Job, JobId, JobState, JobTable};
