//! The executor: a worker pool that drains a bounded job queue.
//!
//! Submission pushes a [`JobId`] onto a bounded `mpsc` channel; a fixed
//! pool of tokio tasks shares the receiver and claims jobs off the shared
//! table. The expensive simulation runs in `spawn_blocking` on job-local
//! data, so no lock is held while amplitudes churn. Completion wakes
//! waiters through the table's `Notify`; nothing busy-polls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use num_complex::Complex64;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use hugin_engine::MAX_QUBITS;
use hugin_hal::{BackendId, BackendRegistry, HalError};
use hugin_ir::{Circuit, ClbitId, Gate, IrError, NoiseModel, QubitId};

use crate::arena::Arena;
use crate::error::{SchedError, SchedResult};
use crate::job::{CircuitId, Job, JobId, JobState, JobTable};

/// Configuration for the executor pool.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Number of worker tasks. Zero workers accept submissions but never
    /// run them, which is occasionally useful in tests.
    pub workers: usize,
    /// Capacity of the bounded work queue; submission backpressures when
    /// the queue is full.
    pub queue_depth: usize,
    /// Noise model cloned into every job at submission.
    pub noise: NoiseModel,
    /// Base PRNG seed; each submission without an explicit seed derives a
    /// distinct one from this.
    pub seed: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_depth: 64,
            noise: NoiseModel::disabled(),
            seed: 0,
        }
    }
}

/// The job executor.
///
/// Owns the circuit arena, the job table, and the worker pool. All public
/// methods are safe to call from multiple tasks concurrently.
pub struct Executor {
    circuits: RwLock<Arena<Arc<RwLock<Circuit>>>>,
    jobs: Arc<JobTable>,
    registry: Arc<BackendRegistry>,
    tx: Option<mpsc::Sender<JobId>>,
    workers: Vec<JoinHandle<()>>,
    config: ExecutorConfig,
    seed_counter: AtomicU64,
}

impl Executor {
    /// Create an executor and spawn its worker pool.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: ExecutorConfig, registry: Arc<BackendRegistry>) -> Self {
        let jobs = Arc::new(JobTable::new());
        let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        let workers = (0..config.workers)
            .map(|worker| {
                tokio::spawn(worker_loop(
                    worker,
                    rx.clone(),
                    jobs.clone(),
                    registry.clone(),
                ))
            })
            .collect();
        info!(workers = config.workers, queue_depth = config.queue_depth, "executor started");

        Self {
            circuits: RwLock::new(Arena::new()),
            jobs,
            registry,
            tx: Some(tx),
            workers,
            config,
            seed_counter: AtomicU64::new(0),
        }
    }

    /// Drain the queue and join the workers.
    ///
    /// Jobs already queued still run to completion; new submissions fail
    /// with [`SchedError::Shutdown`].
    pub async fn shutdown(mut self) {
        self.tx.take();
        for worker in self.workers.drain(..) {
            let _ = worker.await;
        }
        info!("executor shut down");
    }

    // =========================================================================
    // Circuit construction
    // =========================================================================

    /// Create an empty circuit and return its id.
    pub fn create_circuit(
        &self,
        name: impl Into<String>,
        num_qubits: u32,
        num_clbits: u32,
    ) -> CircuitId {
        let circuit = Arc::new(RwLock::new(Circuit::with_size(name, num_qubits, num_clbits)));
        let mut circuits = self.circuits.write().unwrap_or_else(|e| e.into_inner());
        CircuitId(circuits.insert(circuit))
    }

    /// Append a gate to a circuit.
    pub fn add_gate(&self, circuit_id: CircuitId, gate: Gate) -> SchedResult<()> {
        let circuit = self.resolve_circuit(circuit_id)?;
        let mut circuit = circuit.write().unwrap_or_else(|e| e.into_inner());
        circuit.add_gate(gate)?;
        Ok(())
    }

    /// Append a measurement binding to a circuit.
    pub fn add_measurement(
        &self,
        circuit_id: CircuitId,
        qubit: QubitId,
        clbit: ClbitId,
    ) -> SchedResult<()> {
        let circuit = self.resolve_circuit(circuit_id)?;
        let mut circuit = circuit.write().unwrap_or_else(|e| e.into_inner());
        circuit.measure(qubit, clbit)?;
        Ok(())
    }

    /// Store a pre-built circuit, returning its id.
    pub fn insert_circuit(&self, circuit: Circuit) -> CircuitId {
        let mut circuits = self.circuits.write().unwrap_or_else(|e| e.into_inner());
        CircuitId(circuits.insert(Arc::new(RwLock::new(circuit))))
    }

    fn resolve_circuit(&self, id: CircuitId) -> SchedResult<Arc<RwLock<Circuit>>> {
        let circuits = self.circuits.read().unwrap_or_else(|e| e.into_inner());
        circuits
            .get(id.0)
            .cloned()
            .ok_or(SchedError::CircuitNotFound(id.0))
    }

    // =========================================================================
    // Job lifecycle
    // =========================================================================

    /// Submit a circuit for execution with a derived seed.
    pub async fn submit_job(
        &self,
        circuit_id: CircuitId,
        backend_id: BackendId,
        shots: u64,
    ) -> SchedResult<JobId> {
        let seed = self
            .config
            .seed
            .wrapping_add(self.seed_counter.fetch_add(1, Ordering::Relaxed));
        self.submit_inner(circuit_id, backend_id, shots, None, seed)
            .await
    }

    /// Submit with an explicit PRNG seed for reproducible runs.
    pub async fn submit_job_with_seed(
        &self,
        circuit_id: CircuitId,
        backend_id: BackendId,
        shots: u64,
        seed: u64,
    ) -> SchedResult<JobId> {
        self.submit_inner(circuit_id, backend_id, shots, None, seed)
            .await
    }

    /// Submit with a wait deadline, honored by [`Executor::wait`].
    pub async fn submit_job_with_timeout(
        &self,
        circuit_id: CircuitId,
        backend_id: BackendId,
        shots: u64,
        timeout: Duration,
    ) -> SchedResult<JobId> {
        let seed = self
            .config
            .seed
            .wrapping_add(self.seed_counter.fetch_add(1, Ordering::Relaxed));
        self.submit_inner(circuit_id, backend_id, shots, Some(timeout), seed)
            .await
    }

    async fn submit_inner(
        &self,
        circuit_id: CircuitId,
        backend_id: BackendId,
        shots: u64,
        timeout: Option<Duration>,
        seed: u64,
    ) -> SchedResult<JobId> {
        // Validate everything before creating any state; a rejected
        // submission leaves no job behind.
        let circuit = {
            let handle = self.resolve_circuit(circuit_id)?;
            let guard = handle.read().unwrap_or_else(|e| e.into_inner());
            guard.clone()
        };
        if circuit.num_qubits() == 0 {
            return Err(SchedError::Ir(IrError::ZeroQubits));
        }
        // The engine cap bounds the job's histogram too (2^n buckets), so
        // it is enforced here even when a backend advertises more qubits.
        if circuit.num_qubits() > MAX_QUBITS {
            return Err(SchedError::Hal(HalError::CapacityExceeded(format!(
                "circuit has {} qubits but the engine supports at most {}",
                circuit.num_qubits(),
                MAX_QUBITS
            ))));
        }

        let backend = self.registry.resolve(backend_id)?;
        let caps = backend.capabilities();
        if shots == 0 {
            return Err(SchedError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > caps.max_shots {
            return Err(SchedError::Hal(HalError::CapacityExceeded(format!(
                "{} shots exceeds backend limit {}",
                shots, caps.max_shots
            ))));
        }
        if circuit.num_qubits() > caps.max_qubits {
            return Err(SchedError::Hal(HalError::CapacityExceeded(format!(
                "circuit has {} qubits but backend '{}' supports {}",
                circuit.num_qubits(),
                backend.name(),
                caps.max_qubits
            ))));
        }
        if self.config.noise.enabled && !caps.supports_noise {
            return Err(SchedError::Hal(HalError::Unsupported(format!(
                "backend '{}' does not support noise models",
                backend.name()
            ))));
        }
        if circuit.has_custom_gates() && !caps.supports_custom_gates {
            return Err(SchedError::Hal(HalError::Unsupported(format!(
                "backend '{}' does not support custom gates",
                backend.name()
            ))));
        }

        let job = Job::new(circuit, backend_id, shots, timeout, self.config.noise, seed);
        let id = self.jobs.insert(job);

        let tx = self.tx.as_ref().ok_or(SchedError::Shutdown)?;
        if tx.send(id).await.is_err() {
            self.jobs.discard(id);
            return Err(SchedError::Shutdown);
        }
        debug!(job = %id, backend = %backend_id, shots, "job submitted");
        Ok(id)
    }

    /// Lifecycle state of a job.
    pub fn job_status(&self, id: JobId) -> SchedResult<JobState> {
        self.jobs.with_job(id, |j| j.state)
    }

    /// Failure message of a job, `None` unless it failed.
    pub fn job_error(&self, id: JobId) -> SchedResult<Option<String>> {
        self.jobs.with_job(id, |j| j.error.clone())
    }

    /// The measurement histogram of a completed job.
    pub fn job_counts(&self, id: JobId) -> SchedResult<Vec<u64>> {
        self.jobs.with_job(id, |j| match j.state {
            JobState::Completed => Ok(j.counts.clone()),
            state => Err(SchedError::InvalidJobState {
                expected: JobState::Completed.name().to_string(),
                found: state.name().to_string(),
            }),
        })?
    }

    /// Copy a completed job's histogram into a caller-supplied buffer.
    ///
    /// The buffer must hold at least `2^num_qubits` buckets; surplus
    /// buckets are zeroed.
    pub fn copy_job_counts(&self, id: JobId, buf: &mut [u64]) -> SchedResult<usize> {
        self.jobs.with_job(id, |j| {
            if j.state != JobState::Completed {
                return Err(SchedError::InvalidJobState {
                    expected: JobState::Completed.name().to_string(),
                    found: j.state.name().to_string(),
                });
            }
            if buf.len() < j.counts.len() {
                return Err(SchedError::HistogramTooSmall {
                    needed: j.counts.len(),
                    got: buf.len(),
                });
            }
            buf[..j.counts.len()].copy_from_slice(&j.counts);
            buf[j.counts.len()..].iter_mut().for_each(|c| *c = 0);
            Ok(j.counts.len())
        })?
    }

    /// Final amplitudes of a completed job, when the backend exposes them.
    pub fn job_final_state(&self, id: JobId) -> SchedResult<Option<Vec<Complex64>>> {
        self.jobs.with_job(id, |j| match j.state {
            JobState::Completed => Ok(j.final_state.clone()),
            state => Err(SchedError::InvalidJobState {
                expected: JobState::Completed.name().to_string(),
                found: state.name().to_string(),
            }),
        })?
    }

    /// Cancel a job that has not started executing.
    pub fn cancel(&self, id: JobId) -> SchedResult<()> {
        self.jobs.cancel(id)
    }

    /// Wait for a job to reach a terminal state.
    ///
    /// Honors the job's submission timeout when one was set; on expiry the
    /// job keeps running but the wait returns [`SchedError::Timeout`].
    pub async fn wait(&self, id: JobId) -> SchedResult<JobState> {
        let timeout = self.jobs.with_job(id, |j| j.timeout)?;
        match timeout {
            Some(limit) => tokio::time::timeout(limit, self.wait_terminal(id))
                .await
                .map_err(|_| SchedError::Timeout(id.0))?,
            None => self.wait_terminal(id).await,
        }
    }

    async fn wait_terminal(&self, id: JobId) -> SchedResult<JobState> {
        loop {
            // Subscribe before checking so a wakeup between the check and
            // the await is not lost.
            let notified = self.jobs.change_notify().notified();
            let state = self.jobs.with_job(id, |j| j.state)?;
            if state.is_terminal() {
                return Ok(state);
            }
            notified.await;
        }
    }
}

async fn worker_loop(
    worker: usize,
    rx: Arc<tokio::sync::Mutex<mpsc::Receiver<JobId>>>,
    jobs: Arc<JobTable>,
    registry: Arc<BackendRegistry>,
) {
    loop {
        let id = { rx.lock().await.recv().await };
        let Some(id) = id else { break };

        // A cancelled job is still in the queue; the claim simply misses.
        let Some(claimed) = jobs.claim(id) else {
            continue;
        };
        let backend = match registry.resolve(claimed.backend_id) {
            Ok(backend) => backend,
            Err(e) => {
                jobs.fail(id, e.to_string());
                continue;
            }
        };

        let result = tokio::task::spawn_blocking(move || {
            backend.execute(&claimed.circuit, claimed.shots, &claimed.noise, claimed.seed)
        })
        .await;

        match result {
            Ok(Ok(outcome)) => jobs.complete(id, outcome),
            Ok(Err(e)) => jobs.fail(id, e.to_string()),
            Err(e) => {
                warn!(worker, job = %id, "execution task aborted: {e}");
                jobs.fail(id, format!("execution task aborted: {e}"));
            }
        }
    }
    debug!(worker, "worker exiting");
}
