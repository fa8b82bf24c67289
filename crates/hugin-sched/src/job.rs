//! Job types and the shared job table.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use num_complex::Complex64;
use tokio::sync::Notify;
use tracing::debug;

use hugin_hal::{BackendId, ExecutionOutcome};
use hugin_ir::{Circuit, NoiseModel};

use crate::arena::{Arena, ArenaId};
use crate::error::{SchedError, SchedResult};

/// Unique identifier for a circuit held by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CircuitId(pub ArenaId);

impl std::fmt::Display for CircuitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "circuit-{}", self.0)
    }
}

/// Unique identifier for a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub ArenaId);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Lifecycle state of a job.
///
/// Transitions are strictly forward: `Submitted → Running → Completed` or
/// `Failed`; `Submitted → Failed` on cancellation. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Queued, waiting for a worker.
    Submitted,
    /// Claimed by a worker and executing.
    Running,
    /// Finished; histogram and final state are readable.
    Completed,
    /// Execution failed or the job was cancelled; see the error message.
    Failed,
}

impl JobState {
    /// Whether the job will never change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }

    /// Human-readable state name.
    pub fn name(&self) -> &'static str {
        match self {
            JobState::Submitted => "Submitted",
            JobState::Running => "Running",
            JobState::Completed => "Completed",
            JobState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A submitted execution request and everything needed to run it.
///
/// The circuit and noise model are snapshots taken at submission; editing
/// the source circuit afterwards does not affect a queued job.
pub struct Job {
    /// Snapshot of the circuit to execute.
    pub circuit: Circuit,
    /// The backend this job runs on.
    pub backend_id: BackendId,
    /// Number of measurement shots.
    pub shots: u64,
    /// Optional wait deadline, honored by `Executor::wait`.
    pub timeout: Option<Duration>,
    /// Lifecycle state.
    pub state: JobState,
    /// Measurement histogram, `2^num_qubits` buckets allocated at submission.
    pub counts: Vec<u64>,
    /// Final amplitudes, populated by statevector backends on completion.
    pub final_state: Option<Vec<Complex64>>,
    /// Failure message, set iff `state == Failed`.
    pub error: Option<String>,
    /// PRNG seed driving noise and sampling.
    pub seed: u64,
    /// Noise model snapshot.
    pub noise: NoiseModel,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// When a worker claimed the job.
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a freshly submitted job.
    pub fn new(
        circuit: Circuit,
        backend_id: BackendId,
        shots: u64,
        timeout: Option<Duration>,
        noise: NoiseModel,
        seed: u64,
    ) -> Self {
        let buckets = 1usize << circuit.num_qubits();
        Self {
            circuit,
            backend_id,
            shots,
            timeout,
            state: JobState::Submitted,
            counts: vec![0; buckets],
            final_state: None,
            error: None,
            seed,
            noise,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }
}

/// The shared job table.
///
/// All state transitions happen under the table mutex; the mutex is never
/// held across execution. Terminal transitions wake every waiter through
/// the [`Notify`], and waiters re-check state themselves.
pub struct JobTable {
    jobs: Mutex<Arena<Job>>,
    changed: Notify,
}

impl JobTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Arena::new()),
            changed: Notify::new(),
        }
    }

    /// Insert a freshly submitted job.
    pub fn insert(&self, job: Job) -> JobId {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        JobId(jobs.insert(job))
    }

    /// Remove a job that could not be queued.
    pub(crate) fn discard(&self, id: JobId) {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        jobs.remove(id.0);
    }

    /// Atomically claim a job for execution (`Submitted → Running`).
    ///
    /// Returns the data a worker needs, or `None` if the job is gone or
    /// already claimed, cancelled, or finished. At most one caller ever
    /// receives `Some` for a given job.
    pub fn claim(&self, id: JobId) -> Option<ClaimedJob> {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        let job = jobs.get_mut(id.0)?;
        if job.state != JobState::Submitted {
            return None;
        }
        job.state = JobState::Running;
        job.started_at = Some(Utc::now());
        debug!(job = %id, "claimed job");
        Some(ClaimedJob {
            circuit: job.circuit.clone(),
            backend_id: job.backend_id,
            shots: job.shots,
            noise: job.noise,
            seed: job.seed,
        })
    }

    /// Record a successful execution (`Running → Completed`).
    pub fn complete(&self, id: JobId, outcome: ExecutionOutcome) {
        {
            let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(job) = jobs.get_mut(id.0) {
                job.counts = outcome.counts;
                job.final_state = outcome.final_state;
                job.state = JobState::Completed;
                job.finished_at = Some(Utc::now());
                debug!(job = %id, elapsed_ms = outcome.elapsed_ms, "job completed");
            }
        }
        self.changed.notify_waiters();
    }

    /// Record a failed execution (`Running → Failed`). The histogram is
    /// discarded.
    pub fn fail(&self, id: JobId, message: impl Into<String>) {
        let message = message.into();
        {
            let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(job) = jobs.get_mut(id.0) {
                job.counts.iter_mut().for_each(|c| *c = 0);
                job.final_state = None;
                job.error = Some(message.clone());
                job.state = JobState::Failed;
                job.finished_at = Some(Utc::now());
                debug!(job = %id, error = %message, "job failed");
            }
        }
        self.changed.notify_waiters();
    }

    /// Cancel a job that has not started (`Submitted → Failed`).
    pub fn cancel(&self, id: JobId) -> SchedResult<()> {
        let result = {
            let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
            let job = jobs.get_mut(id.0).ok_or(SchedError::JobNotFound(id.0))?;
            if job.state != JobState::Submitted {
                return Err(SchedError::InvalidJobState {
                    expected: JobState::Submitted.name().to_string(),
                    found: job.state.name().to_string(),
                });
            }
            job.state = JobState::Failed;
            job.error = Some("cancelled before execution".to_string());
            job.finished_at = Some(Utc::now());
            debug!(job = %id, "job cancelled");
            Ok(())
        };
        self.changed.notify_waiters();
        result
    }

    /// Read a job field under the table lock.
    pub fn with_job<T>(&self, id: JobId, f: impl FnOnce(&Job) -> T) -> SchedResult<T> {
        let jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        let job = jobs.get(id.0).ok_or(SchedError::JobNotFound(id.0))?;
        Ok(f(job))
    }

    /// Subscribe to the change notifier before re-checking state.
    pub(crate) fn change_notify(&self) -> &Notify {
        &self.changed
    }
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The job-local data a worker executes with, copied out under the claim.
pub struct ClaimedJob {
    /// Circuit snapshot.
    pub circuit: Circuit,
    /// Resolved at execution time against the registry.
    pub backend_id: BackendId,
    /// Shot count.
    pub shots: u64,
    /// Noise model snapshot.
    pub noise: NoiseModel,
    /// PRNG seed.
    pub seed: u64,
}
