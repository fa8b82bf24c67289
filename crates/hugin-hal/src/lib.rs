//! Hardware abstraction layer for Hugin execution backends.
//!
//! This crate defines the seam between the scheduler and anything that can
//! run a circuit:
//!
//! - [`Backend`] — the synchronous execution trait
//! - [`Capabilities`] / [`BackendKind`] — what a backend can do
//! - [`BackendRegistry`] — the central backend table with validated
//!   registration and id-based resolution
//! - [`ExecutionOutcome`] — histogram, optional final state, and timing
//!
//! The scheduler resolves a [`BackendId`] to an `Arc<dyn Backend>` once per
//! job and calls [`Backend::execute`] on a blocking thread; nothing here is
//! async.

pub mod backend;
pub mod capability;
pub mod error;
pub mod registry;
pub mod result;

pub use backend::Backend;
pub use capability::{BackendKind, Capabilities};
pub use error::{HalError, HalResult};
pub use registry::{BackendId, BackendRegistry};
pub use result::ExecutionOutcome;
