//! Local statevector simulator backend.
//!
//! Implements the [`hugin_hal::Backend`] trait on top of the
//! [`hugin_engine`] statevector core. Three constructors cover the common
//! configurations:
//!
//! ```
//! use hugin_adapter_sim::SimulatorBackend;
//!
//! let ideal = SimulatorBackend::statevector(24);
//! let sampler = SimulatorBackend::sampling(24);
//! let noisy = SimulatorBackend::noisy(16, 0.995, 0.98);
//! ```

pub mod simulator;

pub use simulator::SimulatorBackend;
