//! Backend registry.
//!
//! The [`BackendRegistry`] is the central table of execution backends.
//! Registration validates the backend's capability descriptor and hands back
//! an opaque [`BackendId`]; lookups are cheap clones of the shared handle.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::Backend;
use crate::error::{HalError, HalResult};

/// Opaque handle to a registered backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackendId(pub u32);

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "backend-{}", self.0)
    }
}

#[derive(Default)]
struct Inner {
    backends: Vec<Arc<dyn Backend>>,
    by_name: FxHashMap<String, BackendId>,
}

/// Central registry for execution backends.
///
/// Interior `RwLock`: registration is rare, resolution is hot, and a
/// resolved handle outlives any subsequent registrations.
#[derive(Default)]
pub struct BackendRegistry {
    inner: RwLock<Inner>,
}

impl BackendRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend, validating its capabilities.
    ///
    /// Rejects a zero qubit or shot budget, out-of-range fidelities, and
    /// duplicate names. On failure nothing is registered.
    pub fn register(&self, backend: Arc<dyn Backend>) -> HalResult<BackendId> {
        backend.capabilities().validate(backend.name())?;

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner.by_name.contains_key(backend.name()) {
            return Err(HalError::DuplicateBackend(backend.name().to_string()));
        }

        let id = BackendId(inner.backends.len() as u32);
        debug!(
            backend = backend.name(),
            kind = %backend.kind(),
            id = %id,
            "registered backend"
        );
        inner.by_name.insert(backend.name().to_string(), id);
        inner.backends.push(backend);
        Ok(id)
    }

    /// Resolve a backend id to its shared handle.
    pub fn resolve(&self, id: BackendId) -> HalResult<Arc<dyn Backend>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .backends
            .get(id.0 as usize)
            .cloned()
            .ok_or_else(|| HalError::BackendNotFound(id.to_string()))
    }

    /// Look up a backend id by name.
    pub fn find(&self, name: &str) -> HalResult<BackendId> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| HalError::BackendNotFound(name.to_string()))
    }

    /// List all registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<_> = inner.by_name.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .backends
            .len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capabilities;
    use crate::result::ExecutionOutcome;
    use hugin_ir::{Circuit, NoiseModel};

    struct StubBackend {
        name: String,
        caps: Capabilities,
    }

    impl StubBackend {
        fn new(name: &str, caps: Capabilities) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                caps,
            })
        }
    }

    impl Backend for StubBackend {
        fn name(&self) -> &str {
            &self.name
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        fn execute(
            &self,
            _circuit: &Circuit,
            shots: u64,
            _noise: &NoiseModel,
            _seed: u64,
        ) -> HalResult<ExecutionOutcome> {
            Ok(ExecutionOutcome {
                counts: vec![shots, 0],
                shots,
                final_state: None,
                elapsed_ms: 0,
            })
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = BackendRegistry::new();
        let id = registry
            .register(StubBackend::new("sv", Capabilities::statevector(8)))
            .unwrap();
        let backend = registry.resolve(id).unwrap();
        assert_eq!(backend.name(), "sv");
        assert_eq!(registry.find("sv").unwrap(), id);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let registry = BackendRegistry::new();
        registry
            .register(StubBackend::new("sv", Capabilities::statevector(8)))
            .unwrap();
        let err = registry
            .register(StubBackend::new("sv", Capabilities::sampling(8)))
            .unwrap_err();
        assert!(matches!(err, HalError::DuplicateBackend(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_capabilities_rejected() {
        let registry = BackendRegistry::new();
        let err = registry
            .register(StubBackend::new("bad", Capabilities::statevector(0)))
            .unwrap_err();
        assert!(matches!(err, HalError::InvalidCapabilities { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_id() {
        let registry = BackendRegistry::new();
        assert!(matches!(
            registry.resolve(BackendId(3)).unwrap_err(),
            HalError::BackendNotFound(_)
        ));
    }

    #[test]
    fn test_available_backends_sorted() {
        let registry = BackendRegistry::new();
        registry
            .register(StubBackend::new("zebra", Capabilities::statevector(4)))
            .unwrap();
        registry
            .register(StubBackend::new("alpha", Capabilities::sampling(4)))
            .unwrap();
        assert_eq!(registry.available_backends(), vec!["alpha", "zebra"]);
    }
}
