//! Append-only circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, Gate, GateKind, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit: an ordered gate log plus measurement bindings.
///
/// Insertion order is execution order and is never reordered by the system.
/// Circuits are mutated only through the append operations; gates and
/// measurements are permanent once accepted. Every qubit and classical-bit
/// index is validated by the call that introduces it, so execution never
/// encounters an out-of-range reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Gates in execution order.
    gates: Vec<Gate>,
    /// Measurement bindings (qubit, classical bit) in declaration order.
    measurements: Vec<(QubitId, ClbitId)>,
}

impl Circuit {
    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            gates: vec![],
            measurements: vec![],
        }
    }

    /// Append a gate, validating its target qubits against this circuit.
    pub fn add_gate(&mut self, gate: Gate) -> IrResult<&mut Self> {
        for q in gate.qubits() {
            if q.0 >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: *q,
                    num_qubits: self.num_qubits,
                });
            }
        }
        self.gates.push(gate);
        Ok(self)
    }

    /// Append a standard gate by kind and targets.
    pub fn add_standard(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let gate = Gate::new(gate, qubits)?;
        self.add_gate(gate)
    }

    /// Append a custom-matrix gate.
    pub fn add_custom(
        &mut self,
        gate: CustomGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let gate = Gate::new(GateKind::Custom(gate), qubits)?;
        self.add_gate(gate)
    }

    /// Append a measurement binding.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        if clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitOutOfRange {
                clbit,
                num_clbits: self.num_clbits,
            });
        }
        self.measurements.push((qubit, clbit));
        Ok(self)
    }

    /// Measure every qubit into the classical bit of the same index.
    ///
    /// Requires `num_clbits >= num_qubits`.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for i in 0..self.num_qubits {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::S, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::T, [qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::Rx(theta), [qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::Ry(theta), [qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::Rz(theta), [qubit])
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::P(theta), [qubit])
    }

    /// Apply U3 gate.
    pub fn u3(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::U3(theta, phi, lambda), [qubit])
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::CZ, [control, target])
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::CP(theta), [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::Swap, [q1, q2])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::CCX, [c1, c2, target])
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.add_standard(StandardGate::CSwap, [control, t1, t2])
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Get the gates in execution order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get the measurement bindings in declaration order.
    pub fn measurements(&self) -> &[(QubitId, ClbitId)] {
        &self.measurements
    }

    /// Whether any gate in the circuit is a user-supplied unitary.
    pub fn has_custom_gates(&self) -> bool {
        self.gates.iter().any(Gate::is_custom)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure(QubitId(0), ClbitId(0))?
            .measure(QubitId(1), ClbitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit over `n` qubits.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Err(IrError::ZeroQubits);
        }
        let mut circuit = Self::with_size("ghz", n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert!(circuit.gates().is_empty());
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.gates().len(), 2);
        assert_eq!(circuit.measurements().len(), 2);
    }

    #[test]
    fn test_qubit_index_validation() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        let err = circuit.h(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { qubit: QubitId(2), num_qubits: 2 }));
        // The failed append left nothing behind.
        assert!(circuit.gates().is_empty());
    }

    #[test]
    fn test_clbit_index_validation() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        let err = circuit.measure(QubitId(0), ClbitId(1)).unwrap_err();
        assert!(matches!(err, IrError::ClbitOutOfRange { clbit: ClbitId(1), num_clbits: 1 }));
        assert!(circuit.measurements().is_empty());
    }

    #[test]
    fn test_arity_rejected_at_add_time() {
        // Wrong arity never reaches the gate log.
        let gate = Gate::new(StandardGate::CX, [QubitId(0)]);
        assert!(gate.is_err());
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.gates().len(), 2);
        assert_eq!(circuit.measurements().len(), 2);
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.gates().len(), 5); // H + 4 CX
        assert_eq!(circuit.measurements().len(), 5);
        assert!(Circuit::ghz(0).is_err());
    }

    #[test]
    fn test_has_custom_gates() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        assert!(!circuit.has_custom_gates());

        let eye = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        ];
        let custom = CustomGate::new("eye", 1, eye).unwrap();
        circuit.add_custom(custom, [QubitId(0)]).unwrap();
        assert!(circuit.has_custom_gates());
    }

    #[test]
    fn test_append_order_preserved() {
        let mut circuit = Circuit::with_size("ordered", 1, 0);
        circuit.x(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.z(QubitId(0)).unwrap();

        let names: Vec<_> = circuit.gates().iter().map(Gate::name).collect();
        assert_eq!(names, vec!["x", "h", "z"]);
    }
}
