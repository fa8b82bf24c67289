//! Quantum gate types.
//!
//! Gates are a closed sum type: each variant carries exactly the parameters
//! its semantics require, so there is no way to read a parameter that does
//! not belong to the gate. Arity is validated when a [`Gate`] is constructed,
//! never at execution time.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Maximum number of target qubits a single gate may address.
pub const MAX_GATE_QUBITS: u32 = 4;

/// Standard gates with known semantics.
///
/// Rotation angles are concrete radians; this IR has no symbolic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate: diag(1, e^{iθ}).
    P(f64),
    /// U1(λ) — equivalent to the phase gate, kept as a distinct name.
    U1(f64),
    /// U2(φ, λ) single-qubit gate.
    U2(f64, f64),
    /// U3(θ, φ, λ) general single-qubit gate.
    U3(f64, f64, f64),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate: phase e^{iθ} on |11⟩.
    CP(f64),
    /// SWAP gate.
    Swap,
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::T => "t",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U1(_) => "u1",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U3(_, _, _) => "u3",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::T
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U1(_)
            | StandardGate::U2(_, _)
            | StandardGate::U3(_, _, _) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::CP(_) | StandardGate::Swap => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Get the rotation parameters of this gate, in declaration order.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::U1(t)
            | StandardGate::CP(t) => vec![*t],

            StandardGate::U2(a, b) => vec![*a, *b],
            StandardGate::U3(a, b, c) => vec![*a, *b, *c],

            _ => vec![],
        }
    }
}

/// A user-supplied unitary over up to [`MAX_GATE_QUBITS`] qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Dense unitary matrix, row-major, `2^n × 2^n`.
    pub matrix: Vec<Complex64>,
}

impl CustomGate {
    /// Create a new custom gate from a dense matrix.
    ///
    /// The matrix length must equal `(2^num_qubits)^2`; a mismatch is a
    /// construction-time error, never silently truncated or padded.
    pub fn new(
        name: impl Into<String>,
        num_qubits: u32,
        matrix: Vec<Complex64>,
    ) -> IrResult<Self> {
        let name = name.into();
        if num_qubits == 0 {
            return Err(IrError::ZeroQubits);
        }
        if num_qubits > MAX_GATE_QUBITS {
            return Err(IrError::ArityMismatch {
                gate_name: name,
                expected: MAX_GATE_QUBITS,
                got: num_qubits,
            });
        }
        let dim = 1usize << num_qubits;
        if matrix.len() != dim * dim {
            return Err(IrError::MatrixDimensionMismatch {
                gate_name: name,
                expected: dim * dim,
                got: matrix.len(),
                num_qubits,
            });
        }
        Ok(Self {
            name,
            num_qubits,
            matrix,
        })
    }
}

/// A gate kind, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-supplied unitary.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }
}

/// A gate bound to its target qubits.
///
/// Construction validates arity against the gate kind and rejects duplicate
/// targets; once built, a `Gate` is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    kind: GateKind,
    /// Target qubits, in operand order (e.g. control before target for CX).
    qubits: Vec<QubitId>,
}

impl Gate {
    /// Bind a gate kind to its target qubits.
    pub fn new(
        kind: impl Into<GateKind>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        let kind = kind.into();
        let qubits: Vec<QubitId> = qubits.into_iter().collect();

        let expected = kind.num_qubits();
        if qubits.len() as u32 != expected {
            return Err(IrError::ArityMismatch {
                gate_name: kind.name().to_string(),
                expected,
                got: qubits.len() as u32,
            });
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: kind.name().to_string(),
                });
            }
        }

        Ok(Self { kind, qubits })
    }

    /// The kind of gate.
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// The target qubits, in operand order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// The name of the gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// The number of qubits this gate operates on.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Whether this gate is a user-supplied unitary.
    pub fn is_custom(&self) -> bool {
        matches!(self.kind, GateKind::Custom(_))
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<CustomGate> for GateKind {
    fn from(gate: CustomGate) -> Self {
        GateKind::Custom(gate)
    }
}
