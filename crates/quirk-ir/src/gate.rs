//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::arithmetic::ArithmeticGate;
use crate::error::{IrError, IrResult};
use crate::parameter::ParameterExpression;

/// A Pauli axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The Pauli gate for this axis.
    pub fn pauli(self) -> StandardGate {
        match self {
            Axis::X => StandardGate::X,
            Axis::Y => StandardGate::Y,
            Axis::Z => StandardGate::Z,
        }
    }

    /// The Pauli gate raised to `exponent`.
    pub fn pow(self, exponent: impl Into<ParameterExpression>) -> StandardGate {
        let exponent = exponent.into();
        match self {
            Axis::X => StandardGate::XPow(exponent),
            Axis::Y => StandardGate::YPow(exponent),
            Axis::Z => StandardGate::ZPow(exponent),
        }
    }

    /// Rotation by `angle` radians around this axis.
    pub fn rotation(self, angle: impl Into<ParameterExpression>) -> StandardGate {
        let angle = angle.into();
        match self {
            Axis::X => StandardGate::Rx(angle),
            Axis::Y => StandardGate::Ry(angle),
            Axis::Z => StandardGate::Rz(angle),
        }
    }
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Pauli-X raised to a power (`X^1 = X`).
    XPow(ParameterExpression),
    /// Pauli-Y raised to a power.
    YPow(ParameterExpression),
    /// Pauli-Z raised to a power.
    ZPow(ParameterExpression),
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::XPow(_) => "xpow",
            StandardGate::YPow(_) => "ypow",
            StandardGate::ZPow(_) => "zpow",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// The exponent or angle of this gate, if it has one.
    pub fn parameter(&self) -> Option<&ParameterExpression> {
        match self {
            StandardGate::XPow(p)
            | StandardGate::YPow(p)
            | StandardGate::ZPow(p)
            | StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p) => Some(p),
            _ => None,
        }
    }

    /// Check if this gate has a symbolic parameter.
    pub fn is_parameterized(&self) -> bool {
        self.parameter().is_some_and(ParameterExpression::is_symbolic)
    }

    /// The inverse gate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            StandardGate::XPow(p) => StandardGate::XPow(p.negated()),
            StandardGate::YPow(p) => StandardGate::YPow(p.negated()),
            StandardGate::ZPow(p) => StandardGate::ZPow(p.negated()),
            StandardGate::Rx(p) => StandardGate::Rx(p.negated()),
            StandardGate::Ry(p) => StandardGate::Ry(p.negated()),
            StandardGate::Rz(p) => StandardGate::Rz(p.negated()),
            StandardGate::I
            | StandardGate::H
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::Swap => self.clone(),
        }
    }

    /// Bind a symbol in the gate's parameter.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        let bound = |p: &ParameterExpression| p.bind(name, value).simplify();
        match self {
            StandardGate::XPow(p) => StandardGate::XPow(bound(p)),
            StandardGate::YPow(p) => StandardGate::YPow(bound(p)),
            StandardGate::ZPow(p) => StandardGate::ZPow(bound(p)),
            StandardGate::Rx(p) => StandardGate::Rx(bound(p)),
            StandardGate::Ry(p) => StandardGate::Ry(bound(p)),
            StandardGate::Rz(p) => StandardGate::Rz(bound(p)),
            _ => self.clone(),
        }
    }

    /// How the gate acts on a computational basis state, ignoring phase.
    ///
    /// `Some(true)` flips the qubit, `Some(false)` leaves it unchanged and
    /// `None` means the gate creates superpositions. Only meaningful for
    /// single-qubit gates.
    pub fn basis_flip(&self) -> Option<bool> {
        match self {
            StandardGate::I | StandardGate::Z | StandardGate::ZPow(_) | StandardGate::Rz(_) => {
                Some(false)
            }
            StandardGate::X | StandardGate::Y => Some(true),
            StandardGate::XPow(p) | StandardGate::YPow(p) => {
                let v = p.as_f64()?;
                if v.fract() != 0.0 {
                    return None;
                }
                Some(v.rem_euclid(2.0) != 0.0)
            }
            StandardGate::H | StandardGate::Rx(_) | StandardGate::Ry(_) | StandardGate::Swap => {
                None
            }
        }
    }
}

/// Gates acting on a whole register of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegisterGate {
    /// Quantum Fourier transform over the register.
    Qft {
        num_qubits: u32,
        /// Whether this is the inverse transform.
        inverse: bool,
    },
    /// Phase gradient: phases `|k⟩` by `exp(iπ·exponent·k / 2^(n-1))`.
    PhaseGradient {
        num_qubits: u32,
        exponent: ParameterExpression,
    },
    /// Qubit permutation: the bit on qubit `i` moves to qubit `mapping[i]`.
    Permutation { mapping: Vec<u32> },
}

impl RegisterGate {
    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        match self {
            RegisterGate::Qft { inverse: false, .. } => "qft",
            RegisterGate::Qft { inverse: true, .. } => "qft_dg",
            RegisterGate::PhaseGradient { .. } => "phase_gradient",
            RegisterGate::Permutation { .. } => "permute",
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        match self {
            RegisterGate::Qft { num_qubits, .. } | RegisterGate::PhaseGradient { num_qubits, .. } => {
                *num_qubits
            }
            RegisterGate::Permutation { mapping } => mapping.len() as u32,
        }
    }

    /// The inverse gate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            RegisterGate::Qft {
                num_qubits,
                inverse,
            } => RegisterGate::Qft {
                num_qubits: *num_qubits,
                inverse: !inverse,
            },
            RegisterGate::PhaseGradient {
                num_qubits,
                exponent,
            } => RegisterGate::PhaseGradient {
                num_qubits: *num_qubits,
                exponent: exponent.negated(),
            },
            RegisterGate::Permutation { mapping } => {
                let mut inverse = vec![0; mapping.len()];
                for (i, &m) in mapping.iter().enumerate() {
                    inverse[m as usize] = i as u32;
                }
                RegisterGate::Permutation { mapping: inverse }
            }
        }
    }
}

/// A gate defined by an explicit unitary matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Unitary matrix (row-major, 2^n × 2^n).
    pub matrix: Vec<Complex64>,
}

impl CustomGate {
    /// Create a new matrix gate.
    ///
    /// Fails if `matrix.len()` is not `(2^num_qubits)^2`.
    pub fn new(name: impl Into<String>, num_qubits: u32, matrix: Vec<Complex64>) -> IrResult<Self> {
        let dim = 1usize << num_qubits;
        if matrix.len() != dim * dim {
            return Err(IrError::MatrixDimension {
                len: matrix.len(),
                num_qubits,
            });
        }
        Ok(Self {
            name: name.into(),
            num_qubits,
            matrix,
        })
    }

    /// The conjugate transpose of this gate.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        let dim = 1usize << self.num_qubits;
        let mut matrix = Vec::with_capacity(self.matrix.len());
        for row in 0..dim {
            for col in 0..dim {
                matrix.push(self.matrix[col * dim + row].conj());
            }
        }
        Self {
            name: format!("{}†", self.name),
            num_qubits: self.num_qubits,
            matrix,
        }
    }
}

/// A quantum gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A register-wide gate.
    Register(RegisterGate),
    /// A reversible arithmetic transform.
    Arithmetic(ArithmeticGate),
    /// A user-defined matrix gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Register(g) => g.name(),
            GateKind::Arithmetic(_) => "arithmetic",
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Register(g) => g.num_qubits(),
            GateKind::Arithmetic(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// The inverse gate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            GateKind::Standard(g) => GateKind::Standard(g.inverse()),
            GateKind::Register(g) => GateKind::Register(g.inverse()),
            GateKind::Arithmetic(g) => GateKind::Arithmetic(ArithmeticGate {
                op: g.op.inverse(),
                ..g.clone()
            }),
            GateKind::Custom(g) => GateKind::Custom(g.adjoint()),
        }
    }

    /// Bind a symbol in the gate's parameters.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            GateKind::Standard(g) => GateKind::Standard(g.bind(name, value)),
            GateKind::Register(RegisterGate::PhaseGradient {
                num_qubits,
                exponent,
            }) => GateKind::Register(RegisterGate::PhaseGradient {
                num_qubits: *num_qubits,
                exponent: exponent.bind(name, value).simplify(),
            }),
            _ => self.clone(),
        }
    }

    /// Check if this gate has a symbolic parameter.
    pub fn is_parameterized(&self) -> bool {
        match self {
            GateKind::Standard(g) => g.is_parameterized(),
            GateKind::Register(RegisterGate::PhaseGradient { exponent, .. }) => {
                exponent.is_symbolic()
            }
            _ => false,
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// The board identifier the gate came from, when it differs from the gate name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a new register gate.
    pub fn register(gate: RegisterGate) -> Self {
        Self {
            kind: GateKind::Register(gate),
            label: None,
        }
    }

    /// Create a new arithmetic gate.
    pub fn arithmetic(gate: ArithmeticGate) -> Self {
        Self {
            kind: GateKind::Arithmetic(gate),
            label: None,
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the label if set, else the name.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.name())
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The inverse gate, keeping the label.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            kind: self.kind.inverse(),
            label: self.label.clone(),
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<RegisterGate> for Gate {
    fn from(gate: RegisterGate) -> Self {
        Gate::register(gate)
    }
}

impl From<ArithmeticGate> for Gate {
    fn from(gate: ArithmeticGate) -> Self {
        Gate::arithmetic(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
