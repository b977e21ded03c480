//! Operations combining gates with their target and control qubits.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::{Gate, StandardGate};
use crate::qubit::QubitId;

/// The kind of operation in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationKind {
    /// A quantum gate.
    Gate(Gate),
    /// Computational basis measurement.
    Measure,
    /// Multiplies the state by a unit-modulus scalar.
    ///
    /// Acts on no qubits of its own; once controlled it becomes a phase on
    /// the control qubits.
    GlobalPhase(Complex64),
}

/// A complete operation with operands.
///
/// Every operation fires only when all `controls` are in `|1⟩`. Other control
/// conditions are expressed with basis changes around the operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The kind of operation.
    pub kind: OperationKind,
    /// Qubits this operation acts on.
    pub qubits: Vec<QubitId>,
    /// Positive control qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<QubitId>,
}

impl Operation {
    /// Create a gate operation.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: OperationKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            controls: vec![],
        }
    }

    /// Create a single-qubit gate operation.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a CNOT.
    pub fn cx(control: QubitId, target: QubitId) -> Self {
        Self::single_qubit_gate(StandardGate::X, target).controlled_by([control])
    }

    /// Create a measurement operation.
    pub fn measure(qubit: QubitId) -> Self {
        Self {
            kind: OperationKind::Measure,
            qubits: vec![qubit],
            controls: vec![],
        }
    }

    /// Create a global phase operation.
    pub fn global_phase(phase: Complex64) -> Self {
        Self {
            kind: OperationKind::GlobalPhase(phase),
            qubits: vec![],
            controls: vec![],
        }
    }

    /// Add control qubits to this operation.
    #[must_use]
    pub fn controlled_by(mut self, controls: impl IntoIterator<Item = QubitId>) -> Self {
        self.controls.extend(controls);
        self
    }

    /// Relabel every qubit (targets and controls) through `f`.
    #[must_use]
    pub fn map_qubits(&self, f: impl Fn(QubitId) -> QubitId) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self.qubits.iter().map(|&q| f(q)).collect(),
            controls: self.controls.iter().map(|&q| f(q)).collect(),
        }
    }

    /// The inverse operation.
    ///
    /// Measurements have no inverse and are returned unchanged.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let kind = match &self.kind {
            OperationKind::Gate(g) => OperationKind::Gate(g.inverse()),
            OperationKind::Measure => OperationKind::Measure,
            OperationKind::GlobalPhase(phase) => OperationKind::GlobalPhase(phase.conj()),
        };
        Self {
            kind,
            qubits: self.qubits.clone(),
            controls: self.controls.clone(),
        }
    }

    /// Bind a symbol in this operation's parameters.
    #[must_use]
    pub fn bind_parameter(&self, name: &str, value: f64) -> Self {
        match &self.kind {
            OperationKind::Gate(g) => Self {
                kind: OperationKind::Gate(Gate {
                    kind: g.kind.bind(name, value),
                    label: g.label.clone(),
                }),
                qubits: self.qubits.clone(),
                controls: self.controls.clone(),
            },
            _ => self.clone(),
        }
    }

    /// Check if this is a gate operation.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, OperationKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, OperationKind::Measure)
    }

    /// Check if this is a global phase.
    pub fn is_global_phase(&self) -> bool {
        matches!(self.kind, OperationKind::GlobalPhase(_))
    }

    /// Check if this operation has any control qubits.
    pub fn is_controlled(&self) -> bool {
        !self.controls.is_empty()
    }

    /// Check if this operation still depends on a free symbol.
    pub fn is_parameterized(&self) -> bool {
        self.as_gate().is_some_and(|g| g.kind.is_parameterized())
    }

    /// Get the gate if this is a gate operation.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            OperationKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the standard gate if this is a standard gate operation.
    pub fn as_standard_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            OperationKind::Gate(Gate {
                kind: crate::gate::GateKind::Standard(g),
                ..
            }) => Some(g),
            _ => None,
        }
    }

    /// Get the name of the operation.
    pub fn name(&self) -> &str {
        match &self.kind {
            OperationKind::Gate(g) => g.display_name(),
            OperationKind::Measure => "measure",
            OperationKind::GlobalPhase(_) => "global_phase",
        }
    }

    /// All qubits touched, targets first.
    pub fn all_qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().chain(self.controls.iter()).copied()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OperationKind::GlobalPhase(phase) => write!(f, "global_phase({phase})")?,
            _ => {
                write!(f, "{}", self.name())?;
                if let Some(p) = self.as_standard_gate().and_then(StandardGate::parameter) {
                    write!(f, "({p})")?;
                }
            }
        }
        for (i, q) in self.qubits.iter().enumerate() {
            write!(f, "{}{q}", if i == 0 { " " } else { ", " })?;
        }
        if !self.controls.is_empty() {
            write!(f, " ctrl")?;
            for (i, q) in self.controls.iter().enumerate() {
                write!(f, "{}{q}", if i == 0 { " " } else { ", " })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Axis;

    #[test]
    fn test_gate_operation() {
        let op = Operation::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(op.is_gate());
        assert!(!op.is_controlled());
        assert_eq!(op.name(), "h");
        assert_eq!(op.to_string(), "h q0");
    }

    #[test]
    fn test_cx_display() {
        let op = Operation::cx(QubitId(0), QubitId(1));
        assert_eq!(op.controls, vec![QubitId(0)]);
        assert_eq!(op.to_string(), "x q1 ctrl q0");
    }

    #[test]
    fn test_inverse_keeps_operands() {
        let op = Operation::single_qubit_gate(Axis::Y.pow(0.5), QubitId(2)).controlled_by([QubitId(0)]);
        let inv = op.inverse();
        assert_eq!(inv.qubits, op.qubits);
        assert_eq!(inv.controls, op.controls);
        assert_eq!(inv.as_standard_gate(), Some(&Axis::Y.pow(-0.5)));
    }

    #[test]
    fn test_global_phase_inverse() {
        let op = Operation::global_phase(Complex64::new(0.0, 1.0));
        assert!(op.qubits.is_empty());
        assert_eq!(op.inverse().kind, OperationKind::GlobalPhase(Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_map_qubits() {
        let op = Operation::cx(QubitId(0), QubitId(1)).map_qubits(|q| QubitId(q.0 + 3));
        assert_eq!(op.qubits, vec![QubitId(4)]);
        assert_eq!(op.controls, vec![QubitId(3)]);
    }
}
