//! Ordered operation lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind, RegisterGate, StandardGate};
use crate::operation::{Operation, OperationKind};
use crate::qubit::QubitId;

/// A quantum circuit: operations applied in order.
///
/// Qubits are implicit; the circuit spans every qubit an operation touches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Operations in application order.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: vec![],
        }
    }

    /// Append an operation after validating its operands.
    pub fn push(&mut self, op: Operation) -> IrResult<&mut Self> {
        validate(&op)?;
        self.operations.push(op);
        Ok(self)
    }

    /// Append several operations.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Operation>) -> IrResult<&mut Self> {
        for op in ops {
            self.push(op)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Operation::cx(control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.push(Operation::gate(StandardGate::Swap, [q1, q2]))
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Operation::gate(gate, qubits))
    }

    /// Measure a qubit.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Operation::measure(qubit))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The operations in order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Consume the circuit, returning its operations.
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of qubits spanned: one more than the highest qubit touched.
    pub fn num_qubits(&self) -> usize {
        self.all_qubits()
            .last()
            .map_or(0, |q| q.index() + 1)
    }

    /// Every qubit touched by some operation, ascending.
    pub fn all_qubits(&self) -> BTreeSet<QubitId> {
        self.operations.iter().flat_map(Operation::all_qubits).collect()
    }

    /// Check if any operation still depends on a free symbol.
    pub fn is_parameterized(&self) -> bool {
        self.operations.iter().any(Operation::is_parameterized)
    }

    /// Bind a symbol in every operation, returning a new circuit.
    #[must_use]
    pub fn bind_parameter(&self, name: &str, value: f64) -> Self {
        Self {
            name: self.name.clone(),
            operations: self
                .operations
                .iter()
                .map(|op| op.bind_parameter(name, value))
                .collect(),
        }
    }

    // =========================================================================
    // Classical evaluation
    // =========================================================================

    /// Run the circuit on the computational basis state `state`.
    ///
    /// Bit `k` of `state` is the value of qubit `k`. Phases are discarded.
    /// Fails with [`IrError::NonClassicalOperation`] when an operation would
    /// create a superposition.
    pub fn apply_to_basis_state(&self, mut state: u64) -> IrResult<u64> {
        for op in &self.operations {
            for q in op.all_qubits() {
                if q.0 >= 64 {
                    return Err(IrError::QubitOutOfRange { qubit: q });
                }
            }
            if !op.controls.iter().all(|c| state >> c.0 & 1 == 1) {
                continue;
            }
            state = apply_classical(op, state)?;
        }
        Ok(state)
    }
}

fn apply_classical(op: &Operation, state: u64) -> IrResult<u64> {
    let non_classical = || IrError::NonClassicalOperation {
        name: op.name().to_string(),
    };
    let gate = match &op.kind {
        OperationKind::Measure | OperationKind::GlobalPhase(_) => return Ok(state),
        OperationKind::Gate(g) => g,
    };
    match &gate.kind {
        GateKind::Standard(StandardGate::Swap) => {
            let (a, b) = (op.qubits[0].0, op.qubits[1].0);
            let (va, vb) = (state >> a & 1, state >> b & 1);
            Ok(state & !(1 << a) & !(1 << b) | vb << a | va << b)
        }
        GateKind::Standard(g) => match g.basis_flip() {
            Some(true) => Ok(state ^ 1 << op.qubits[0].0),
            Some(false) => Ok(state),
            None => Err(non_classical()),
        },
        GateKind::Register(RegisterGate::PhaseGradient { .. }) => Ok(state),
        GateKind::Register(RegisterGate::Permutation { mapping }) => {
            let bits = gather(state, &op.qubits);
            let mut permuted = 0;
            for (i, &m) in mapping.iter().enumerate() {
                permuted |= (bits >> i & 1) << m;
            }
            Ok(scatter(state, &op.qubits, permuted))
        }
        GateKind::Arithmetic(g) => {
            let bits = gather(state, &op.qubits);
            Ok(scatter(state, &op.qubits, g.apply_to_bits(bits)))
        }
        GateKind::Register(RegisterGate::Qft { .. }) | GateKind::Custom(_) => Err(non_classical()),
    }
}

/// Pack the listed qubits of `state` into a little-endian word.
fn gather(state: u64, qubits: &[QubitId]) -> u64 {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (i, q)| acc | (state >> q.0 & 1) << i)
}

/// Write the bits of `value` back onto the listed qubits of `state`.
fn scatter(state: u64, qubits: &[QubitId], value: u64) -> u64 {
    qubits.iter().enumerate().fold(state, |acc, (i, q)| {
        (acc & !(1 << q.0)) | (value >> i & 1) << q.0
    })
}

fn validate(op: &Operation) -> IrResult<()> {
    if let OperationKind::Gate(gate) = &op.kind {
        let expected = gate.num_qubits();
        let got = op.qubits.len() as u32;
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.display_name().to_string(),
                expected,
                got,
            });
        }
    }
    let mut seen = BTreeSet::new();
    for q in op.all_qubits() {
        if !seen.insert(q) {
            return Err(IrError::DuplicateQubit {
                qubit: q,
                gate_name: Some(op.name().to_string()),
            });
        }
    }
    Ok(())
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "{i:>4}: {op}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::{ArithmeticGate, ArithmeticOp};
    use crate::gate::Axis;
    use crate::parameter::ParameterExpression;

    #[test]
    fn test_fluent_builder() {
        let mut circuit = Circuit::new("bell");
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.name(), "bell");
    }

    #[test]
    fn test_qubit_count_checked() {
        let mut circuit = Circuit::default();
        let err = circuit
            .push(Operation::gate(StandardGate::Swap, [QubitId(0)]))
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut circuit = Circuit::default();
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(1), .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_controlled_x_on_basis_states() {
        let mut circuit = Circuit::default();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        assert_eq!(circuit.apply_to_basis_state(0b00).unwrap(), 0b00);
        assert_eq!(circuit.apply_to_basis_state(0b01).unwrap(), 0b11);
        assert_eq!(circuit.apply_to_basis_state(0b11).unwrap(), 0b01);
    }

    #[test]
    fn test_swap_and_permutation() {
        let mut circuit = Circuit::default();
        circuit.swap(QubitId(0), QubitId(2)).unwrap();
        assert_eq!(circuit.apply_to_basis_state(0b001).unwrap(), 0b100);

        let mut rot = Circuit::default();
        rot.gate(
            RegisterGate::Permutation {
                mapping: vec![1, 2, 0],
            },
            QubitId::range(0, 3),
        )
        .unwrap();
        assert_eq!(rot.apply_to_basis_state(0b001).unwrap(), 0b010);
        assert_eq!(rot.apply_to_basis_state(0b100).unwrap(), 0b001);
    }

    #[test]
    fn test_arithmetic_on_offset_register() {
        let mut circuit = Circuit::default();
        circuit
            .gate(
                ArithmeticGate::new(ArithmeticOp::Increment, 2, vec![]),
                [QubitId(3), QubitId(4)],
            )
            .unwrap();
        assert_eq!(circuit.apply_to_basis_state(0b01_000).unwrap(), 0b10_000);
        assert_eq!(circuit.apply_to_basis_state(0b11_101).unwrap(), 0b00_101);
    }

    #[test]
    fn test_superposition_is_not_classical() {
        let mut circuit = Circuit::default();
        circuit.h(QubitId(0)).unwrap();
        assert!(matches!(
            circuit.apply_to_basis_state(0),
            Err(IrError::NonClassicalOperation { .. })
        ));
    }

    #[test]
    fn test_bind_parameter() {
        let mut circuit = Circuit::default();
        circuit
            .gate(Axis::X.pow(ParameterExpression::time()), [QubitId(0)])
            .unwrap();
        assert!(circuit.is_parameterized());
        let bound = circuit.bind_parameter("t", 1.0);
        assert!(!bound.is_parameterized());
        assert_eq!(bound.apply_to_basis_state(0).unwrap(), 1);
    }

    #[test]
    fn test_display_lists_operations() {
        let mut circuit = Circuit::default();
        circuit.h(QubitId(0)).unwrap().measure(QubitId(0)).unwrap();
        assert_eq!(circuit.to_string(), "   0: h q0\n   1: measure q0\n");
    }

    #[test]
    fn test_serializes_controls_only_when_present() {
        let mut circuit = Circuit::default();
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let json = serde_json::to_value(circuit.operations()).unwrap();
        assert!(json[0].get("controls").is_none());
        assert_eq!(json[1]["controls"], serde_json::json!([0]));
    }
}
