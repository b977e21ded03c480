//! Custom gates declared in the circuit's top-level `gates` list.

use quirk_ir::{CustomGate, Gate, Operation, QubitId};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::decoder::compile_columns;
use crate::error::{QuirkError, QuirkResult};
use crate::matrix::parse_matrix;
use crate::registry::{CellKind, CellMaker};

/// Custom cells by identifier. Consulted before the built-in registry.
pub(crate) type CustomGates = FxHashMap<String, CellMaker>;

/// The body of a custom gate.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomDefinition {
    /// A unitary given as matrix text.
    Matrix(CustomGate),
    /// A nested circuit, with qubits relative to the gate's top row.
    Circuit(Vec<Operation>),
}

/// Parse the `gates` entry of a circuit.
pub(crate) fn parse_custom_gates(value: Option<&Value>) -> QuirkResult<CustomGates> {
    let mut gates = CustomGates::default();
    let entries = match value {
        None | Some(Value::Null) => return Ok(gates),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(QuirkError::CustomGate {
                id: String::new(),
                reason: format!("gates must be a list, got {other}"),
            });
        }
    };

    for entry in entries {
        let maker = parse_custom_gate(entry, &gates)?;
        debug!(id = %maker.identifier, size = maker.size, "custom gate");
        if gates.contains_key(&maker.identifier) {
            return Err(QuirkError::CustomGate {
                id: maker.identifier,
                reason: "defined more than once".into(),
            });
        }
        gates.insert(maker.identifier.clone(), maker);
    }
    Ok(gates)
}

fn parse_custom_gate(entry: &Value, earlier: &CustomGates) -> QuirkResult<CellMaker> {
    let invalid = |id: &str, reason: &str| QuirkError::CustomGate {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    let Value::Object(map) = entry else {
        return Err(invalid("", "entry must be a dictionary"));
    };
    let Some(Value::String(id)) = map.get("id") else {
        return Err(invalid("", "missing string \"id\""));
    };

    match (map.get("matrix"), map.get("circuit")) {
        (Some(Value::String(text)), None) => {
            let matrix = parse_matrix(text)?;
            let dim = matrix.rows();
            if !matrix.is_square() || dim < 2 || !dim.is_power_of_two() {
                return Err(invalid(
                    id,
                    &format!("matrix must be square with a power-of-two size, got {dim}x{}", matrix.cols()),
                ));
            }
            let num_qubits = dim.trailing_zeros();
            let gate = CustomGate::new(id.clone(), num_qubits, matrix.into_data())?;
            Ok(CellMaker::new(
                id.clone(),
                num_qubits as usize,
                CellKind::Custom(CustomDefinition::Matrix(gate)),
            ))
        }
        (None, Some(circuit)) => {
            let Some(cols) = circuit.get("cols") else {
                return Err(invalid(id, "circuit must have a \"cols\" entry"));
            };
            let ops = compile_columns(cols, earlier)?;
            let size = ops
                .iter()
                .flat_map(|op| op.all_qubits())
                .map(|q| q.index() + 1)
                .max()
                .unwrap_or(1);
            Ok(CellMaker::new(
                id.clone(),
                size,
                CellKind::Custom(CustomDefinition::Circuit(ops)),
            ))
        }
        (Some(_), Some(_)) => Err(invalid(id, "has both a matrix and a circuit")),
        (Some(_), None) => Err(invalid(id, "matrix must be a string")),
        (None, None) => Err(invalid(id, "needs a matrix or a circuit")),
    }
}

/// Place a custom gate with its top row at `row`.
pub(crate) fn build_custom(definition: &CustomDefinition, row: usize) -> Vec<Operation> {
    match definition {
        CustomDefinition::Matrix(gate) => vec![Operation::gate(
            Gate::custom(gate.clone()),
            QubitId::range(row, gate.num_qubits as usize),
        )],
        CustomDefinition::Circuit(ops) => {
            let offset = row as u32;
            ops.iter()
                .map(|op| op.map_qubits(|q| QubitId(q.0 + offset)))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matrix_gate() {
        let gates = parse_custom_gates(Some(&json!([
            {"id": "~sy", "matrix": "{{0,-i},{i,0}}"}
        ])))
        .unwrap();
        let maker = &gates["~sy"];
        assert_eq!(maker.size, 1);
        let CellKind::Custom(definition) = &maker.kind else {
            panic!("not a custom cell");
        };
        let ops = build_custom(definition, 2);
        assert_eq!(ops[0].qubits, vec![QubitId(2)]);
        assert_eq!(ops[0].name(), "~sy");
    }

    #[test]
    fn test_circuit_gate_is_offset() {
        let gates = parse_custom_gates(Some(&json!([
            {"id": "~bell", "circuit": {"cols": [["H"], ["•", "X"]]}}
        ])))
        .unwrap();
        let maker = &gates["~bell"];
        assert_eq!(maker.size, 2);
        let CellKind::Custom(definition) = &maker.kind else {
            panic!("not a custom cell");
        };
        let ops = build_custom(definition, 3);
        assert_eq!(ops[0].qubits, vec![QubitId(3)]);
        assert_eq!(ops[1].qubits, vec![QubitId(4)]);
        assert_eq!(ops[1].controls, vec![QubitId(3)]);
    }

    #[test]
    fn test_later_gate_uses_earlier() {
        let gates = parse_custom_gates(Some(&json!([
            {"id": "~a", "matrix": "{{1,0},{0,-1}}"},
            {"id": "~b", "circuit": {"cols": [[1, "~a"]]}}
        ])))
        .unwrap();
        assert_eq!(gates["~b"].size, 2);
    }

    #[test]
    fn test_malformed_entries() {
        for bad in [
            json!("nope"),
            json!([{"matrix": "{{1}}"}]),
            json!([{"id": "~x"}]),
            json!([{"id": "~x", "matrix": "{{1,0,0},{0,1,0},{0,0,1}}"}]),
            json!([{"id": "~x", "matrix": "{{1}}"}]),
            json!([{"id": "~x", "matrix": 3}]),
            json!([{"id": "~x", "circuit": {}}]),
            json!([{"id": "~x", "matrix": "{{1,0},{0,1}}"}, {"id": "~x", "matrix": "{{1,0},{0,1}}"}]),
        ] {
            let err = parse_custom_gates(Some(&bad)).unwrap_err();
            assert!(err.to_string().contains("custom gate"), "{bad}: {err}");
        }
    }

    #[test]
    fn test_bad_matrix_text_propagates() {
        let err = parse_custom_gates(Some(&json!([{"id": "~x", "matrix": "[[1]]"}]))).unwrap_err();
        assert!(matches!(err, QuirkError::MatrixFormat(_)));
    }
}
