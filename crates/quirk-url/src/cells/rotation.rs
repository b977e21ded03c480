//! Single-qubit rotation cells: fixed, time-dependent and formula-driven.

use quirk_ir::{Axis, Operation, ParameterExpression, QubitId, StandardGate};
use serde_json::Value;

use crate::error::QuirkResult;
use crate::formula::parse_formula;
use crate::registry::{CellKind, CellMaker};

const AXES: [(&str, Axis); 3] = [("X", Axis::X), ("Y", Axis::Y), ("Z", Axis::Z)];

const FIXED_POWERS: [(&str, f64); 8] = [
    ("½", 1.0 / 2.0),
    ("⅓", 1.0 / 3.0),
    ("¼", 1.0 / 4.0),
    ("⅛", 1.0 / 8.0),
    ("⅟₁₆", 1.0 / 16.0),
    ("⅟₃₂", 1.0 / 32.0),
    ("⅟₆₄", 1.0 / 64.0),
    ("⅟₁₂₈", 1.0 / 128.0),
];

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    for (id, gate) in [
        ("H", StandardGate::H),
        ("X", StandardGate::X),
        ("Y", StandardGate::Y),
        ("Z", StandardGate::Z),
    ] {
        out.push(CellMaker::new(id, 1, CellKind::Gate(gate)));
    }

    for (name, axis) in AXES {
        for (glyph, power) in FIXED_POWERS {
            out.push(CellMaker::new(format!("{name}^{glyph}"), 1, CellKind::Gate(axis.pow(power))));
            out.push(CellMaker::new(
                format!("{name}^-{glyph}"),
                1,
                CellKind::Gate(axis.pow(-power)),
            ));
        }
    }

    let t = ParameterExpression::time;
    let two_pi_t = || ParameterExpression::constant(2.0) * ParameterExpression::pi() * t();
    for (name, axis) in AXES {
        out.push(CellMaker::new(format!("{name}^t"), 1, CellKind::Gate(axis.pow(t()))));
        out.push(CellMaker::new(format!("{name}^-t"), 1, CellKind::Gate(axis.pow(-t()))));
        out.push(CellMaker::new(format!("e^i{name}t"), 1, CellKind::Gate(axis.rotation(two_pi_t()))));
        out.push(CellMaker::new(
            format!("e^-i{name}t"),
            1,
            CellKind::Gate(axis.rotation(-two_pi_t())),
        ));
    }

    for (name, axis) in AXES {
        out.push(
            CellMaker::new(format!("{name}^ft"), 1, CellKind::FormulaGate { axis, rotation: false })
                .with_formula("sin(pi*t)"),
        );
        out.push(
            CellMaker::new(
                format!("R{}ft", name.to_lowercase()),
                1,
                CellKind::FormulaGate { axis, rotation: true },
            )
            .with_formula("pi*t*t"),
        );
    }
}

pub(crate) fn build_gate(gate: &StandardGate, qubit: QubitId) -> Vec<Operation> {
    vec![Operation::single_qubit_gate(gate.clone(), qubit)]
}

/// Build a formula gate from the token's argument.
pub(crate) fn build_formula_gate(
    axis: Axis,
    rotation: bool,
    arg: Option<&Value>,
    default: &str,
    qubit: QubitId,
) -> QuirkResult<Vec<Operation>> {
    let formula = parse_formula(arg, default)?;
    let gate = if rotation {
        axis.rotation(formula)
    } else {
        axis.pow(formula)
    };
    Ok(vec![Operation::single_qubit_gate(gate, qubit)])
}
