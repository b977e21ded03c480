//! Measurement cells.

use quirk_ir::{Axis, Operation, QubitId, StandardGate};

use crate::registry::{CellKind, CellMaker};

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    let measure = |id: &str, basis_change: Option<StandardGate>| {
        CellMaker::new(id, 1, CellKind::Measurement { basis_change })
    };
    out.push(measure("Measure", None));
    out.push(measure("ZDetector", None));
    out.push(measure("YDetector", Some(Axis::X.pow(-0.5))));
    out.push(measure("XDetector", Some(StandardGate::H)));
}

/// Measure `qubit`, rotating into and back out of the measured basis.
pub(crate) fn build_measurement(
    basis_change: Option<&StandardGate>,
    qubit: QubitId,
) -> Vec<Operation> {
    match basis_change {
        None => vec![Operation::measure(qubit)],
        Some(gate) => vec![
            Operation::single_qubit_gate(gate.clone(), qubit),
            Operation::measure(qubit),
            Operation::single_qubit_gate(gate.inverse(), qubit),
        ],
    }
}
