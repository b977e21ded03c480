//! Scalar cells: identity and global phases.

use num_complex::Complex64;
use quirk_ir::{Operation, QubitId, StandardGate};
use std::f64::consts::FRAC_PI_4;

use crate::registry::{CellKind, CellMaker};

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    out.push(CellMaker::new("…", 1, CellKind::Identity));
    out.push(CellMaker::new("NeGate", 1, CellKind::Scalar(Complex64::new(-1.0, 0.0))));
    out.push(CellMaker::new("i", 1, CellKind::Scalar(Complex64::i())));
    out.push(CellMaker::new("-i", 1, CellKind::Scalar(-Complex64::i())));
    out.push(CellMaker::new("√i", 1, CellKind::Scalar(Complex64::from_polar(1.0, FRAC_PI_4))));
    out.push(CellMaker::new(
        "√-i",
        1,
        CellKind::Scalar(Complex64::from_polar(1.0, -FRAC_PI_4)),
    ));
}

/// `None` builds the identity on `qubit`; `Some(phase)` a global phase.
pub(crate) fn build_scalar(phase: Option<Complex64>, qubit: QubitId) -> Vec<Operation> {
    match phase {
        None => vec![Operation::single_qubit_gate(StandardGate::I, qubit)],
        Some(phase) => vec![Operation::global_phase(phase)],
    }
}
