//! Control and parity-control cells.

use quirk_ir::{Axis, StandardGate};

use crate::registry::{CellKind, CellMaker};

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    let control = |id: &str, basis_change: Option<StandardGate>| {
        CellMaker::new(id, 1, CellKind::Control { basis_change })
    };
    out.push(control("•", None));
    out.push(control("◦", Some(StandardGate::X)));
    out.push(control("⊕", Some(Axis::Y.pow(0.5))));
    out.push(control("⊖", Some(Axis::Y.pow(-0.5))));
    out.push(control("⊗", Some(Axis::X.pow(-0.5))));
    out.push(control("(/)", Some(Axis::X.pow(0.5))));

    let parity = |id: &str, basis_change: Option<StandardGate>| {
        CellMaker::new(id, 1, CellKind::ParityControl { basis_change })
    };
    out.push(parity("xpar", Some(Axis::Y.pow(0.5))));
    out.push(parity("ypar", Some(Axis::X.pow(-0.5))));
    out.push(parity("zpar", None));
}
