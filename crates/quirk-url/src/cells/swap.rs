//! Swap cells. Pairing happens in the column compiler.

use crate::registry::{CellKind, CellMaker};

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    out.push(CellMaker::new("Swap", 1, CellKind::Swap));
}
