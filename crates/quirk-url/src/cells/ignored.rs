//! Display cells. They show state in the editor and have no effect.

use super::sized_family;
use crate::registry::{CellKind, CellMaker};

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    sized_family(out, "Amps", 1..=16, |_| CellKind::Ignored);
    out.push(CellMaker::new("Chance", 1, CellKind::Ignored));
    sized_family(out, "Chance", 2..=16, |_| CellKind::Ignored);
    sized_family(out, "Sample", 1..=16, |_| CellKind::Ignored);
    out.push(CellMaker::new("Density", 1, CellKind::Ignored));
    sized_family(out, "Density", 1..=8, |_| CellKind::Ignored);
    out.push(CellMaker::new("Bloch", 1, CellKind::Ignored));
}
