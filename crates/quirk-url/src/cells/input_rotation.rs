//! Rotations whose angle is read from input register A.

use quirk_ir::{Axis, InputRegister, Operation, QubitId};

use crate::column::ColumnContext;
use crate::error::QuirkResult;
use crate::registry::{CellKind, CellMaker};

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    for (name, axis) in [("X", Axis::X), ("Y", Axis::Y), ("Z", Axis::Z)] {
        out.push(CellMaker::new(
            format!("{name}^(A/2^n)"),
            1,
            CellKind::InputRotation { axis, sign: 1.0 },
        ));
    }
    for (name, axis) in [("X", Axis::X), ("Y", Axis::Y), ("Z", Axis::Z)] {
        out.push(CellMaker::new(
            format!("{name}^(-A/2^n)"),
            1,
            CellKind::InputRotation { axis, sign: -1.0 },
        ));
    }
}

/// Raise the target to `sign * A / 2^n`, one controlled power per bit of A.
pub(crate) fn build_input_rotation(
    axis: Axis,
    sign: f64,
    identifier: &str,
    target: QubitId,
    ctx: &ColumnContext,
) -> QuirkResult<Vec<Operation>> {
    let a = ctx.require_input(InputRegister::A, identifier, &[target])?;
    let scale = sign / (1u64 << a.len()) as f64;
    Ok(a.iter()
        .enumerate()
        .map(|(k, &bit)| {
            let exponent = scale * (1u64 << k) as f64;
            Operation::single_qubit_gate(axis.pow(exponent), target).controlled_by([bit])
        })
        .collect())
}
