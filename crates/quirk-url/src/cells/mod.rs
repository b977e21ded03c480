//! Cell families.
//!
//! Each family module registers its identifiers and builds the operations
//! for its cells. Families are enumerated in a fixed order; the first
//! registration of an identifier wins.

mod arithmetic;
mod control;
mod custom;
mod frequency;
mod ignored;
mod input;
mod input_rotation;
mod measurement;
mod permutation;
mod rotation;
mod scalar;
mod swap;
mod unsupported;

use std::ops::RangeInclusive;

use crate::registry::{CellKind, CellMaker};

pub(crate) use arithmetic::build_arithmetic;
pub(crate) use custom::{CustomGates, build_custom, parse_custom_gates};
pub use custom::CustomDefinition;
pub(crate) use frequency::build_frequency;
pub use frequency::FrequencyKind;
pub(crate) use input::input_register_qubits;
pub(crate) use input_rotation::build_input_rotation;
pub(crate) use measurement::build_measurement;
pub(crate) use permutation::build_permutation;
pub use permutation::PermutationKind;
pub(crate) use rotation::{build_formula_gate, build_gate};
pub(crate) use scalar::build_scalar;

/// Register sizes for families indexed by register width.
pub(crate) const REGISTER_SIZES: RangeInclusive<usize> = 1..=16;

/// Every built-in cell, in registration order.
pub(crate) fn all_cell_makers() -> Vec<CellMaker> {
    let mut out = Vec::new();
    swap::generate(&mut out);
    control::generate(&mut out);
    input::generate(&mut out);
    unsupported::generate(&mut out);
    scalar::generate(&mut out);
    measurement::generate(&mut out);
    rotation::generate(&mut out);
    input_rotation::generate(&mut out);
    permutation::generate(&mut out);
    ignored::generate(&mut out);
    arithmetic::generate(&mut out);
    frequency::generate(&mut out);
    out
}

/// Register `{prefix}{n}` for every `n` in `sizes`, with footprint `n`.
pub(crate) fn sized_family(
    out: &mut Vec<CellMaker>,
    prefix: &str,
    sizes: RangeInclusive<usize>,
    kind: impl Fn(usize) -> CellKind,
) {
    for n in sizes {
        out.push(CellMaker::new(format!("{prefix}{n}"), n, kind(n)));
    }
}

