//! Input register cells.

use quirk_ir::{InputRegister, QubitId};

use super::{REGISTER_SIZES, sized_family};
use crate::registry::{CellKind, CellMaker};

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    let inputs = [
        ("inputA", InputRegister::A, false),
        ("inputB", InputRegister::B, false),
        ("inputR", InputRegister::R, false),
        ("revinputA", InputRegister::A, true),
        ("revinputB", InputRegister::B, true),
    ];
    for (prefix, register, reversed) in inputs {
        sized_family(out, prefix, REGISTER_SIZES, |_| CellKind::Input {
            register,
            reversed,
        });
    }
}

/// Qubits of an input register, least significant first.
pub(crate) fn input_register_qubits(row: usize, size: usize, reversed: bool) -> Vec<QubitId> {
    let mut qubits = QubitId::range(row, size);
    if reversed {
        qubits.reverse();
    }
    qubits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_register() {
        assert_eq!(
            input_register_qubits(1, 3, true),
            vec![QubitId(3), QubitId(2), QubitId(1)]
        );
        assert_eq!(input_register_qubits(1, 2, false), vec![QubitId(1), QubitId(2)]);
    }
}
