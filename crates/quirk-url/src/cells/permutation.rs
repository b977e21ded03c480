//! Qubit permutation cells.

use quirk_ir::{Gate, Operation, QubitId, RegisterGate};

use super::sized_family;
use crate::registry::{CellKind, CellMaker};

/// Bit-level permutations of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermutationKind {
    /// `<<`: every bit moves up one position, the top bit wraps to 0.
    RotateLeft,
    /// `>>`: every bit moves down one position.
    RotateRight,
    /// `rev`: reverses bit order.
    Reverse,
    /// `weave`: interleaves the low and high halves.
    Interleave,
    /// `split`: undoes `weave`.
    Deinterleave,
}

impl PermutationKind {
    /// Where bit `i` of an `n`-bit register ends up.
    pub fn destination(self, n: usize, i: usize) -> usize {
        match self {
            PermutationKind::RotateLeft => (i + 1) % n,
            PermutationKind::RotateRight => (i + n - 1) % n,
            PermutationKind::Reverse => n - 1 - i,
            PermutationKind::Interleave => {
                let half = n.div_ceil(2);
                let group = i / half;
                let stride = i % half;
                stride * 2 + group
            }
            PermutationKind::Deinterleave => {
                let half = n.div_ceil(2);
                let stride = i / 2;
                let group = i % 2;
                stride + group * half
            }
        }
    }

    /// The destination of every bit.
    pub fn mapping(self, n: usize) -> Vec<u32> {
        (0..n).map(|i| self.destination(n, i) as u32).collect()
    }
}

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    for (prefix, kind) in [
        ("<<", PermutationKind::RotateLeft),
        (">>", PermutationKind::RotateRight),
        ("rev", PermutationKind::Reverse),
        ("weave", PermutationKind::Interleave),
        ("split", PermutationKind::Deinterleave),
    ] {
        sized_family(out, prefix, 2..=16, |_| CellKind::Permutation(kind));
    }
}

pub(crate) fn build_permutation(
    kind: PermutationKind,
    identifier: &str,
    qubits: Vec<QubitId>,
) -> Vec<Operation> {
    let gate = Gate::register(RegisterGate::Permutation {
        mapping: kind.mapping(qubits.len()),
    })
    .with_label(identifier);
    vec![Operation::gate(gate, qubits)]
}
