//! Frequency space cells: Fourier transforms and phase gradients.

use quirk_ir::{Gate, Operation, ParameterExpression, QubitId, RegisterGate};

use super::{REGISTER_SIZES, sized_family};
use crate::registry::{CellKind, CellMaker};

/// Frequency space operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyKind {
    /// Quantum Fourier transform, or its inverse.
    Qft { inverse: bool },
    /// Phase gradient with a fixed exponent.
    PhaseGradient { exponent: f64 },
    /// Phase gradient turning once per unit of time: `sign * 2^(n-1) * t`.
    TimedGradient { sign: f64 },
}

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    let families = [
        ("QFT", FrequencyKind::Qft { inverse: false }),
        ("QFT†", FrequencyKind::Qft { inverse: true }),
        ("PhaseGradient", FrequencyKind::PhaseGradient { exponent: 0.5 }),
        ("PhaseUngradient", FrequencyKind::PhaseGradient { exponent: -0.5 }),
        ("grad^t", FrequencyKind::TimedGradient { sign: 1.0 }),
        ("grad^-t", FrequencyKind::TimedGradient { sign: -1.0 }),
    ];
    for (prefix, kind) in families {
        sized_family(out, prefix, REGISTER_SIZES, |_| CellKind::Frequency(kind));
    }
}

pub(crate) fn build_frequency(
    kind: FrequencyKind,
    identifier: &str,
    qubits: Vec<QubitId>,
) -> Vec<Operation> {
    let num_qubits = qubits.len() as u32;
    let gate = match kind {
        FrequencyKind::Qft { inverse } => RegisterGate::Qft {
            num_qubits,
            inverse,
        },
        FrequencyKind::PhaseGradient { exponent } => RegisterGate::PhaseGradient {
            num_qubits,
            exponent: ParameterExpression::constant(exponent),
        },
        FrequencyKind::TimedGradient { sign } => RegisterGate::PhaseGradient {
            num_qubits,
            exponent: ParameterExpression::constant(sign * f64::from(1u32 << (num_qubits - 1)))
                * ParameterExpression::time(),
        },
    };
    vec![Operation::gate(Gate::register(gate).with_label(identifier), qubits)]
}
