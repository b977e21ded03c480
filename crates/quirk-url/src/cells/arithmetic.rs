//! Arithmetic and comparison cells.

use quirk_ir::{ArithmeticGate, ArithmeticOp, Comparison, Gate, Operation, QubitId};

use super::{REGISTER_SIZES, sized_family};
use crate::column::ColumnContext;
use crate::error::QuirkResult;
use crate::registry::{CellKind, CellMaker};

const FAMILIES: [(&str, ArithmeticOp); 14] = [
    ("inc", ArithmeticOp::Increment),
    ("dec", ArithmeticOp::Decrement),
    ("+=A", ArithmeticOp::AddA),
    ("-=A", ArithmeticOp::SubA),
    ("+=AA", ArithmeticOp::AddASquared),
    ("-=AA", ArithmeticOp::SubASquared),
    ("+=AB", ArithmeticOp::AddAB),
    ("-=AB", ArithmeticOp::SubAB),
    ("^=A", ArithmeticOp::XorA),
    ("+cntA", ArithmeticOp::AddPopcountA),
    ("-cntA", ArithmeticOp::SubPopcountA),
    ("Flip<A", ArithmeticOp::FlipBelowA),
    ("*A", ArithmeticOp::MulA),
    ("/A", ArithmeticOp::DivA),
];

const COMPARISONS: [(&str, Comparison); 6] = [
    ("^A<B", Comparison::Less),
    ("^A>B", Comparison::Greater),
    ("^A>=B", Comparison::GreaterOrEqual),
    ("^A<=B", Comparison::LessOrEqual),
    ("^A=B", Comparison::Equal),
    ("^A!=B", Comparison::NotEqual),
];

pub(super) fn generate(out: &mut Vec<CellMaker>) {
    for (prefix, op) in FAMILIES {
        sized_family(out, prefix, REGISTER_SIZES, |_| CellKind::Arithmetic(op));
    }
    for (id, cmp) in COMPARISONS {
        out.push(CellMaker::new(id, 1, CellKind::Arithmetic(ArithmeticOp::Compare(cmp))));
    }
}

/// One arithmetic gate over the target followed by the registers it reads.
pub(crate) fn build_arithmetic(
    op: ArithmeticOp,
    identifier: &str,
    target: Vec<QubitId>,
    ctx: &ColumnContext,
) -> QuirkResult<Vec<Operation>> {
    let mut qubits = target.clone();
    let mut input_widths = Vec::with_capacity(op.inputs().len());
    for &register in op.inputs() {
        let input = ctx.require_input(register, identifier, &target)?;
        input_widths.push(input.len() as u32);
        qubits.extend_from_slice(input);
    }
    let gate = Gate::arithmetic(ArithmeticGate::new(op, target.len() as u32, input_widths))
        .with_label(identifier);
    Ok(vec![Operation::gate(gate, qubits)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuirkError;
    use quirk_ir::InputRegister;

    #[test]
    fn test_inputs_follow_target() {
        let mut ctx = ColumnContext::default();
        ctx.bind_input(InputRegister::A, QubitId::range(4, 2)).unwrap();
        ctx.bind_input(InputRegister::B, QubitId::range(6, 1)).unwrap();
        let ops = build_arithmetic(ArithmeticOp::AddAB, "+=AB3", QubitId::range(0, 3), &ctx).unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].qubits, QubitId::range(0, 3).into_iter().chain(QubitId::range(4, 3)).collect::<Vec<_>>());
        assert_eq!(ops[0].name(), "+=AB3");
    }

    #[test]
    fn test_input_overlapping_target() {
        let mut ctx = ColumnContext::default();
        ctx.bind_input(InputRegister::A, QubitId::range(1, 2)).unwrap();
        let err = build_arithmetic(ArithmeticOp::AddA, "+=A2", QubitId::range(0, 2), &ctx).unwrap_err();
        assert!(matches!(err, QuirkError::InputOverlap { .. }));
        assert!(err.to_string().contains("overlaps"));
    }

    #[test]
    fn test_increment_needs_no_input() {
        let ops = build_arithmetic(ArithmeticOp::Increment, "inc2", QubitId::range(0, 2), &ColumnContext::default())
            .unwrap();
        assert_eq!(ops[0].qubits.len(), 2);
    }
}
