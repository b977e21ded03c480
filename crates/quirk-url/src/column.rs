//! Column compilation.
//!
//! Every slot of a column is looked up before anything is built. Building
//! then runs in stages: inputs are bound, controls are collected
//! (with any basis changes they need), swaps are paired, every remaining
//! cell is built under the column's controls, and finally the basis changes
//! are undone in reverse order.

use quirk_ir::{InputRegister, Operation, QubitId, StandardGate};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::warn;

use crate::cells::{
    CustomGates, build_arithmetic, build_custom, build_formula_gate, build_frequency, build_gate,
    build_input_rotation, build_measurement, build_permutation, build_scalar,
    input_register_qubits,
};
use crate::error::{QuirkError, QuirkResult};
use crate::registry::{ArgKind, CellKind, CellMaker, registry};
use crate::token::CellToken;

/// Per-column state shared by the cells of one column.
#[derive(Debug, Default)]
pub struct ColumnContext {
    controls: Vec<QubitId>,
    before: Vec<Operation>,
    inputs: FxHashMap<InputRegister, Vec<QubitId>>,
}

impl ColumnContext {
    /// Qubits every operation of the column is conditioned on, in row order.
    pub fn controls(&self) -> &[QubitId] {
        &self.controls
    }

    /// Operations applied before the controlled region.
    pub fn before(&self) -> &[Operation] {
        &self.before
    }

    /// Qubits of a bound register, least significant first.
    pub fn input(&self, register: InputRegister) -> Option<&[QubitId]> {
        self.inputs.get(&register).map(Vec::as_slice)
    }

    /// Bind a register name to qubits.
    pub fn bind_input(&mut self, register: InputRegister, qubits: Vec<QubitId>) -> QuirkResult<()> {
        if self.inputs.contains_key(&register) {
            return Err(QuirkError::DuplicateInput { register });
        }
        self.inputs.insert(register, qubits);
        Ok(())
    }

    /// Look up a register that `cell` reads, checking it does not share
    /// qubits with `target`.
    pub fn require_input(
        &self,
        register: InputRegister,
        cell: &str,
        target: &[QubitId],
    ) -> QuirkResult<&[QubitId]> {
        let qubits = self
            .input(register)
            .ok_or_else(|| QuirkError::MissingInput {
                register,
                cell: cell.to_string(),
            })?;
        if qubits.iter().any(|q| target.contains(q)) {
            return Err(QuirkError::InputOverlap {
                register,
                cell: cell.to_string(),
            });
        }
        Ok(qubits)
    }
}

/// A resolved, non-blank slot.
struct Placed<'a> {
    row: usize,
    token: CellToken,
    maker: &'a CellMaker,
}

impl Placed<'_> {
    fn id(&self) -> &str {
        &self.maker.identifier
    }

    fn qubit(&self) -> QubitId {
        QubitId::from(self.row)
    }

    fn footprint(&self) -> Vec<QubitId> {
        QubitId::range(self.row, self.maker.size)
    }
}

/// A column whose tokens all name known cells, ready to be built.
pub(crate) struct ResolvedColumn<'a> {
    cells: Vec<Placed<'a>>,
}

impl<'a> ResolvedColumn<'a> {
    /// Look up every slot of a column without building anything.
    pub(crate) fn resolve(slots: &[Value], custom: &'a CustomGates) -> QuirkResult<Self> {
        Ok(Self {
            cells: resolve(slots, custom)?,
        })
    }

    /// Number of non-blank cells.
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Build the column's operations.
    pub(crate) fn build(&self) -> QuirkResult<Vec<Operation>> {
        build_column(&self.cells)
    }
}

fn build_column(cells: &[Placed<'_>]) -> QuirkResult<Vec<Operation>> {
    let mut ctx = ColumnContext::default();

    for cell in cells {
        if let CellKind::Input { register, reversed } = cell.maker.kind {
            ctx.bind_input(
                register,
                input_register_qubits(cell.row, cell.maker.size, reversed),
            )?;
        }
    }

    collect_controls(cells, &mut ctx);

    let swap_rows: Vec<QubitId> = cells
        .iter()
        .filter(|c| c.maker.kind == CellKind::Swap)
        .map(Placed::qubit)
        .collect();
    if swap_rows.len() % 2 != 0 {
        return Err(QuirkError::ArityMismatch {
            count: swap_rows.len(),
        });
    }
    let swaps: Vec<Operation> = swap_rows
        .chunks(2)
        .map(|pair| {
            Operation::gate(StandardGate::Swap, [pair[0], pair[1]])
                .controlled_by(ctx.controls.iter().copied())
        })
        .collect();

    let mut body = Vec::new();
    for cell in cells {
        for op in build_cell(cell, &ctx)? {
            if op.is_measure() && !ctx.controls.is_empty() {
                return Err(QuirkError::UnphysicalOperation {
                    cell: cell.id().to_string(),
                    reason: "controlled measurement".into(),
                });
            }
            body.push(op.controlled_by(ctx.controls.iter().copied()));
        }
    }

    if swaps.is_empty() && body.is_empty() {
        return Ok(Vec::new());
    }
    let after: Vec<Operation> = ctx.before.iter().rev().map(Operation::inverse).collect();
    let mut ops = std::mem::take(&mut ctx.before);
    ops.extend(swaps);
    ops.extend(body);
    ops.extend(after);
    Ok(ops)
}

fn resolve<'a>(slots: &[Value], custom: &'a CustomGates) -> QuirkResult<Vec<Placed<'a>>> {
    let tokens = slots
        .iter()
        .map(CellToken::from_json)
        .collect::<QuirkResult<Vec<_>>>()?;

    let mut cells = Vec::new();
    for (row, token) in tokens.iter().enumerate() {
        let Some(id) = token.id() else {
            continue;
        };
        let maker = custom
            .get(id)
            .or_else(|| registry().get(id))
            .ok_or_else(|| QuirkError::UnrecognizedToken(id.to_string()))?;

        if token.arg().is_some() && maker.arg == ArgKind::None {
            warn!(cell = id, row, "ignoring argument of a cell that takes none");
        }
        let end = (row + maker.size).min(tokens.len());
        if let Some(other) = (row + 1..end).find(|&r| !tokens[r].is_blank()) {
            return Err(QuirkError::OverlappingCells {
                cell: id.to_string(),
                row,
                other,
            });
        }

        cells.push(Placed {
            row,
            token: token.clone(),
            maker,
        });
    }
    Ok(cells)
}

/// Fill in the column controls and the basis changes they need.
///
/// Parity qubits are folded into the first of them with CNOTs; that qubit
/// then acts as an ordinary control.
fn collect_controls(cells: &[Placed<'_>], ctx: &mut ColumnContext) {
    let mut parity = Vec::new();
    for cell in cells {
        let basis_change = match &cell.maker.kind {
            CellKind::Control { basis_change } => {
                ctx.controls.push(cell.qubit());
                basis_change
            }
            CellKind::ParityControl { basis_change } => {
                parity.push(cell.qubit());
                basis_change
            }
            _ => continue,
        };
        if let Some(gate) = basis_change {
            ctx.before
                .push(Operation::single_qubit_gate(gate.clone(), cell.qubit()));
        }
    }

    if let Some((&accumulator, rest)) = parity.split_first() {
        for &qubit in rest {
            ctx.before.push(Operation::cx(qubit, accumulator));
        }
        ctx.controls.push(accumulator);
        ctx.controls.sort_unstable();
    }
}

/// Operations of one body cell, before the column controls are applied.
fn build_cell(cell: &Placed<'_>, ctx: &ColumnContext) -> QuirkResult<Vec<Operation>> {
    let id = cell.id();
    let ops = match &cell.maker.kind {
        CellKind::Control { .. }
        | CellKind::ParityControl { .. }
        | CellKind::Swap
        | CellKind::Input { .. }
        | CellKind::Ignored => Vec::new(),
        CellKind::Gate(gate) => build_gate(gate, cell.qubit()),
        CellKind::FormulaGate { axis, rotation } => {
            let default = match cell.maker.arg {
                ArgKind::Formula { default } => default,
                ArgKind::None => "t",
            };
            build_formula_gate(*axis, *rotation, cell.token.arg(), default, cell.qubit())?
        }
        CellKind::Identity => build_scalar(None, cell.qubit()),
        CellKind::Scalar(phase) => build_scalar(Some(*phase), cell.qubit()),
        CellKind::Measurement { basis_change } => {
            build_measurement(basis_change.as_ref(), cell.qubit())
        }
        CellKind::InputRotation { axis, sign } => {
            build_input_rotation(*axis, *sign, id, cell.qubit(), ctx)?
        }
        CellKind::Permutation(kind) => build_permutation(*kind, id, cell.footprint()),
        CellKind::Frequency(kind) => build_frequency(*kind, id, cell.footprint()),
        CellKind::Arithmetic(op) => build_arithmetic(*op, id, cell.footprint(), ctx)?,
        CellKind::Custom(definition) => build_custom(definition, cell.row),
        CellKind::Unsupported { reason } => {
            return Err(QuirkError::UnphysicalOperation {
                cell: id.to_string(),
                reason: (*reason).to_string(),
            });
        }
    };
    Ok(ops)
}
