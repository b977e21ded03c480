//! The cell registry: every identifier the compiler understands.

use num_complex::Complex64;
use quirk_ir::{ArithmeticOp, Axis, InputRegister, StandardGate};
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use crate::cells::{self, CustomDefinition, FrequencyKind, PermutationKind};

/// The argument a cell accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgKind {
    /// The cell takes no argument.
    None,
    /// A time formula, with the text used when the token has no argument.
    Formula { default: &'static str },
}

/// What a cell does, by family.
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    /// A fixed single-qubit gate, possibly with a time-dependent exponent.
    Gate(StandardGate),
    /// A single-qubit gate whose exponent or angle is the cell's formula.
    FormulaGate { axis: Axis, rotation: bool },
    /// Conditions the column on its qubit. `basis_change` maps the control
    /// condition onto `|1⟩` and is undone after the column.
    Control { basis_change: Option<StandardGate> },
    /// Conditions the column on the parity of all parity cells.
    ParityControl { basis_change: Option<StandardGate> },
    /// One end of a swap pair.
    Swap,
    /// Identity on its wire.
    Identity,
    /// Multiplies the state by a phase.
    Scalar(Complex64),
    /// Measures its wire, after an optional basis change.
    Measurement { basis_change: Option<StandardGate> },
    /// Binds its footprint as a named input register.
    Input { register: InputRegister, reversed: bool },
    /// Rotates its wire by `sign * A / 2^n` turns around `axis`.
    InputRotation { axis: Axis, sign: f64 },
    /// Permutes the qubits of its footprint.
    Permutation(PermutationKind),
    /// Frequency space operations on its footprint.
    Frequency(FrequencyKind),
    /// Reversible arithmetic on its footprint.
    Arithmetic(ArithmeticOp),
    /// Displays and annotations; emits nothing.
    Ignored,
    /// Known cells with no physical realization.
    Unsupported { reason: &'static str },
    /// A gate defined in the circuit's own `gates` list.
    Custom(CustomDefinition),
}

/// How to realize one cell identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMaker {
    /// The identifier used in column JSON.
    pub identifier: String,
    /// Number of contiguous rows the cell occupies.
    pub size: usize,
    /// The argument the cell accepts.
    pub arg: ArgKind,
    /// The cell's family.
    pub kind: CellKind,
}

impl CellMaker {
    /// Create a cell maker without an argument.
    pub fn new(identifier: impl Into<String>, size: usize, kind: CellKind) -> Self {
        Self {
            identifier: identifier.into(),
            size,
            arg: ArgKind::None,
            kind,
        }
    }

    /// Accept a formula argument with the given default.
    #[must_use]
    pub fn with_formula(mut self, default: &'static str) -> Self {
        self.arg = ArgKind::Formula { default };
        self
    }
}

/// Immutable lookup table from identifier to [`CellMaker`].
#[derive(Debug, Default)]
pub struct CellRegistry {
    makers: Vec<CellMaker>,
    index: FxHashMap<String, usize>,
}

impl CellRegistry {
    /// Build a registry. Later duplicates of an identifier are ignored.
    pub fn from_makers(makers: impl IntoIterator<Item = CellMaker>) -> Self {
        let mut registry = Self::default();
        for maker in makers {
            if registry.index.contains_key(&maker.identifier) {
                continue;
            }
            registry
                .index
                .insert(maker.identifier.clone(), registry.makers.len());
            registry.makers.push(maker);
        }
        registry
    }

    /// Look up a cell by identifier.
    pub fn get(&self, identifier: &str) -> Option<&CellMaker> {
        self.index.get(identifier).map(|&i| &self.makers[i])
    }

    /// Check if an identifier is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    /// All cells, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CellMaker> {
        self.makers.iter()
    }

    /// Number of registered cells.
    pub fn len(&self) -> usize {
        self.makers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.makers.is_empty()
    }
}

/// The built-in registry, built on first use.
pub fn registry() -> &'static CellRegistry {
    static REGISTRY: OnceLock<CellRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| CellRegistry::from_makers(cells::all_cell_makers()))
}
