//! Quirk URL compiler
//!
//! Turns a shareable [Quirk](https://algassert.com/quirk) circuit URL into
//! an ordered list of quantum operations. The URL fragment carries a JSON
//! document whose `cols` entry lists the circuit's columns; each column is a
//! list of cells, one per wire row, and each cell identifier is resolved
//! against a fixed registry of cell families.
//!
//! # Example
//!
//! ```rust
//! use quirk_ir::{Operation, QubitId, StandardGate};
//! use quirk_url::quirk_json_to_circuit;
//! use serde_json::json;
//!
//! let circuit = quirk_json_to_circuit(&json!({"cols": [["H"], ["•", "X"]]})).unwrap();
//! assert_eq!(
//!     circuit.operations(),
//!     &[
//!         Operation::single_qubit_gate(StandardGate::H, QubitId(0)),
//!         Operation::cx(QubitId(0), QubitId(1)),
//!     ]
//! );
//! ```
//!
//! # Time-dependent gates
//!
//! Cells such as `X^t` or formula gates (`X^ft`, `Rzft`) keep their exponent
//! symbolic in the time variable `t`. Bind it with
//! [`Circuit::bind_parameter`](quirk_ir::Circuit::bind_parameter):
//!
//! ```rust
//! use quirk_url::quirk_json_to_circuit;
//! use serde_json::json;
//!
//! let circuit = quirk_json_to_circuit(&json!({"cols": [[{"id": "X^ft", "arg": "t*t"}]]})).unwrap();
//! assert!(circuit.is_parameterized());
//! assert!(!circuit.bind_parameter("t", 0.5).is_parameterized());
//! ```

mod cells;
mod column;
mod decoder;
mod error;
mod formula;
mod lexer;
mod matrix;
mod registry;
mod token;

pub use cells::{CustomDefinition, FrequencyKind, PermutationKind};
pub use column::ColumnContext;
pub use decoder::{QUIRK_PREFIXES, quirk_json_to_circuit, quirk_url_to_circuit};
pub use error::{QuirkError, QuirkResult};
pub use formula::{TIME_SYMBOL, expand_unicode_fractions, parse_formula, parse_formula_text};
pub use matrix::{ComplexMatrix, parse_complex, parse_matrix};
pub use registry::{ArgKind, CellKind, CellMaker, CellRegistry, registry};
pub use token::CellToken;
