//! Error types for the URL compiler.

use quirk_ir::{InputRegister, IrError};
use thiserror::Error;

/// Errors that can occur while compiling a Quirk URL.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuirkError {
    /// The URL or its fragment has the wrong shape.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// The fragment payload is not valid JSON.
    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// The JSON document does not describe a circuit.
    #[error("Invalid circuit JSON: {0}")]
    Schema(String),

    /// A column entry names no known cell.
    #[error("Unrecognized column entry: {0}")]
    UnrecognizedToken(String),

    /// A cell reads a register no input cell in its column provides.
    #[error("Missing input {register} for cell '{cell}'")]
    MissingInput { register: InputRegister, cell: String },

    /// The same register is bound twice in one column.
    #[error("Duplicate input {register} in column")]
    DuplicateInput { register: InputRegister },

    /// An input register shares qubits with the register it feeds.
    #[error("Input {register} overlaps the target of cell '{cell}'")]
    InputOverlap { register: InputRegister, cell: String },

    /// A column holds an odd number of swap cells.
    #[error("A column must contain 0 or an even number of swap gates, got {count}")]
    ArityMismatch { count: usize },

    /// A cell's footprint covers another non-blank cell.
    #[error("Cell '{cell}' at row {row} overlaps the cell at row {other}")]
    OverlappingCells {
        cell: String,
        row: usize,
        other: usize,
    },

    /// The cell has no physical realization.
    #[error("Unphysical operation: '{cell}' ({reason})")]
    UnphysicalOperation { cell: String, reason: String },

    /// A formula argument is not a string.
    #[error("Formula must be a string: {0}")]
    FormulaType(String),

    /// A formula could not be parsed.
    #[error(
        "Failed to parse the gate formula {formula:?}: {detail}. \
         Quirk accepts some forms this parser does not, \
         e.g. Quirk allows \"2 pi\" whereas this parser requires \"2*pi\""
    )]
    FormulaSyntax { formula: String, detail: String },

    /// A formula depends on something other than time.
    #[error("Formula has variables besides time \"t\": {0:?}")]
    ExtraVariable(String),

    /// Matrix text is not a rectangular `{{...},{...}}` literal.
    #[error("Invalid matrix text: {0}")]
    MatrixFormat(String),

    /// A matrix entry is not a complex number.
    #[error("Failed to parse complex from {0:?}")]
    ComplexLiteral(String),

    /// A custom gate definition is malformed.
    #[error("Invalid custom gate '{id}': {reason}")]
    CustomGate { id: String, reason: String },

    /// The compiled operations were rejected by the IR.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for URL compilation.
pub type QuirkResult<T> = Result<T, QuirkError>;
