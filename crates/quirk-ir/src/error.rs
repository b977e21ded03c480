//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Operation cannot be evaluated on a computational basis state.
    #[error("Operation '{name}' does not map basis states to basis states")]
    NonClassicalOperation {
        /// Name of the offending operation.
        name: String,
    },

    /// Qubit cannot be addressed in a 64-bit basis state.
    #[error("Qubit {qubit} is out of range for basis-state evaluation")]
    QubitOutOfRange {
        /// The qubit.
        qubit: QubitId,
    },

    /// Matrix size does not match the gate's qubit count.
    #[error("Matrix with {len} entries does not fit a {num_qubits}-qubit gate")]
    MatrixDimension {
        /// Number of matrix entries supplied.
        len: usize,
        /// Qubit count of the gate.
        num_qubits: u32,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
