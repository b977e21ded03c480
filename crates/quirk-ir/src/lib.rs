//! Quirk Circuit Intermediate Representation
//!
//! The data structures produced by the Quirk URL compiler: an ordered list of
//! [`Operation`]s, each a gate, measurement or global phase applied to
//! addressed qubits under positive controls.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], equal to the wire row on the board
//! - **Gates**: [`StandardGate`] for Pauli powers and rotations,
//!   [`RegisterGate`] for QFT, phase gradients and permutations,
//!   [`ArithmeticGate`] for reversible register arithmetic and
//!   [`CustomGate`] for matrix gates
//! - **Parameters**: [`ParameterExpression`] for exponents that depend on time `t`
//! - **Circuit**: [`Circuit`], with a classical evaluator for permutation circuits
//!
//! # Example
//!
//! ```rust
//! use quirk_ir::{ArithmeticGate, ArithmeticOp, Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("counter");
//! circuit.x(QubitId(0)).unwrap();
//! circuit
//!     .gate(ArithmeticGate::new(ArithmeticOp::Increment, 2, vec![]), QubitId::range(0, 2))
//!     .unwrap();
//!
//! assert_eq!(circuit.apply_to_basis_state(0b00).unwrap(), 0b10);
//! ```

pub mod arithmetic;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod operation;
pub mod parameter;
pub mod qubit;

pub use arithmetic::{ArithmeticGate, ArithmeticOp, Comparison, InputRegister};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Axis, CustomGate, Gate, GateKind, RegisterGate, StandardGate};
pub use operation::{Operation, OperationKind};
pub use parameter::{Function, ParameterExpression};
pub use qubit::QubitId;
