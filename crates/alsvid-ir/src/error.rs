//! Error types for the IR crate.

use crate::op::OpId;
use crate::value::{ValueId, ValueType};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Value not found in graph.
    #[error("Value {0} not found in graph")]
    ValueNotFound(ValueId),

    /// Operation not found in graph (unknown id or already erased).
    #[error("Operation {0} not found in graph")]
    OpNotFound(OpId),

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: &'static str,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Gate requires a different number of angle parameters.
    #[error("Gate '{gate_name}' requires {expected} parameters, got {got}")]
    ParamCountMismatch {
        /// Name of the gate.
        gate_name: &'static str,
        /// Expected number of parameters.
        expected: u32,
        /// Actual number of parameters provided.
        got: u32,
    },

    /// Operand has the wrong type.
    #[error("Operand {value} has type {got}, expected {expected}")]
    TypeMismatch {
        /// The offending value.
        value: ValueId,
        /// The type the operation requires.
        expected: ValueType,
        /// The type the value actually has.
        got: ValueType,
    },

    /// Duplicate qubit operand in an operation.
    #[error("Duplicate qubit operand {0} in operation")]
    DuplicateOperand(ValueId),

    /// An operation cannot be erased while its results are still used.
    #[error("Cannot erase '{mnemonic}': result {value} still has {uses} use(s)")]
    ResultInUse {
        /// Mnemonic of the operation being erased.
        mnemonic: &'static str,
        /// The result value that is still consumed.
        value: ValueId,
        /// Number of remaining uses.
        uses: usize,
    },

    /// Invalid graph structure.
    #[error("Invalid graph structure: {0}")]
    InvalidGraph(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
