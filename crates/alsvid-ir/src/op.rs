//! Operations and regions of the circuit graph.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::Gate;
use crate::value::ValueId;

/// Unique identifier for an operation within a circuit graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpId(pub u32);

impl fmt::Display for OpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op{}", self.0)
    }
}

/// Unique identifier for a region within a circuit graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

/// A region: a list of operations in definition order.
///
/// The top-level function body is a region; structured operations
/// (e.g. [`OpKind::Scope`]) own nested regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Operations in definition order.
    pub ops: Vec<OpId>,
}

/// The kind of operation in a circuit graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OpKind {
    /// Allocate a qubit register. Produces a register value.
    Alloc {
        /// Number of qubits in the register.
        size: u32,
    },
    /// Extract a single qubit from a register. Produces a fresh qubit
    /// value, initialized to |0⟩.
    Extract {
        /// Index of the qubit within the register.
        index: u32,
    },
    /// Re-insert a qubit into a register. Produces the updated register.
    Insert {
        /// Index of the qubit within the register.
        index: u32,
    },
    /// A named quantum gate. Operands are angle parameters followed by
    /// input qubits; results are the output qubits, positionally matching
    /// the inputs.
    Gate {
        /// The gate mnemonic.
        gate: Gate,
        /// Whether the adjoint (inverse) form is applied.
        adjoint: bool,
    },
    /// Measure a qubit. Produces a classical bit and the post-measurement
    /// qubit.
    Measure,
    /// Deallocate a register. No results.
    Dealloc,
    /// A classical floating-point constant (e.g. a rotation angle).
    FloatConst {
        /// The constant value.
        value: f64,
    },
    /// Structured scope holding one nested region. No operands or results.
    Scope,
}

/// A complete operation: kind, ordered operands and results, nested regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The kind of operation.
    pub kind: OpKind,
    /// Ordered input values.
    pub operands: Vec<ValueId>,
    /// Ordered output values.
    pub results: Vec<ValueId>,
    /// Nested regions, in traversal order.
    pub regions: Vec<RegionId>,
}

impl Operation {
    /// Get the mnemonic of this operation.
    pub fn mnemonic(&self) -> &'static str {
        match &self.kind {
            OpKind::Alloc { .. } => "alloc",
            OpKind::Extract { .. } => "extract",
            OpKind::Insert { .. } => "insert",
            OpKind::Gate { gate, .. } => gate.name(),
            OpKind::Measure => "measure",
            OpKind::Dealloc => "dealloc",
            OpKind::FloatConst { .. } => "const",
            OpKind::Scope => "scope",
        }
    }

    /// Get the gate and adjoint flag if this is a gate operation.
    pub fn as_gate(&self) -> Option<(Gate, bool)> {
        match self.kind {
            OpKind::Gate { gate, adjoint } => Some((gate, adjoint)),
            _ => None,
        }
    }

    /// Check if this is a gate operation.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, OpKind::Gate { .. })
    }

    /// Check if this operation extracts a fresh qubit from a register.
    pub fn is_qubit_source(&self) -> bool {
        matches!(self.kind, OpKind::Extract { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonics() {
        let op = Operation {
            kind: OpKind::Gate {
                gate: Gate::Swap,
                adjoint: false,
            },
            operands: vec![ValueId(0), ValueId(1)],
            results: vec![ValueId(2), ValueId(3)],
            regions: vec![],
        };
        assert_eq!(op.mnemonic(), "SWAP");
        assert!(op.is_gate());
        assert_eq!(op.as_gate(), Some((Gate::Swap, false)));
    }

    #[test]
    fn test_qubit_source() {
        let op = Operation {
            kind: OpKind::Extract { index: 0 },
            operands: vec![ValueId(0)],
            results: vec![ValueId(1)],
            regions: vec![],
        };
        assert!(op.is_qubit_source());
        assert_eq!(op.mnemonic(), "extract");
    }
}
