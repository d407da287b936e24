//! Alsvid SSA Circuit Intermediate Representation
//!
//! This crate provides the SSA-style circuit graph the Alsvid optimization
//! passes run on. A function body is a region of operations in definition
//! order; operations consume and produce typed SSA values and may own
//! nested regions (structured scopes). Every value has a stable integer
//! identity usable as a map key across graph mutations.
//!
//! # Core Components
//!
//! - **Values**: [`ValueId`], [`ValueType`] for typed SSA values
//! - **Gates**: [`Gate`] mnemonics with per-gate qubit/parameter arity
//! - **Operations**: [`Operation`], [`OpKind`] combining gates and
//!   structural ops (register alloc/extract/insert, measure, scopes)
//! - **Graph**: [`CircuitGraph`] arena holding one function body, with a
//!   builder API, definition-order traversal, and staged mutation
//!   primitives (`insert_gate_after`, `replace_all_uses`, `erase_op`)
//!
//! # Example: Building and Rewiring a Body
//!
//! ```rust
//! use alsvid_ir::{CircuitGraph, Gate};
//!
//! let mut graph = CircuitGraph::new("main");
//! let reg = graph.alloc(2).unwrap();
//! let q0 = graph.extract(reg, 0).unwrap();
//! let q1 = graph.extract(reg, 1).unwrap();
//!
//! // put the first qubit in |+⟩, then swap the two wires
//! let q0 = graph.gate1(Gate::Hadamard, q0).unwrap();
//! let (a, b) = graph.swap(q0, q1).unwrap();
//!
//! let reg = graph.insert(reg, 0, a).unwrap();
//! let reg = graph.insert(reg, 1, b).unwrap();
//! graph.dealloc(reg).unwrap();
//!
//! assert_eq!(graph.count_mnemonic("SWAP"), 1);
//! graph.verify_integrity().unwrap();
//! ```

pub mod error;
pub mod gate;
pub mod graph;
pub mod op;
pub mod value;

pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use graph::CircuitGraph;
pub use op::{OpId, OpKind, Operation, Region, RegionId};
pub use value::{ValueId, ValueType};
