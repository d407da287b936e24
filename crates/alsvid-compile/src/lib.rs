//! Alsvid Compilation Passes
//!
//! This crate provides the pass infrastructure and the optimization passes
//! that run over the [`alsvid_ir`] circuit graph. It follows a pass-based
//! architecture: each pass performs one analysis or transformation on a
//! single function body, and a [`PassManager`] runs them in sequence.
//!
//! # Passes
//!
//! - [`StatePropagation`]: forward dataflow analysis tracking, per
//!   single-qubit SSA value, which of the six stabilizer basis states it
//!   provably holds ([`QubitState`]), degrading to `NotABasis` otherwise.
//! - [`DisentangleSwap`]: consumes the analysis and rewrites SWAP
//!   operations whose inputs are in trivially swappable basis states into
//!   shorter single-qubit gate sequences.
//!
//! # Example
//!
//! ```rust
//! use alsvid_compile::{DisentangleSwap, Pass, PropertySet};
//! use alsvid_ir::{CircuitGraph, Gate};
//!
//! // SWAP of |0⟩ and |+⟩ reduces to a single Hadamard.
//! let mut graph = CircuitGraph::new("main");
//! let reg = graph.alloc(2).unwrap();
//! let q0 = graph.extract(reg, 0).unwrap();
//! let q1 = graph.extract(reg, 1).unwrap();
//! let q1 = graph.gate1(Gate::Hadamard, q1).unwrap();
//! let (a, b) = graph.swap(q0, q1).unwrap();
//! let reg = graph.insert(reg, 0, a).unwrap();
//! let reg = graph.insert(reg, 1, b).unwrap();
//! graph.dealloc(reg).unwrap();
//!
//! let mut props = PropertySet::new();
//! DisentangleSwap::new("main").run(&mut graph, &mut props).unwrap();
//!
//! assert_eq!(graph.count_mnemonic("SWAP"), 0);
//! assert_eq!(graph.count_mnemonic("Hadamard"), 2);
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod property;

// Built-in passes
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::PassManager;
pub use pass::{Pass, PassKind};
pub use passes::{
    DisentangleSwap, QubitState, QubitStateMap, StatePropagation, SwapAction, swap_action,
    transition,
};
pub use property::PropertySet;
