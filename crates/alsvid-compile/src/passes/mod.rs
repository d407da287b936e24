//! Built-in compilation passes.

pub mod disentangle_swap;
pub mod state_propagation;

pub use disentangle_swap::{DisentangleSwap, SwapAction, swap_action};
pub use state_propagation::{QubitState, QubitStateMap, StatePropagation, transition};
