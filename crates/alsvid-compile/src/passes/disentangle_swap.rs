//! SWAP disentangling pass.
//!
//! Replaces two-qubit SWAP operations whose inputs provably hold trivially
//! swappable basis states with an equivalent, shorter sequence of
//! single-qubit gates. The decision table comes from arXiv:2012.07711,
//! table 1, and only covers sites whose first input is in |0⟩; the
//! symmetric cases are intentionally left unhandled (see `swap_action`).
//!
//! Each rewrite is staged: replacement gates are inserted after the SWAP,
//! every use of both SWAP results is redirected, and the SWAP is erased
//! last, so no partial rewiring is ever observable.

use tracing::debug;

use alsvid_ir::{CircuitGraph, Gate, OpId, OpKind, ValueId};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::passes::state_propagation::{QubitState, StatePropagation};
use crate::property::PropertySet;

/// How a matched SWAP site is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    /// Both inputs are |0⟩: the SWAP is the identity; erase it and wire
    /// the outputs straight to the inputs.
    Elide,
    /// Insert one gate on the |0⟩ wire; both outputs take its result.
    Single(Gate),
    /// Insert two gates on the |0⟩ wire, the second fed by the first;
    /// both outputs take the second gate's result.
    Chain(Gate, Gate),
}

/// The disentangling decision table, keyed by the states of the SWAP's
/// two inputs.
///
/// Only sites whose *first* input is |0⟩ are handled. The cited table is
/// symmetric under operand exchange, but the mirrored cases are left
/// unmatched until it is confirmed the asymmetry is not load-bearing.
/// `None` means the site is left untouched.
// TODO: widen the match to the mirrored rows (second input |0⟩).
pub fn swap_action(a: QubitState, b: QubitState) -> Option<SwapAction> {
    if !a.is_zero() {
        return None;
    }
    match b {
        QubitState::Zero => Some(SwapAction::Elide),
        QubitState::One => Some(SwapAction::Single(Gate::PauliX)),
        QubitState::Plus => Some(SwapAction::Single(Gate::Hadamard)),
        QubitState::Minus => Some(SwapAction::Chain(Gate::PauliX, Gate::Hadamard)),
        _ => None,
    }
}

/// A SWAP site captured during the scan, before any mutation.
struct SwapSite {
    op: OpId,
    a_in: ValueId,
    b_in: ValueId,
    a_out: ValueId,
    b_out: ValueId,
}

/// Disentangle SWAP operations in one target function.
pub struct DisentangleSwap {
    /// Symbol name of the function the pass is restricted to.
    target_function: String,
}

impl DisentangleSwap {
    /// Create the pass, restricted to the function with the given name.
    pub fn new(target_function: impl Into<String>) -> Self {
        Self {
            target_function: target_function.into(),
        }
    }
}

impl Pass for DisentangleSwap {
    fn name(&self) -> &'static str {
        "disentangle_swap"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, graph: &mut CircuitGraph, _properties: &mut PropertySet) -> CompileResult<()> {
        if graph.name() != self.target_function {
            debug!(
                function = graph.name(),
                target = %self.target_function,
                "not the target function, skipping"
            );
            return Ok(());
        }

        // the map is created fresh here and dropped with this invocation
        let states = StatePropagation::analyze(graph);

        // collect all sites first; mutation happens after the scan
        let mut sites = Vec::new();
        graph.walk(|id, op| {
            if let OpKind::Gate {
                gate: Gate::Swap, ..
            } = op.kind
            {
                sites.push(SwapSite {
                    op: id,
                    a_in: op.operands[0],
                    b_in: op.operands[1],
                    a_out: op.results[0],
                    b_out: op.results[1],
                });
            }
        });

        for site in sites {
            let state_a = states.state_of(site.a_in);
            let state_b = states.state_of(site.b_in);
            let Some(action) = swap_action(state_a, state_b) else {
                continue;
            };
            debug!(
                swap = %site.op,
                state_a = %state_a,
                state_b = %state_b,
                "rewriting SWAP site"
            );

            match action {
                SwapAction::Elide => {
                    graph.replace_all_uses(site.a_out, site.a_in)?;
                    graph.replace_all_uses(site.b_out, site.b_in)?;
                }
                SwapAction::Single(gate) => {
                    let (_, out) = graph.insert_gate_after(site.op, gate, false, site.a_in)?;
                    graph.replace_all_uses(site.a_out, out)?;
                    graph.replace_all_uses(site.b_out, out)?;
                }
                SwapAction::Chain(first, second) => {
                    let (first_op, first_out) =
                        graph.insert_gate_after(site.op, first, false, site.a_in)?;
                    let (_, second_out) =
                        graph.insert_gate_after(first_op, second, false, first_out)?;
                    graph.replace_all_uses(site.a_out, second_out)?;
                    graph.replace_all_uses(site.b_out, second_out)?;
                }
            }
            // deletion last; erase_op refuses if any consumer was missed
            graph.erase_op(site.op)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::state_propagation::QubitState::{
        Left, Minus, NotABasis, One, Plus, Right, Zero,
    };

    #[test]
    fn test_action_table_zero_rows() {
        assert_eq!(swap_action(Zero, Zero), Some(SwapAction::Elide));
        assert_eq!(swap_action(Zero, One), Some(SwapAction::Single(Gate::PauliX)));
        assert_eq!(
            swap_action(Zero, Plus),
            Some(SwapAction::Single(Gate::Hadamard))
        );
        assert_eq!(
            swap_action(Zero, Minus),
            Some(SwapAction::Chain(Gate::PauliX, Gate::Hadamard))
        );
    }

    #[test]
    fn test_action_table_unhandled_rows() {
        assert_eq!(swap_action(Zero, Left), None);
        assert_eq!(swap_action(Zero, Right), None);
        assert_eq!(swap_action(Zero, NotABasis), None);
        // asymmetric: second operand |0⟩ does not match
        assert_eq!(swap_action(One, Zero), None);
        assert_eq!(swap_action(Plus, Zero), None);
        assert_eq!(swap_action(NotABasis, NotABasis), None);
    }
}
