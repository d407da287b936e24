//! Property tests for the basis-state transition machine.

use alsvid_compile::QubitState;
use alsvid_ir::Gate;
use proptest::prelude::*;

fn arb_exact_state() -> impl Strategy<Value = QubitState> {
    prop_oneof![
        Just(QubitState::Zero),
        Just(QubitState::One),
        Just(QubitState::Plus),
        Just(QubitState::Minus),
        Just(QubitState::Left),
        Just(QubitState::Right),
    ]
}

fn arb_single_qubit_gate() -> impl Strategy<Value = Gate> {
    prop_oneof![
        Just(Gate::Identity),
        Just(Gate::Hadamard),
        Just(Gate::PauliX),
        Just(Gate::PauliY),
        Just(Gate::PauliZ),
        Just(Gate::S),
        Just(Gate::T),
    ]
}

fn arb_involution() -> impl Strategy<Value = Gate> {
    prop_oneof![
        Just(Gate::Hadamard),
        Just(Gate::PauliX),
        Just(Gate::PauliY),
        Just(Gate::PauliZ),
    ]
}

proptest! {
    /// Hadamard and the Paulis are involutions on the tracked states:
    /// applying one twice returns the original state, exactly.
    #[test]
    fn involutions_round_trip(state in arb_exact_state(), gate in arb_involution()) {
        let once = state.apply_gate(gate, false);
        prop_assert!(once.is_exact());
        prop_assert_eq!(once.apply_gate(gate, false), state);
    }

    /// The sink absorbs every gate, adjoint or not.
    #[test]
    fn sink_is_absorbing(gate in arb_single_qubit_gate(), adjoint in any::<bool>()) {
        prop_assert_eq!(
            QubitState::NotABasis.apply_gate(gate, adjoint),
            QubitState::NotABasis
        );
    }

    /// No chain of single-qubit gates resurrects an exact state from the
    /// sink.
    #[test]
    fn sink_persists_through_chains(
        gates in prop::collection::vec((arb_single_qubit_gate(), any::<bool>()), 0..16)
    ) {
        let mut state = QubitState::NotABasis;
        for (gate, adjoint) in gates {
            state = state.apply_gate(gate, adjoint);
        }
        prop_assert_eq!(state, QubitState::NotABasis);
    }

    /// Identity copies every state, adjoint or not.
    #[test]
    fn identity_copies(state in arb_exact_state(), adjoint in any::<bool>()) {
        prop_assert_eq!(state.apply_gate(Gate::Identity, adjoint), state);
    }
}
