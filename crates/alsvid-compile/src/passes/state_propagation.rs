//! Basis-state propagation analysis.
//!
//! A forward abstract interpretation over one function body: for every
//! single-qubit SSA value it computes whether the value provably holds one
//! of the six stabilizer basis states, or falls to the
//! [`QubitState::NotABasis`] sink. The per-gate action is a finite-state
//! machine over the tracked states; the analysis itself is a single walk
//! in definition order.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use alsvid_ir::{CircuitGraph, Gate, ValueId, ValueType};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// The six Pauli eigenstates, plus the sink for everything untrackable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitState {
    /// |0⟩, the Z-axis up state.
    Zero,
    /// |1⟩, the Z-axis down state.
    One,
    /// |+⟩, the X-axis up state.
    Plus,
    /// |−⟩, the X-axis down state.
    Minus,
    /// |i⟩, the Y-axis up state.
    Left,
    /// |−i⟩, the Y-axis down state.
    Right,
    /// The state could not be tracked exactly (entangled, parameterized,
    /// or outside the transition table).
    NotABasis,
}

impl QubitState {
    /// Check for |0⟩.
    #[inline]
    pub fn is_zero(self) -> bool {
        self == QubitState::Zero
    }

    /// Check for |1⟩.
    #[inline]
    pub fn is_one(self) -> bool {
        self == QubitState::One
    }

    /// Check for |+⟩.
    #[inline]
    pub fn is_plus(self) -> bool {
        self == QubitState::Plus
    }

    /// Check for |−⟩.
    #[inline]
    pub fn is_minus(self) -> bool {
        self == QubitState::Minus
    }

    /// Check for |i⟩.
    #[inline]
    pub fn is_left(self) -> bool {
        self == QubitState::Left
    }

    /// Check for |−i⟩.
    #[inline]
    pub fn is_right(self) -> bool {
        self == QubitState::Right
    }

    /// Check whether this is one of the six exact basis states.
    #[inline]
    pub fn is_exact(self) -> bool {
        self != QubitState::NotABasis
    }

    /// The state after applying a gate, as tracked by the analysis.
    ///
    /// `NotABasis` is a sink, `Identity` copies the state, and adjoint-S
    /// is the tracked way back from the Y-axis states (`Left` → `Plus`,
    /// `Right` → `Minus`). Hadamard and the Paulis are involutions, so
    /// the adjoint flag does not change their action. Anything outside
    /// the transition table falls to the sink.
    pub fn apply_gate(self, gate: Gate, adjoint: bool) -> QubitState {
        if self == QubitState::NotABasis {
            return QubitState::NotABasis;
        }
        if gate == Gate::Identity {
            return self;
        }
        if gate == Gate::S {
            if adjoint {
                return match self {
                    QubitState::Left => QubitState::Plus,
                    QubitState::Right => QubitState::Minus,
                    _ => QubitState::NotABasis,
                };
            }
            if matches!(self, QubitState::Left | QubitState::Right) {
                return QubitState::NotABasis;
            }
        }
        transition(self, gate).unwrap_or(QubitState::NotABasis)
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QubitState::Zero => "ZERO",
            QubitState::One => "ONE",
            QubitState::Plus => "PLUS",
            QubitState::Minus => "MINUS",
            QubitState::Left => "LEFT",
            QubitState::Right => "RIGHT",
            QubitState::NotABasis => "NOT_A_BASIS",
        };
        f.write_str(name)
    }
}

/// Look up the tracked (non-adjoint) action of a gate on a basis state.
///
/// The table is a partial function; an absent entry means the resulting
/// state is not tracked exactly.
pub fn transition(state: QubitState, gate: Gate) -> Option<QubitState> {
    transitions().get(&(state, gate)).copied()
}

/// The `(input state, gate) → output state` transition table.
///
/// Built once behind a `OnceLock`; read-only for the process lifetime.
fn transitions() -> &'static FxHashMap<(QubitState, Gate), QubitState> {
    static TABLE: OnceLock<FxHashMap<(QubitState, Gate), QubitState>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use Gate::{Hadamard, PauliX, PauliY, PauliZ, S};
        use QubitState::{Left, Minus, One, Plus, Right, Zero};

        let entries = [
            ((Zero, Hadamard), Plus),
            ((Zero, PauliX), One),
            ((Zero, PauliY), One),
            ((Zero, PauliZ), Zero),
            ((One, Hadamard), Minus),
            ((One, PauliX), Zero),
            ((One, PauliY), Zero),
            ((One, PauliZ), One),
            ((Plus, Hadamard), Zero),
            ((Plus, PauliX), Plus),
            ((Plus, PauliY), Minus),
            ((Plus, PauliZ), Minus),
            ((Plus, S), Left),
            ((Minus, Hadamard), One),
            ((Minus, PauliX), Minus),
            ((Minus, PauliY), Plus),
            ((Minus, PauliZ), Plus),
            ((Minus, S), Right),
            ((Left, Hadamard), Right),
            ((Left, PauliX), Right),
            ((Left, PauliY), Left),
            ((Left, PauliZ), Right),
            ((Right, Hadamard), Left),
            ((Right, PauliX), Left),
            ((Right, PauliY), Right),
            ((Right, PauliZ), Left),
        ];
        entries.into_iter().collect()
    })
}

/// The analysis result: abstract state per single-qubit SSA value.
///
/// One map per analyzed function body, created fresh per invocation. Keys
/// are bound exactly once, when the producing operation is visited, and
/// never overwritten.
#[derive(Debug, Clone, Default)]
pub struct QubitStateMap {
    states: FxHashMap<ValueId, QubitState>,
}

impl QubitStateMap {
    pub(crate) fn bind(&mut self, value: ValueId, state: QubitState) {
        let previous = self.states.insert(value, state);
        debug_assert!(previous.is_none(), "qubit state bound twice for {value}");
    }

    /// Get the tracked state of a value, if it was tracked at all.
    pub fn get(&self, value: ValueId) -> Option<QubitState> {
        self.states.get(&value).copied()
    }

    /// Get the state of a value, treating untracked values as the sink.
    pub fn state_of(&self, value: ValueId) -> QubitState {
        self.get(value).unwrap_or(QubitState::NotABasis)
    }

    /// Get the number of tracked values.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no value was tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over the tracked (value, state) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ValueId, QubitState)> + '_ {
        self.states.iter().map(|(&v, &s)| (v, s))
    }
}

/// Forward basis-state propagation over one function body.
#[derive(Debug, Default)]
pub struct StatePropagation;

impl StatePropagation {
    /// Create a new analysis pass.
    pub fn new() -> Self {
        Self
    }

    /// Run the analysis, producing the state map for every value produced
    /// by a single-result, qubit-typed operation.
    ///
    /// # Panics
    ///
    /// Panics if a gate operand has no recorded state. On a well-formed
    /// graph definitions precede uses, so this is an internal-invariant
    /// failure, not a recoverable condition.
    pub fn analyze(graph: &CircuitGraph) -> QubitStateMap {
        let mut states = QubitStateMap::default();

        graph.walk(|_, op| {
            // restrict to operations producing exactly one qubit value
            if op.results.len() != 1 {
                return;
            }
            let result = op.results[0];
            if graph.value_type(result) != Some(ValueType::Qubit) {
                return;
            }

            // fresh qubits extracted from a register start in |0⟩
            if op.is_qubit_source() {
                states.bind(result, QubitState::Zero);
                return;
            }

            // anything with extra operands carries classical parameters
            // (e.g. a rotation angle) and cannot be a discrete transition
            if op.operands.len() != 1 {
                states.bind(result, QubitState::NotABasis);
                return;
            }

            let Some((gate, adjoint)) = op.as_gate() else {
                states.bind(result, QubitState::NotABasis);
                return;
            };

            let parent = op.operands[0];
            let parent_state = states
                .get(parent)
                .expect("definition precedes use: gate operand must have a recorded state");
            states.bind(result, parent_state.apply_gate(gate, adjoint));
        });

        debug!(
            function = graph.name(),
            tracked = states.len(),
            "state propagation complete"
        );
        states
    }
}

impl Pass for StatePropagation {
    fn name(&self) -> &'static str {
        "state_propagation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, graph: &mut CircuitGraph, properties: &mut PropertySet) -> CompileResult<()> {
        properties.insert(Self::analyze(graph));
        Ok(())
    }
}
