//! Quantum gate mnemonics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named quantum gates.
///
/// The mnemonic strings follow the host dialect convention
/// (`"Hadamard"`, `"PauliX"`, `"SWAP"`, ...). Whether a gate is applied
/// in its adjoint form is an attribute on the operation, not part of the
/// gate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Identity gate.
    Identity,
    /// Hadamard gate.
    Hadamard,
    /// Pauli-X gate.
    PauliX,
    /// Pauli-Y gate.
    PauliY,
    /// Pauli-Z gate.
    PauliZ,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Rotation around X axis; takes one angle parameter.
    RX,
    /// Rotation around Y axis; takes one angle parameter.
    RY,
    /// Rotation around Z axis; takes one angle parameter.
    RZ,
    /// Phase-shift gate; takes one angle parameter.
    PhaseShift,
    /// Controlled-NOT gate.
    CNOT,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Toffoli (CCNOT) gate.
    Toffoli,
}

impl Gate {
    /// Get the mnemonic of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Gate::Identity => "Identity",
            Gate::Hadamard => "Hadamard",
            Gate::PauliX => "PauliX",
            Gate::PauliY => "PauliY",
            Gate::PauliZ => "PauliZ",
            Gate::S => "S",
            Gate::T => "T",
            Gate::RX => "RX",
            Gate::RY => "RY",
            Gate::RZ => "RZ",
            Gate::PhaseShift => "PhaseShift",
            Gate::CNOT => "CNOT",
            Gate::CZ => "CZ",
            Gate::Swap => "SWAP",
            Gate::Toffoli => "Toffoli",
        }
    }

    /// Look up a gate by mnemonic.
    pub fn from_name(name: &str) -> Option<Self> {
        let gate = match name {
            "Identity" => Gate::Identity,
            "Hadamard" => Gate::Hadamard,
            "PauliX" => Gate::PauliX,
            "PauliY" => Gate::PauliY,
            "PauliZ" => Gate::PauliZ,
            "S" => Gate::S,
            "T" => Gate::T,
            "RX" => Gate::RX,
            "RY" => Gate::RY,
            "RZ" => Gate::RZ,
            "PhaseShift" => Gate::PhaseShift,
            "CNOT" => Gate::CNOT,
            "CZ" => Gate::CZ,
            "SWAP" => Gate::Swap,
            "Toffoli" => Gate::Toffoli,
            _ => return None,
        };
        Some(gate)
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            Gate::Identity
            | Gate::Hadamard
            | Gate::PauliX
            | Gate::PauliY
            | Gate::PauliZ
            | Gate::S
            | Gate::T
            | Gate::RX
            | Gate::RY
            | Gate::RZ
            | Gate::PhaseShift => 1,
            Gate::CNOT | Gate::CZ | Gate::Swap => 2,
            Gate::Toffoli => 3,
        }
    }

    /// Get the number of classical angle parameters this gate takes.
    #[inline]
    pub fn num_params(self) -> u32 {
        match self {
            Gate::RX | Gate::RY | Gate::RZ | Gate::PhaseShift => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_names_round_trip() {
        for gate in [
            Gate::Identity,
            Gate::Hadamard,
            Gate::PauliX,
            Gate::PauliY,
            Gate::PauliZ,
            Gate::S,
            Gate::T,
            Gate::RX,
            Gate::RY,
            Gate::RZ,
            Gate::PhaseShift,
            Gate::CNOT,
            Gate::CZ,
            Gate::Swap,
            Gate::Toffoli,
        ] {
            assert_eq!(Gate::from_name(gate.name()), Some(gate));
        }
    }

    #[test]
    fn test_unknown_mnemonic() {
        assert_eq!(Gate::from_name("Fredkin"), None);
    }

    #[test]
    fn test_arity() {
        assert_eq!(Gate::Hadamard.num_qubits(), 1);
        assert_eq!(Gate::Swap.num_qubits(), 2);
        assert_eq!(Gate::Toffoli.num_qubits(), 3);
        assert_eq!(Gate::RX.num_params(), 1);
        assert_eq!(Gate::S.num_params(), 0);
    }
}
