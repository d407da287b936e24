//! SSA value identities and types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an SSA value within a circuit graph.
///
/// Ids are dense integers assigned at value creation and never reused,
/// so they are usable as stable map keys across graph mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueId(pub u32);

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

impl From<u32> for ValueId {
    fn from(id: u32) -> Self {
        ValueId(id)
    }
}

impl From<usize> for ValueId {
    fn from(id: usize) -> Self {
        ValueId(u32::try_from(id).expect("ValueId overflow: exceeds u32::MAX"))
    }
}

/// The type of an SSA value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// A single qubit.
    Qubit,
    /// A qubit register.
    Register,
    /// A classical bit (e.g. a measurement outcome).
    Bit,
    /// A classical floating-point number (e.g. a rotation angle).
    Float,
}

impl ValueType {
    /// Check if this is the qubit type.
    #[inline]
    pub fn is_qubit(self) -> bool {
        matches!(self, ValueType::Qubit)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Qubit => "qubit",
            ValueType::Register => "register",
            ValueType::Bit => "bit",
            ValueType::Float => "float",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", ValueId(7)), "%7");
        assert_eq!(format!("{}", ValueType::Qubit), "qubit");
    }

    #[test]
    fn test_value_id_from() {
        assert_eq!(ValueId::from(3u32), ValueId(3));
        assert_eq!(ValueId::from(4usize), ValueId(4));
    }
}
