use std::fmt::Display;

/// Number of kinds that can be aggregated numerically
pub(crate) const NUM_AGGREGATABLE_KINDS: usize = 4;

/// Descriptors to refer to the declared type of a column at runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum CellKind {
    /// Data type [`bool`]
    Boolean,
    /// Data type [`i32`]
    Int32,
    /// Data type [`i64`]
    Int64,
    /// Data type [`super::Double`]
    Double,
    /// Character data
    Text,
    /// Any other type, e.g. complex numbers or fuzzy intervals.
    /// Such types may look numeric, but are never aggregated.
    Other,
}

impl CellKind {
    /// Returns a number that corresponds to the position of this [CellKind]
    /// among the numerically aggregatable kinds, or [None] if the kind cannot be aggregated.
    pub(crate) fn aggregatable_order(&self) -> Option<usize> {
        match self {
            CellKind::Boolean => Some(0),
            CellKind::Int32 => Some(1),
            CellKind::Int64 => Some(2),
            CellKind::Double => Some(3),
            CellKind::Text | CellKind::Other => None,
        }
    }

    /// Returns whether values of this kind can be summed, averaged, or compared numerically.
    pub fn is_aggregatable(&self) -> bool {
        self.aggregatable_order().is_some()
    }
}

impl Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellKind::Boolean => write!(f, "Boolean"),
            CellKind::Int32 => write!(f, "Int32"),
            CellKind::Int64 => write!(f, "Int64"),
            CellKind::Double => write!(f, "Double"),
            CellKind::Text => write!(f, "Text"),
            CellKind::Other => write!(f, "Other"),
        }
    }
}
