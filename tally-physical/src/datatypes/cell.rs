use std::fmt::Display;

use super::{CellKind, Double};

/// Enum for a single value of a table.
///
/// Ord and PartialOrd assume Missing < Boolean < Int32 < Int64 < Double < Text < Other.
/// Within a column all present values share one kind,
/// so this orders a column with missing values first, followed by its values in natural order.
#[allow(variant_size_differences)]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Cell {
    /// No value
    #[default]
    Missing,
    /// A value of kind [`CellKind::Boolean`]
    Boolean(bool),
    /// A value of kind [`CellKind::Int32`]
    Int32(i32),
    /// A value of kind [`CellKind::Int64`]
    Int64(i64),
    /// A value of kind [`CellKind::Double`]
    Double(Double),
    /// A value of kind [`CellKind::Text`]
    Text(String),
    /// A value of kind [`CellKind::Other`], kept in its textual representation
    Other(String),
}

impl Cell {
    /// Returns the kind of the value, or [None] if the cell is missing.
    pub fn kind(&self) -> Option<CellKind> {
        match self {
            Cell::Missing => None,
            Cell::Boolean(_) => Some(CellKind::Boolean),
            Cell::Int32(_) => Some(CellKind::Int32),
            Cell::Int64(_) => Some(CellKind::Int64),
            Cell::Double(_) => Some(CellKind::Double),
            Cell::Text(_) => Some(CellKind::Text),
            Cell::Other(_) => Some(CellKind::Other),
        }
    }

    /// Returns true iff this cell holds no value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Returns the value of a numerically aggregatable cell as [f64].
    ///
    /// Booleans are interpreted as `0` and `1`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Boolean(value) => Some(if *value { 1.0 } else { 0.0 }),
            Cell::Int32(value) => Some(f64::from(*value)),
            Cell::Int64(value) => Some(*value as f64),
            Cell::Double(value) => Some(value.value()),
            Cell::Missing | Cell::Text(_) | Cell::Other(_) => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Missing => write!(f, "?"),
            Cell::Boolean(value) => write!(f, "{value}"),
            Cell::Int32(value) => write!(f, "{value}"),
            Cell::Int64(value) => write!(f, "{value}"),
            Cell::Double(value) => write!(f, "{value}"),
            Cell::Text(value) | Cell::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Boolean(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int32(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int64(value)
    }
}

impl From<Double> for Cell {
    fn from(value: Double) -> Self {
        Cell::Double(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Missing)
    }
}

#[cfg(test)]
mod test {
    use super::Cell;
    use crate::datatypes::{CellKind, Double};
    use test_log::test;

    #[test]
    fn missing_sorts_first() {
        let mut cells = vec![
            Cell::from("b"),
            Cell::Missing,
            Cell::from("a"),
            Cell::from("ab"),
        ];
        cells.sort();

        assert_eq!(
            cells,
            vec![
                Cell::Missing,
                Cell::from("a"),
                Cell::from("ab"),
                Cell::from("b")
            ]
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(Cell::Missing.kind(), None);
        assert_eq!(Cell::from(true).kind(), Some(CellKind::Boolean));
        assert_eq!(
            Cell::from(Double::new(1.5).unwrap()).kind(),
            Some(CellKind::Double)
        );
        assert_eq!(Cell::from(None::<i64>), Cell::Missing);
        assert_eq!(Cell::from(Some(3i64)), Cell::Int64(3));
    }
}
