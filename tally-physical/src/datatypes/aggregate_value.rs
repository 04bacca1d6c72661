//! Numeric value types in which aggregates are accumulated.

use std::fmt::Debug;

use num::traits::{WrappingAdd, WrappingMul};

use super::{Cell, CellKind, Double};

/// A value in which sum, minimum, and maximum aggregates are computed.
///
/// Implemented for the three result kinds of numeric aggregation:
/// [`i32`] for [`CellKind::Int32`], [`i64`] for [`CellKind::Int64`],
/// and [`Double`] for [`CellKind::Double`].
pub trait AggregateValue: Copy + Debug + Default + PartialOrd + 'static {
    /// Kind of the cells produced from this value
    const KIND: CellKind;

    /// Converts an input cell into this value type.
    ///
    /// Returns [None] for missing cells and cells that are not numerically aggregatable.
    fn from_cell(cell: &Cell) -> Option<Self>;

    /// Addition following the native overflow behavior of this value type.
    fn accumulate(self, other: Self) -> Self;

    /// Multiplication following the native overflow behavior of this value type.
    fn scale(self, factor: Self) -> Self;

    /// Multiplies this value by the value of the cell `weight`.
    ///
    /// Returns [None] if `weight` holds no numeric value.
    fn weighted(self, weight: &Cell) -> Option<Self>;

    /// Wraps this value into a [Cell].
    fn into_cell(self) -> Cell;
}

macro_rules! impl_integer_aggregate_value {
    ($type:ty, $kind:ident, $variant:ident) => {
        impl AggregateValue for $type {
            const KIND: CellKind = CellKind::$kind;

            #[allow(
                trivial_numeric_casts,
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap
            )]
            fn from_cell(cell: &Cell) -> Option<Self> {
                match cell {
                    Cell::Boolean(value) => Some(<$type>::from(*value)),
                    Cell::Int32(value) => Some(*value as $type),
                    Cell::Int64(value) => Some(*value as $type),
                    Cell::Double(value) => Some(value.value() as $type),
                    Cell::Missing | Cell::Text(_) | Cell::Other(_) => None,
                }
            }

            fn accumulate(self, other: Self) -> Self {
                WrappingAdd::wrapping_add(&self, &other)
            }

            fn scale(self, factor: Self) -> Self {
                WrappingMul::wrapping_mul(&self, &factor)
            }

            /// A [`Cell::Double`] weight is applied in floating point,
            /// and the product is truncated toward zero.
            #[allow(
                trivial_numeric_casts,
                clippy::cast_possible_truncation,
                clippy::cast_precision_loss
            )]
            fn weighted(self, weight: &Cell) -> Option<Self> {
                match weight {
                    Cell::Double(weight) => Some((self as f64 * weight.value()) as $type),
                    other => Self::from_cell(other).map(|weight| self.scale(weight)),
                }
            }

            fn into_cell(self) -> Cell {
                Cell::$variant(self)
            }
        }
    };
}

impl_integer_aggregate_value!(i32, Int32, Int32);
impl_integer_aggregate_value!(i64, Int64, Int64);

impl AggregateValue for Double {
    const KIND: CellKind = CellKind::Double;

    fn from_cell(cell: &Cell) -> Option<Self> {
        cell.as_f64().map(Double::from_arithmetic)
    }

    fn accumulate(self, other: Self) -> Self {
        self + other
    }

    fn scale(self, factor: Self) -> Self {
        self * factor
    }

    fn weighted(self, weight: &Cell) -> Option<Self> {
        Self::from_cell(weight).map(|weight| self.scale(weight))
    }

    /// NaN results, such as the sum of both infinities, become [`Cell::Missing`].
    fn into_cell(self) -> Cell {
        if self.value().is_nan() {
            Cell::Missing
        } else {
            Cell::Double(self)
        }
    }
}
