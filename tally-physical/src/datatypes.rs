//! This module collects functionality specific to the supported cell types.

/// Module for defining [CellKind]
pub mod cell_kind;
pub use cell_kind::CellKind;
/// Module for defining [Cell]
pub mod cell;
pub use cell::Cell;
/// Module for defining [Double]
pub mod double;
pub use double::Double;
/// Module for defining [AggregateValue]
pub mod aggregate_value;
pub use aggregate_value::AggregateValue;
