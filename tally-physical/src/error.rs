//! Error-handling module for the crate

use thiserror::Error;

use crate::{aggregates::operation::AggregateOperation, datatypes::CellKind};

/// Error-Collection for all the possible Errors occurring in this crate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The aggregate operation can never be combined with a weight column
    #[error("aggregation {operation} cannot be combined with a weight column")]
    InvalidCombination {
        /// Operation that was requested with a weight
        operation: AggregateOperation,
    },
    /// The aggregate operation exists but does not implement weighting
    #[error("aggregation {operation} does not support weighting")]
    UnsupportedByFunction {
        /// Operation that was requested with a weight
        operation: AggregateOperation,
    },
    /// The aggregate operation cannot consume values of the given kind
    #[error("aggregation {operation} cannot be applied to values of type {kind}")]
    NotAggregatable {
        /// Requested operation
        operation: AggregateOperation,
        /// Kind of the input column
        kind: CellKind,
    },
    /// The aggregate operation needs an input column but none was bound
    #[error("aggregation {operation} requires an input column")]
    MissingInput {
        /// Requested operation
        operation: AggregateOperation,
    },
    /// A floating point value was NaN
    #[error("the floating point types used in this library do not support NaN")]
    FloatIsNaN,
}
