//! Exposes supported aggregate operations and allows creating the associated processors

use std::{fmt::Display, str::FromStr};

use strum_macros::EnumIter;

use crate::{datatypes::CellKind, error::Error};

use super::{processors::processor::AggregateProcessor, promotion::promoted_kind};

/// Number of supported aggregate operations
pub(crate) const NUM_OPERATIONS: usize = 5;

/// How an aggregate operation reacts to a weight column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightSupport {
    /// Each value is multiplied by the weight of its row
    Weighted,
    /// The operation could be weighted in principle, but this is not implemented
    Unsupported,
    /// Weighting is meaningless for this operation
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
/// Aggregate operations supported by the physical layer
pub enum AggregateOperation {
    /// Sum of all values
    Sum,
    /// Arithmetic mean of all values
    Average,
    /// Count of rows
    Count,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
}

impl AggregateOperation {
    /// Returns a number that corresponds to the position of the operation in the defining enum.
    pub(crate) fn order(&self) -> usize {
        match self {
            AggregateOperation::Sum => 0,
            AggregateOperation::Average => 1,
            AggregateOperation::Count => 2,
            AggregateOperation::Min => 3,
            AggregateOperation::Max => 4,
        }
    }

    /// Name of the operation, as used in output column names
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOperation::Sum => "Sum",
            AggregateOperation::Average => "Average",
            AggregateOperation::Count => "Count",
            AggregateOperation::Min => "Min",
            AggregateOperation::Max => "Max",
        }
    }

    /// Returns how this operation treats weight columns.
    pub fn weight_support(&self) -> WeightSupport {
        match self {
            AggregateOperation::Sum | AggregateOperation::Average => WeightSupport::Weighted,
            AggregateOperation::Count => WeightSupport::Never,
            AggregateOperation::Min | AggregateOperation::Max => WeightSupport::Unsupported,
        }
    }

    /// Returns whether the operation always produces an output cell of the same kind.
    /// If [`Some`] is returned, this is the static output kind of the operation.
    /// If [`None`] is returned, the output kind depends on the input kind.
    pub fn static_output_kind(&self) -> Option<CellKind> {
        match self {
            AggregateOperation::Count => Some(CellKind::Int64),
            AggregateOperation::Average => Some(CellKind::Double),
            _ => None,
        }
    }

    /// Returns whether the operation reads the values of its input column.
    pub fn reads_input(&self) -> bool {
        !matches!(self, AggregateOperation::Count)
    }

    /// Creates a new aggregate processor for the given aggregate operation.
    ///
    /// `input_kind` is the kind of the aggregated column; it may be [None] for [`AggregateOperation::Count`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidCombination`] if `weighted` is requested for an operation that can never be weighted
    /// and [`Error::UnsupportedByFunction`] if the operation does not implement weighting.
    /// Returns [`Error::NotAggregatable`] or [`Error::MissingInput`] if the input kind is not suitable.
    pub fn processor(
        &self,
        input_kind: Option<CellKind>,
        weighted: bool,
    ) -> Result<AggregateProcessor, Error> {
        if weighted {
            match self.weight_support() {
                WeightSupport::Weighted => {}
                WeightSupport::Never => {
                    return Err(Error::InvalidCombination { operation: *self })
                }
                WeightSupport::Unsupported => {
                    return Err(Error::UnsupportedByFunction { operation: *self })
                }
            }
        }

        let output_kind = match (self.reads_input(), self.static_output_kind(), input_kind) {
            (false, Some(kind), _) => kind,
            (_, _, None) => return Err(Error::MissingInput { operation: *self }),
            (_, _, Some(kind)) => promoted_kind(*self, kind).ok_or(Error::NotAggregatable {
                operation: *self,
                kind,
            })?,
        };

        log::debug!(
            "creating {self} processor for input {input_kind:?} (weighted: {weighted}) with output {output_kind}"
        );

        Ok(AggregateProcessor::new(*self, output_kind))
    }
}

impl Display for AggregateOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown aggregate operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown aggregation \"{0}\"")]
pub struct UnknownAggregateOperation(pub String);

impl FromStr for AggregateOperation {
    type Err = UnknownAggregateOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregateOperation::Sum),
            "average" | "avg" | "mean" => Ok(AggregateOperation::Average),
            "count" => Ok(AggregateOperation::Count),
            "min" | "minimum" => Ok(AggregateOperation::Min),
            "max" | "maximum" => Ok(AggregateOperation::Max),
            _ => Err(UnknownAggregateOperation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{AggregateOperation, NUM_OPERATIONS};
    use crate::{datatypes::CellKind, error::Error};
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn order_matches_enum() {
        assert_eq!(AggregateOperation::iter().count(), NUM_OPERATIONS);
        for (index, operation) in AggregateOperation::iter().enumerate() {
            assert_eq!(operation.order(), index);
        }
    }

    #[test]
    fn weighting() {
        assert_eq!(
            AggregateOperation::Count
                .processor(None, true)
                .unwrap_err(),
            Error::InvalidCombination {
                operation: AggregateOperation::Count
            }
        );
        assert_eq!(
            AggregateOperation::Min
                .processor(Some(CellKind::Int32), true)
                .unwrap_err(),
            Error::UnsupportedByFunction {
                operation: AggregateOperation::Min
            }
        );
        assert_eq!(
            AggregateOperation::Max
                .processor(Some(CellKind::Double), true)
                .unwrap_err(),
            Error::UnsupportedByFunction {
                operation: AggregateOperation::Max
            }
        );
        assert!(AggregateOperation::Sum
            .processor(Some(CellKind::Int64), true)
            .is_ok());
        assert!(AggregateOperation::Average
            .processor(Some(CellKind::Boolean), true)
            .is_ok());
    }

    #[test]
    fn input_kinds() {
        assert_eq!(
            AggregateOperation::Sum
                .processor(Some(CellKind::Text), false)
                .unwrap_err(),
            Error::NotAggregatable {
                operation: AggregateOperation::Sum,
                kind: CellKind::Text
            }
        );
        assert_eq!(
            AggregateOperation::Min.processor(None, false).unwrap_err(),
            Error::MissingInput {
                operation: AggregateOperation::Min
            }
        );
        assert_eq!(
            AggregateOperation::Count
                .processor(Some(CellKind::Text), false)
                .map(|processor| processor.output_kind()),
            Ok(CellKind::Int64)
        );
        assert_eq!(
            AggregateOperation::Count
                .processor(None, false)
                .map(|processor| processor.output_kind()),
            Ok(CellKind::Int64)
        );
    }

    #[test]
    fn parsing() {
        assert_eq!("SUM".parse(), Ok(AggregateOperation::Sum));
        assert_eq!("mean".parse(), Ok(AggregateOperation::Average));
        assert!("median".parse::<AggregateOperation>().is_err());
    }
}
