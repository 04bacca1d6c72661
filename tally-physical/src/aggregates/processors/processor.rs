//! Traits for implementing new aggregate operations

use enum_dispatch::enum_dispatch;

use crate::{
    aggregates::operation::AggregateOperation,
    datatypes::{Cell, CellKind, Double},
};

use super::{
    average_aggregate::AverageAggregateGroupProcessor,
    count_aggregate::CountAggregateGroupProcessor, max_aggregate::MaxAggregateGroupProcessor,
    min_aggregate::MinAggregateGroupProcessor, sum_aggregate::SumAggregateGroupProcessor,
};

/// An aggregate operation bound to the kind of its result.
///
/// Creates one [AggregateGroupProcessor] for every group that is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateProcessor {
    operation: AggregateOperation,
    output_kind: CellKind,
}

impl AggregateProcessor {
    /// Only called from [`AggregateOperation::processor`], which validated the combination.
    pub(crate) fn new(operation: AggregateOperation, output_kind: CellKind) -> Self {
        Self {
            operation,
            output_kind,
        }
    }

    /// Return the aggregate operation.
    pub fn operation(&self) -> AggregateOperation {
        self.operation
    }

    /// Return the kind of cells produced by the group processors.
    pub fn output_kind(&self) -> CellKind {
        self.output_kind
    }

    /// Creates a fresh [AggregateGroupProcessor] for aggregating the values of one group.
    pub fn group(&self) -> AggregateGroupProcessorT {
        match (self.operation, self.output_kind) {
            (AggregateOperation::Count, _) => CountAggregateGroupProcessor::new().into(),
            (AggregateOperation::Average, _) => AverageAggregateGroupProcessor::new().into(),
            (AggregateOperation::Sum, CellKind::Int32) => {
                AggregateGroupProcessorT::SumInt32(SumAggregateGroupProcessor::new())
            }
            (AggregateOperation::Sum, CellKind::Int64) => {
                AggregateGroupProcessorT::SumInt64(SumAggregateGroupProcessor::new())
            }
            (AggregateOperation::Sum, _) => {
                AggregateGroupProcessorT::SumDouble(SumAggregateGroupProcessor::new())
            }
            (AggregateOperation::Min, CellKind::Int32) => {
                AggregateGroupProcessorT::MinInt32(MinAggregateGroupProcessor::new())
            }
            (AggregateOperation::Min, CellKind::Int64) => {
                AggregateGroupProcessorT::MinInt64(MinAggregateGroupProcessor::new())
            }
            (AggregateOperation::Min, _) => {
                AggregateGroupProcessorT::MinDouble(MinAggregateGroupProcessor::new())
            }
            (AggregateOperation::Max, CellKind::Int32) => {
                AggregateGroupProcessorT::MaxInt32(MaxAggregateGroupProcessor::new())
            }
            (AggregateOperation::Max, CellKind::Int64) => {
                AggregateGroupProcessorT::MaxInt64(MaxAggregateGroupProcessor::new())
            }
            (AggregateOperation::Max, _) => {
                AggregateGroupProcessorT::MaxDouble(MaxAggregateGroupProcessor::new())
            }
        }
    }
}

/// Allows aggregation of multiple rows (all with the same group-by value) to produce a single aggregate value.
#[enum_dispatch]
pub trait AggregateGroupProcessor {
    /// Processes one row of the aggregated input column and updates the internal state.
    ///
    /// `weight` is [None] for unweighted aggregation and contains the cell of the weight column otherwise.
    fn write_aggregate_input_value(&mut self, value: &Cell, weight: Option<&Cell>);

    /// Returns the resulting aggregated value of all the processed input values.
    fn finish(&self) -> Cell;
}

/// Accumulator of one group, for every supported operation and result kind
#[allow(variant_size_differences)]
#[enum_dispatch(AggregateGroupProcessor)]
#[derive(Debug, Clone, Copy)]
pub enum AggregateGroupProcessorT {
    /// Sum with an [`i32`] result
    SumInt32(SumAggregateGroupProcessor<i32>),
    /// Sum with an [`i64`] result
    SumInt64(SumAggregateGroupProcessor<i64>),
    /// Sum with a [`Double`] result
    SumDouble(SumAggregateGroupProcessor<Double>),
    /// Average
    Average(AverageAggregateGroupProcessor),
    /// Count
    Count(CountAggregateGroupProcessor),
    /// Minimum with an [`i32`] result
    MinInt32(MinAggregateGroupProcessor<i32>),
    /// Minimum with an [`i64`] result
    MinInt64(MinAggregateGroupProcessor<i64>),
    /// Minimum with a [`Double`] result
    MinDouble(MinAggregateGroupProcessor<Double>),
    /// Maximum with an [`i32`] result
    MaxInt32(MaxAggregateGroupProcessor<i32>),
    /// Maximum with an [`i64`] result
    MaxInt64(MaxAggregateGroupProcessor<i64>),
    /// Maximum with a [`Double`] result
    MaxDouble(MaxAggregateGroupProcessor<Double>),
}

#[cfg(test)]
mod test {
    use super::AggregateGroupProcessor;
    use crate::{
        aggregates::operation::AggregateOperation,
        datatypes::{Cell, CellKind},
    };
    use test_log::test;

    #[test]
    fn copied_accumulators_are_independent() {
        let processor = AggregateOperation::Sum
            .processor(Some(CellKind::Int32), false)
            .unwrap();

        let mut first = processor.group();
        first.write_aggregate_input_value(&Cell::Int32(2), None);
        let mut second = first;
        second.write_aggregate_input_value(&Cell::Int32(3), None);

        assert_eq!(first.finish(), Cell::Int32(2));
        assert_eq!(second.finish(), Cell::Int32(5));
    }
}
