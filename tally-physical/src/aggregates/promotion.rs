//! Static type promotion of aggregate operations.
//!
//! The kind of every aggregate result is looked up in [PROMOTION_TABLE]
//! from the operation and the kind of the aggregated column.

use crate::datatypes::{cell_kind::NUM_AGGREGATABLE_KINDS, CellKind};

use super::operation::{AggregateOperation, NUM_OPERATIONS};

use CellKind::{Double, Int32, Int64};

/// Output kind per operation (rows, in the order of [AggregateOperation])
/// and aggregatable input kind (columns: Boolean, Int32, Int64, Double).
const PROMOTION_TABLE: [[CellKind; NUM_AGGREGATABLE_KINDS]; NUM_OPERATIONS] = [
    // Sum
    [Int32, Int32, Int64, Double],
    // Average
    [Double, Double, Double, Double],
    // Count
    [Int64, Int64, Int64, Int64],
    // Min
    [Int32, Int32, Int64, Double],
    // Max
    [Int32, Int32, Int64, Double],
];

/// Returns the kind of the result of `operation` applied to a column of kind `input`,
/// or [None] if columns of that kind cannot be aggregated.
pub fn promoted_kind(operation: AggregateOperation, input: CellKind) -> Option<CellKind> {
    let column = input.aggregatable_order()?;
    Some(PROMOTION_TABLE[operation.order()][column])
}

#[cfg(test)]
mod test {
    use super::promoted_kind;
    use crate::{aggregates::operation::AggregateOperation, datatypes::CellKind};
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn boolean_promotes_to_int32() {
        assert_eq!(
            promoted_kind(AggregateOperation::Sum, CellKind::Boolean),
            Some(CellKind::Int32)
        );
        assert_eq!(
            promoted_kind(AggregateOperation::Min, CellKind::Boolean),
            Some(CellKind::Int32)
        );
    }

    #[test]
    fn kind_preservation() {
        for kind in [CellKind::Int32, CellKind::Int64, CellKind::Double] {
            assert_eq!(promoted_kind(AggregateOperation::Sum, kind), Some(kind));
            assert_eq!(promoted_kind(AggregateOperation::Max, kind), Some(kind));
            assert_eq!(
                promoted_kind(AggregateOperation::Average, kind),
                Some(CellKind::Double)
            );
        }
    }

    #[test]
    fn not_aggregatable() {
        for operation in AggregateOperation::iter() {
            assert_eq!(promoted_kind(operation, CellKind::Text), None);
            assert_eq!(promoted_kind(operation, CellKind::Other), None);
        }
    }

    #[test]
    fn static_output_kinds_agree() {
        for operation in AggregateOperation::iter() {
            if let Some(kind) = operation.static_output_kind() {
                for input in [
                    CellKind::Boolean,
                    CellKind::Int32,
                    CellKind::Int64,
                    CellKind::Double,
                ] {
                    assert_eq!(promoted_kind(operation, input), Some(kind));
                }
            }
        }
    }
}
