//! Count the input rows. Always returns an [i64], independent of the input value type.

use crate::datatypes::Cell;

use super::processor::AggregateGroupProcessor;

/// Occurrence count of one group.
///
/// Every row is counted, missing values included.
#[derive(Debug, Clone, Copy)]
pub struct CountAggregateGroupProcessor {
    current_count: i64,
}

impl CountAggregateGroupProcessor {
    pub(crate) fn new() -> Self {
        Self { current_count: 0 }
    }
}

impl AggregateGroupProcessor for CountAggregateGroupProcessor {
    fn write_aggregate_input_value(&mut self, _value: &Cell, _weight: Option<&Cell>) {
        self.current_count = self.current_count.wrapping_add(1);
    }

    fn finish(&self) -> Cell {
        Cell::Int64(self.current_count)
    }
}
