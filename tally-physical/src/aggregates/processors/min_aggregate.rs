//! Computes the minimum of all input values.

use crate::datatypes::{AggregateValue, Cell};

use super::processor::AggregateGroupProcessor;

/// Minimum of one group
#[derive(Debug, Clone, Copy)]
pub struct MinAggregateGroupProcessor<A>
where
    A: AggregateValue,
{
    current_min_value: Option<A>,
}

impl<A: AggregateValue> MinAggregateGroupProcessor<A> {
    pub(crate) fn new() -> Self {
        Self {
            current_min_value: None,
        }
    }
}

impl<A: AggregateValue> AggregateGroupProcessor for MinAggregateGroupProcessor<A> {
    fn write_aggregate_input_value(&mut self, value: &Cell, _weight: Option<&Cell>) {
        let Some(value) = A::from_cell(value) else {
            return;
        };

        match &self.current_min_value {
            Some(current_min_value) => {
                if value < *current_min_value {
                    self.current_min_value = Some(value);
                }
            }
            None => self.current_min_value = Some(value),
        }
    }

    fn finish(&self) -> Cell {
        self.current_min_value
            .map(AggregateValue::into_cell)
            .unwrap_or(Cell::Missing)
    }
}
