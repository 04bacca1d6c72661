//! Computes the maximum of all input values.

use crate::datatypes::{AggregateValue, Cell};

use super::processor::AggregateGroupProcessor;

/// Maximum of one group
#[derive(Debug, Clone, Copy)]
pub struct MaxAggregateGroupProcessor<A>
where
    A: AggregateValue,
{
    current_max_value: Option<A>,
}

impl<A: AggregateValue> MaxAggregateGroupProcessor<A> {
    pub(crate) fn new() -> Self {
        Self {
            current_max_value: None,
        }
    }
}

impl<A: AggregateValue> AggregateGroupProcessor for MaxAggregateGroupProcessor<A> {
    fn write_aggregate_input_value(&mut self, value: &Cell, _weight: Option<&Cell>) {
        let Some(value) = A::from_cell(value) else {
            return;
        };

        match &self.current_max_value {
            Some(current_max_value) => {
                if value > *current_max_value {
                    self.current_max_value = Some(value);
                }
            }
            None => self.current_max_value = Some(value),
        }
    }

    fn finish(&self) -> Cell {
        self.current_max_value
            .map(AggregateValue::into_cell)
            .unwrap_or(Cell::Missing)
    }
}
