//! Computes the sum of all input values.

use crate::datatypes::{AggregateValue, Cell};

use super::processor::AggregateGroupProcessor;

/// Sum of one group, computed in the value type `A` of the result.
///
/// Stays [None] until the first row contributes, so that groups without
/// any present value produce [`Cell::Missing`].
#[derive(Debug, Clone, Copy)]
pub struct SumAggregateGroupProcessor<A>
where
    A: AggregateValue,
{
    current_sum: Option<A>,
}

impl<A: AggregateValue> SumAggregateGroupProcessor<A> {
    pub(crate) fn new() -> Self {
        Self { current_sum: None }
    }
}

impl<A: AggregateValue> AggregateGroupProcessor for SumAggregateGroupProcessor<A> {
    fn write_aggregate_input_value(&mut self, value: &Cell, weight: Option<&Cell>) {
        let Some(value) = A::from_cell(value) else {
            return;
        };

        // Weighted rows only contribute if the weight is present as well
        let contribution = match weight {
            None => value,
            Some(weight) => match value.weighted(weight) {
                Some(contribution) => contribution,
                None => return,
            },
        };

        self.current_sum = Some(match self.current_sum {
            Some(current_sum) => current_sum.accumulate(contribution),
            None => contribution,
        });
    }

    fn finish(&self) -> Cell {
        self.current_sum
            .map(AggregateValue::into_cell)
            .unwrap_or(Cell::Missing)
    }
}
