//! Computes the arithmetic mean of all input values. Always returns a [Double].

use crate::datatypes::{AggregateValue, Cell, Double};

use super::processor::AggregateGroupProcessor;

/// Average of one group.
///
/// The denominator counts the rows with a present value, also in the weighted case,
/// where rows with a missing weight add nothing to the numerator but still count.
#[derive(Debug, Clone, Copy)]
pub struct AverageAggregateGroupProcessor {
    sum: f64,
    count: u64,
}

impl AverageAggregateGroupProcessor {
    pub(crate) fn new() -> Self {
        Self { sum: 0.0, count: 0 }
    }
}

impl AggregateGroupProcessor for AverageAggregateGroupProcessor {
    fn write_aggregate_input_value(&mut self, value: &Cell, weight: Option<&Cell>) {
        let Some(value) = value.as_f64() else {
            return;
        };

        self.count += 1;

        match weight {
            None => self.sum += value,
            Some(weight) => {
                if let Some(weight) = weight.as_f64() {
                    self.sum += value * weight;
                }
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self) -> Cell {
        if self.count == 0 {
            return Cell::Missing;
        }

        Double::from_arithmetic(self.sum / self.count as f64).into_cell()
    }
}
