//! Binding of configured aggregations to the columns of the input schema

use tally_physical::{
    aggregates::processors::processor::{
        AggregateGroupProcessor, AggregateGroupProcessorT, AggregateProcessor,
    },
    datatypes::Cell,
};

use crate::{
    config::{AggregationConfig, AggregationSpec},
    error::Error,
    table::{ColumnSpec, Record, Schema},
};

/// Cell used for positions that are not present in a record
static MISSING: Cell = Cell::Missing;

/// An aggregate operation bound to the positions of its input columns
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoundAggregate {
    processor: AggregateProcessor,
    value_index: Option<usize>,
    weight_index: Option<usize>,
}

/// Looks up the position of the column `name`.
fn position(schema: &Schema, name: &str) -> Result<usize, Error> {
    schema.find(name).map(|(index, _)| index).ok_or_else(|| {
        Error::InvalidConfiguration(format!(
            "Input table does not contain the configured column: {name}"
        ))
    })
}

impl BoundAggregate {
    /// Create the operator for `spec` on the input `schema`.
    ///
    /// # Errors
    /// Returns an error if a column does not exist,
    /// or if the aggregate operation cannot be applied to the column or weight.
    pub(crate) fn bind(spec: &AggregationSpec, schema: &Schema) -> Result<Self, Error> {
        let operation = spec.operation();

        let value = match spec.column() {
            Some(column) if operation.reads_input() => {
                let index = position(schema, column)?;
                Some((index, schema.columns()[index].kind()))
            }
            _ => None,
        };
        let processor =
            operation.processor(value.map(|(_, kind)| kind), spec.weight().is_some())?;

        let weight_index = spec
            .weight()
            .map(|weight| position(schema, weight))
            .transpose()?;

        log::debug!(
            "bound {spec} to input column {:?} and weight column {weight_index:?}",
            value.map(|(index, _)| index)
        );

        Ok(Self {
            processor,
            value_index: value.map(|(index, _)| index),
            weight_index,
        })
    }

    /// Create a fresh accumulator for this operator.
    pub(crate) fn accumulator(&self) -> AggregateGroupProcessorT {
        self.processor.group()
    }

    /// Feed the relevant cells of `record` into `accumulator`.
    pub(crate) fn consume(&self, accumulator: &mut AggregateGroupProcessorT, record: &Record) {
        let value = self
            .value_index
            .and_then(|index| record.get(index))
            .unwrap_or(&MISSING);
        let weight = self
            .weight_index
            .map(|index| record.get(index).unwrap_or(&MISSING));

        accumulator.write_aggregate_input_value(value, weight);
    }
}

/// The accumulators of one group, one per output column
pub(crate) type AccumulatorRow = Vec<AggregateGroupProcessorT>;

/// All bound operators of a configuration in output order.
///
/// All count aggregations share a single operator,
/// placed at the position of the first count aggregation.
#[derive(Debug, Clone)]
pub(crate) struct OperatorLayout {
    operators: Vec<BoundAggregate>,
    columns: Vec<ColumnSpec>,
}

impl OperatorLayout {
    /// Bind all aggregations of `config` to `schema`.
    ///
    /// If the schema has no columns, only the count column remains.
    ///
    /// # Errors
    /// Returns an error if any operator cannot be created.
    pub(crate) fn bind(config: &AggregationConfig, schema: &Schema) -> Result<Self, Error> {
        let mut operators = Vec::new();
        let mut columns = Vec::new();
        let mut has_count = false;

        for spec in config.aggregations() {
            let counting = !spec.operation().reads_input();

            if schema.is_empty() && !counting {
                log::debug!("dropping {spec} on a table without columns");
                continue;
            }

            let operator = BoundAggregate::bind(spec, schema)?;

            if counting {
                if has_count {
                    continue;
                }
                has_count = true;
            }

            columns.push(ColumnSpec::new(
                spec.output_name(),
                operator.processor.output_kind(),
            ));
            operators.push(operator);
        }

        Ok(Self { operators, columns })
    }

    /// Return the output columns, one per operator.
    pub(crate) fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Create a fresh row of accumulators.
    pub(crate) fn accumulators(&self) -> AccumulatorRow {
        self.operators
            .iter()
            .map(BoundAggregate::accumulator)
            .collect()
    }

    /// Feed `record` into every accumulator of `row`.
    pub(crate) fn consume(&self, row: &mut AccumulatorRow, record: &Record) {
        for (operator, accumulator) in self.operators.iter().zip(row.iter_mut()) {
            operator.consume(accumulator, record);
        }
    }

    /// Compute the result cells of `row`.
    pub(crate) fn finish(row: &AccumulatorRow) -> Vec<Cell> {
        row.iter().map(AggregateGroupProcessor::finish).collect()
    }
}

#[cfg(test)]
mod test {
    use super::{BoundAggregate, OperatorLayout};
    use crate::{
        config::{AggregationConfig, AggregationSpec},
        error::Error,
        table::{ColumnSpec, Schema},
    };
    use tally_physical::{
        aggregates::operation::AggregateOperation,
        datatypes::{Cell, CellKind},
        error::Error as PhysicalError,
    };
    use test_log::test;

    fn schema() -> Schema {
        Schema::new(vec![
            ColumnSpec::new("flag", CellKind::Boolean),
            ColumnSpec::new("value", CellKind::Int64),
            ColumnSpec::new("weight", CellKind::Double),
            ColumnSpec::new("label", CellKind::Text),
        ])
        .unwrap()
    }

    #[test]
    fn weighting_errors() {
        let count = BoundAggregate::bind(&AggregationSpec::count("value").weighted_by("weight"), &schema());
        assert!(matches!(
            count,
            Err(Error::Operator(PhysicalError::InvalidCombination {
                operation: AggregateOperation::Count
            }))
        ));

        let min = BoundAggregate::bind(&AggregationSpec::min("value").weighted_by("weight"), &schema());
        assert!(matches!(
            min,
            Err(Error::Operator(PhysicalError::UnsupportedByFunction {
                operation: AggregateOperation::Min
            }))
        ));
    }

    #[test]
    fn counts_collapse() {
        let config = AggregationConfig::new()
            .aggregate(AggregationSpec::sum("flag"))
            .aggregate(AggregationSpec::count("value"))
            .aggregate(AggregationSpec::average("value"))
            .aggregate(AggregationSpec::count("label"));
        let layout = OperatorLayout::bind(&config, &schema()).unwrap();

        assert_eq!(
            layout.columns(),
            &[
                ColumnSpec::new("Sum(flag)", CellKind::Int32),
                ColumnSpec::new("Count", CellKind::Int64),
                ColumnSpec::new("Average(value)", CellKind::Double),
            ]
        );
    }

    #[test]
    fn consume_and_finish() {
        let config = AggregationConfig::new()
            .aggregate(AggregationSpec::sum("value").weighted_by("weight"))
            .aggregate(AggregationSpec::count_rows())
            .aggregate(AggregationSpec::max("flag"));
        let layout = OperatorLayout::bind(&config, &schema()).unwrap();

        let mut row = layout.accumulators();
        layout.consume(
            &mut row,
            &vec![
                Cell::Boolean(false),
                Cell::Int64(3),
                Cell::Double(tally_physical::datatypes::Double::new(2.0).unwrap()),
                Cell::from("a"),
            ],
        );
        // short records are padded with missing cells
        layout.consume(&mut row, &vec![Cell::Boolean(true)]);

        assert_eq!(
            OperatorLayout::finish(&row),
            vec![Cell::Int64(6), Cell::Int64(2), Cell::Int32(1)]
        );
    }

    #[test]
    fn empty_schema_keeps_count() {
        let config = AggregationConfig::new()
            .aggregate(AggregationSpec::sum("value"))
            .aggregate(AggregationSpec::count("value"));
        let layout = OperatorLayout::bind(&config, &Schema::default()).unwrap();

        assert_eq!(layout.columns(), &[ColumnSpec::new("Count", CellKind::Int64)]);
        assert_eq!(
            OperatorLayout::finish(&layout.accumulators()),
            vec![Cell::Int64(0)]
        );
    }
}
