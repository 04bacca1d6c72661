//! The aggregation engine: validation, binding, the single scan, and the construction of the outputs

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    config::AggregationConfig,
    error::Error,
    group_table::{GrandTotal, GroupTable},
    operators::OperatorLayout,
    router::{aggregated_schema, route, totals_schema, OutputShape},
    table::{Record, Schema, Table},
    validator::validate,
};

/// Cooperative cancellation, checked once before every row of the scan
pub trait CancellationCheck {
    /// Return whether the execution should stop.
    fn is_cancelled(&self) -> bool;
}

impl CancellationCheck for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// [CancellationCheck] for executions that run to completion
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationCheck for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Result of an aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationOutput {
    /// One row per group, or a single row without grouping; [None] if inactive
    pub aggregated: Option<Table>,
    /// The grand total as a separate table; [None] if inactive
    pub totals: Option<Table>,
    /// Warnings that did not prevent the execution
    pub warnings: Vec<String>,
}

/// Computes aggregates per group and over the whole input in a single pass
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    config: AggregationConfig,
}

impl AggregationEngine {
    /// Create a new [AggregationEngine].
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Return the configuration of this engine.
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Aggregate the rows of an in-memory table.
    pub fn execute_table(&self, table: &Table) -> Result<AggregationOutput, Error> {
        self.execute(table.schema(), table.rows().iter().cloned().map(Ok), &NeverCancel)
    }

    /// Aggregate `rows`, which conform to `schema`.
    ///
    /// The configuration is validated and all aggregations are bound before the first row is read.
    /// Rows are consumed exactly once.
    ///
    /// # Errors
    /// Returns an error if the configuration does not fit `schema`, if an aggregation cannot be created,
    /// if reading a row fails, or if `cancel` reports a cancellation.
    /// No partial results are returned in these cases.
    pub fn execute<I, C>(
        &self,
        schema: &Schema,
        rows: I,
        cancel: &C,
    ) -> Result<AggregationOutput, Error>
    where
        I: IntoIterator<Item = Result<Record, Error>>,
        C: CancellationCheck + ?Sized,
    {
        let warnings = validate(&self.config, schema)?;
        let layout = OperatorLayout::bind(&self.config, schema)?;

        let grouping = match self.config.grouping_column() {
            Some(name) if !schema.is_empty() => Some(schema.find(name).ok_or_else(|| {
                Error::InvalidConfiguration(format!(
                    "Input table does not contain the configured column: {name}"
                ))
            })?),
            _ => None,
        };

        let maintain_total = grouping.is_none() || self.config.totals_requested();
        let mut groups = grouping.map(|(index, _)| GroupTable::new(Some(index)));
        let mut total = GrandTotal::default();

        log::info!("Aggregating input {schema} ...");

        let mut row_count: u64 = 0;
        for record in rows {
            if cancel.is_cancelled() {
                log::info!("Aggregation cancelled after {row_count} rows");
                return Err(Error::Cancelled);
            }

            let record = record?;

            if let Some(groups) = groups.as_mut() {
                groups.consume(&layout, &record);
            }
            if maintain_total {
                total.consume(&layout, &record);
            }

            row_count += 1;
        }

        log::info!(
            "Aggregated {row_count} rows into {} groups",
            groups.as_ref().map(GroupTable::len).unwrap_or(1)
        );

        let routing = route(
            grouping.is_some(),
            self.config.totals_requested(),
            row_count == 0,
        );
        log::debug!("{routing:?}");

        let aggregated_schema =
            aggregated_schema(grouping.map(|(_, column)| column), layout.columns());
        let aggregated = match routing.aggregated {
            OutputShape::Groups => {
                let rows = groups
                    .map(GroupTable::into_sorted)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(key, accumulators)| {
                        key.cell()
                            .cloned()
                            .into_iter()
                            .chain(OperatorLayout::finish(&accumulators))
                            .collect()
                    })
                    .collect();
                Some(Table::with_rows(aggregated_schema, rows))
            }
            OutputShape::SingleRow => Some(Table::with_rows(
                aggregated_schema,
                vec![total.finish(&layout)],
            )),
            OutputShape::Empty => Some(Table::new(aggregated_schema)),
            OutputShape::Inactive => None,
        };

        let totals = routing.totals.is_active().then(|| {
            Table::with_rows(totals_schema(layout.columns()), vec![total.finish(&layout)])
        });

        Ok(AggregationOutput {
            aggregated,
            totals,
            warnings,
        })
    }
}
