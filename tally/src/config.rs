//! Configuration of an aggregation: grouping column, aggregated columns, and requested outputs.

use std::{fmt::Display, str::FromStr};

use tally_physical::aggregates::operation::{AggregateOperation, UnknownAggregateOperation};

/// Token standing for "no column selected", as left behind by unresolved selections
pub const NO_SELECTION: &str = "<none>";

/// Name of the single output column of all [`AggregateOperation::Count`] aggregations
pub const COUNT_COLUMN_NAME: &str = "Count";

/// One aggregated ("frequency") column together with its aggregate operation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationSpec {
    operation: AggregateOperation,
    column: Option<String>,
    weight: Option<String>,
}

impl AggregationSpec {
    /// Create a new [AggregationSpec] aggregating `column` with `operation`.
    pub fn new(operation: AggregateOperation, column: impl Into<String>) -> Self {
        Self {
            operation,
            column: Some(column.into()),
            weight: None,
        }
    }

    /// Create a new sum [AggregationSpec].
    pub fn sum(column: impl Into<String>) -> Self {
        Self::new(AggregateOperation::Sum, column)
    }

    /// Create a new average [AggregationSpec].
    pub fn average(column: impl Into<String>) -> Self {
        Self::new(AggregateOperation::Average, column)
    }

    /// Create a new count [AggregationSpec].
    pub fn count(column: impl Into<String>) -> Self {
        Self::new(AggregateOperation::Count, column)
    }

    /// Create a new count [AggregationSpec] that does not refer to a column.
    pub fn count_rows() -> Self {
        Self {
            operation: AggregateOperation::Count,
            column: None,
            weight: None,
        }
    }

    /// Create a new min [AggregationSpec].
    pub fn min(column: impl Into<String>) -> Self {
        Self::new(AggregateOperation::Min, column)
    }

    /// Create a new max [AggregationSpec].
    pub fn max(column: impl Into<String>) -> Self {
        Self::new(AggregateOperation::Max, column)
    }

    /// Multiply the aggregated values with the values of the `weight` column.
    pub fn weighted_by(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Return the aggregate operation.
    pub fn operation(&self) -> AggregateOperation {
        self.operation
    }

    /// Return the name of the aggregated column.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Return the name of the weight column.
    pub fn weight(&self) -> Option<&str> {
        self.weight.as_deref()
    }

    /// Return whether the aggregated column is the unresolved placeholder [NO_SELECTION].
    pub fn is_placeholder(&self) -> bool {
        self.column.as_deref() == Some(NO_SELECTION)
    }

    /// Return the name of the output column produced by this aggregation.
    pub fn output_name(&self) -> String {
        match (self.operation, &self.column) {
            (AggregateOperation::Count, _) | (_, None) => COUNT_COLUMN_NAME.to_string(),
            (operation, Some(column)) => format!("{operation}({column})"),
        }
    }
}

impl Display for AggregationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.column {
            Some(column) => write!(f, "{}:{column}", self.operation)?,
            None => write!(f, "{}", self.operation)?,
        }

        if let Some(weight) = &self.weight {
            write!(f, " weighted by {weight}")?;
        }

        Ok(())
    }
}

impl FromStr for AggregationSpec {
    type Err = UnknownAggregateOperation;

    /// Parses `operation:column` or, for counting rows, just `count`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((operation, column)) => Ok(Self::new(operation.trim().parse()?, column)),
            None => match s.trim().parse()? {
                AggregateOperation::Count => Ok(Self::count_rows()),
                _ => Err(UnknownAggregateOperation(s.to_string())),
            },
        }
    }
}

/// Configuration of an aggregation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationConfig {
    grouping_column: Option<String>,
    aggregations: Vec<AggregationSpec>,
    grand_totals: bool,
}

impl AggregationConfig {
    /// Create a new empty [AggregationConfig].
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the rows by the values of `column`.
    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.grouping_column = Some(column.into());
        self
    }

    /// Add an aggregation.
    pub fn aggregate(mut self, spec: AggregationSpec) -> Self {
        self.aggregations.push(spec);
        self
    }

    /// Set whether the grand totals are requested as a separate output.
    /// Only has an effect if a grouping column is configured.
    pub fn grand_totals(mut self, grand_totals: bool) -> Self {
        self.grand_totals = grand_totals;
        self
    }

    /// Return the grouping column.
    pub fn grouping_column(&self) -> Option<&str> {
        self.grouping_column.as_deref()
    }

    /// Return the configured aggregations in order.
    pub fn aggregations(&self) -> &[AggregationSpec] {
        &self.aggregations
    }

    /// Return whether grand totals are requested.
    pub fn totals_requested(&self) -> bool {
        self.grand_totals
    }

    /// Return the names of all aggregated columns, in configured order.
    pub fn frequency_columns(&self) -> impl Iterator<Item = &str> {
        self.aggregations.iter().filter_map(AggregationSpec::column)
    }
}
