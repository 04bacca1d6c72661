//! Classification of columns into candidates for aggregation and weighting.
//!
//! The classification only looks at the declared kind of a column.
//! It is used when choosing columns for a configuration and is not repeated for every row.

use crate::table::{ColumnSpec, Schema};

/// Returns whether the values of `column` can be aggregated numerically.
///
/// This is the case for booleans, integers and doubles.
/// Text and other numeric-like kinds, e.g. complex numbers, are excluded.
pub fn is_aggregatable(column: &ColumnSpec) -> bool {
    column.kind().is_aggregatable()
}

/// Returns whether `column` can serve as weight column.
pub fn is_weight_candidate(column: &ColumnSpec) -> bool {
    column.kind().is_aggregatable()
}

/// Returns all columns of `schema` that can be aggregated, in schema order.
pub fn aggregatable_columns(schema: &Schema) -> Vec<&ColumnSpec> {
    schema
        .columns()
        .iter()
        .filter(|column| is_aggregatable(column))
        .collect()
}

/// Returns all columns of `schema` that can serve as weight column, in schema order.
pub fn weight_candidates(schema: &Schema) -> Vec<&ColumnSpec> {
    schema
        .columns()
        .iter()
        .filter(|column| is_weight_candidate(column))
        .collect()
}
