//! Decides which outputs an aggregation produces and in which shape.
//!
//! There are two logical outputs:
//! * the aggregated output, with one row per group, or a single row over the whole input if no grouping column is configured
//! * the totals output, with the grand total over the whole input, which only exists if a grouping column is configured and totals are requested
//!
//! | grouping | totals | empty input | aggregated    | totals       |
//! |----------|--------|-------------|---------------|--------------|
//! | yes      | yes    | yes         | [Empty]       | [SingleRow]  |
//! | yes      | yes    | no          | [Groups]      | [SingleRow]  |
//! | yes      | no     | yes         | [Empty]       | [Inactive]   |
//! | yes      | no     | no          | [Groups]      | [Inactive]   |
//! | no       | any    | yes         | [SingleRow]   | [Inactive]   |
//! | no       | any    | no          | [SingleRow]   | [Inactive]   |
//!
//! [Empty]: OutputShape::Empty
//! [Groups]: OutputShape::Groups
//! [SingleRow]: OutputShape::SingleRow
//! [Inactive]: OutputShape::Inactive

use crate::table::{ColumnSpec, Schema};

/// Shape of one logical output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// One row per group, sorted by group key
    Groups,
    /// Exactly one row; over an empty input all aggregated cells are missing and counts are zero
    SingleRow,
    /// A table without rows
    Empty,
    /// The output is not produced at all
    Inactive,
}

impl OutputShape {
    /// Return whether the output is produced.
    pub fn is_active(&self) -> bool {
        !matches!(self, OutputShape::Inactive)
    }
}

/// Shapes of both outputs of an aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routing {
    /// Shape of the aggregated output
    pub aggregated: OutputShape,
    /// Shape of the totals output
    pub totals: OutputShape,
}

/// Computes the shapes of the outputs.
pub fn route(grouping: bool, totals_requested: bool, input_empty: bool) -> Routing {
    let aggregated = match (grouping, input_empty) {
        (true, true) => OutputShape::Empty,
        (true, false) => OutputShape::Groups,
        (false, _) => OutputShape::SingleRow,
    };

    let totals = if grouping && totals_requested {
        OutputShape::SingleRow
    } else {
        OutputShape::Inactive
    };

    Routing { aggregated, totals }
}

/// Schema of the aggregated output: the grouping column followed by the aggregated columns.
pub(crate) fn aggregated_schema(grouping: Option<&ColumnSpec>, aggregates: &[ColumnSpec]) -> Schema {
    Schema::with_unique_names(grouping.into_iter().chain(aggregates).cloned().collect())
}

/// Schema of the totals output: the aggregated columns.
pub(crate) fn totals_schema(aggregates: &[ColumnSpec]) -> Schema {
    Schema::with_unique_names(aggregates.to_vec())
}
