//! Checks of an [AggregationConfig] against the schema of the input table, before any row is read.

use hashbrown::HashSet;
use itertools::Itertools;
use tally_physical::aggregates::operation::AggregateOperation;

use crate::{
    classifier::{is_aggregatable, is_weight_candidate},
    config::{AggregationConfig, NO_SELECTION},
    error::Error,
    table::Schema,
};

/// Warning issued for input tables without any column
pub const ZERO_COLUMN_WARNING: &str = "Input table should contain at least one column";

/// Formats `names` behind a description, using "column:" for one name and "columns:" for several.
fn describe_columns<S: AsRef<str>>(description: &str, names: &[S]) -> String {
    let noun = if names.len() == 1 { "column" } else { "columns" };
    format!(
        "{description} {noun}: {}",
        names.iter().map(AsRef::as_ref).join(", ")
    )
}

/// Collects the distinct names of `names` in order of first occurrence.
fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(*name)).collect()
}

/// Checks `config` against the input `schema`.
///
/// Returns the warnings that do not prevent the execution.
///
/// # Errors
/// Returns [`Error::InvalidConfiguration`] if no frequency column is selected,
/// a selection is unresolved, a referenced column does not exist in `schema`,
/// or a frequency or weight column cannot be aggregated.
pub fn validate(config: &AggregationConfig, schema: &Schema) -> Result<Vec<String>, Error> {
    let mut warnings = Vec::new();

    let selected = config.frequency_columns().collect::<Vec<_>>();
    if selected.is_empty() {
        return Err(Error::InvalidConfiguration(
            "No frequency column: select at least one column to aggregate".to_string(),
        ));
    }

    let placeholders = selected
        .iter()
        .filter(|name| **name == NO_SELECTION)
        .collect::<Vec<_>>();
    if !placeholders.is_empty() {
        return Err(Error::InvalidConfiguration(describe_columns(
            "Unresolved frequency",
            &placeholders,
        )));
    }

    if let Some(spec) = config
        .aggregations()
        .iter()
        .find(|spec| spec.operation().reads_input() && spec.column().is_none())
    {
        return Err(Error::InvalidConfiguration(format!(
            "Aggregation {} requires a frequency column",
            spec.operation()
        )));
    }

    if schema.is_empty() {
        log::warn!("{ZERO_COLUMN_WARNING}");
        warnings.push(ZERO_COLUMN_WARNING.to_string());
        return Ok(warnings);
    }

    let weights = config
        .aggregations()
        .iter()
        .filter_map(|spec| spec.weight());
    let unknown = distinct(
        config
            .grouping_column()
            .into_iter()
            .chain(selected.iter().copied())
            .chain(weights.clone()),
    )
    .into_iter()
    .filter(|name| !schema.contains(name))
    .collect::<Vec<_>>();
    if !unknown.is_empty() {
        return Err(Error::InvalidConfiguration(describe_columns(
            "Input table does not contain the configured",
            &unknown,
        )));
    }

    let not_numeric = distinct(
        config
            .aggregations()
            .iter()
            .filter(|spec| spec.operation().reads_input())
            .filter_map(|spec| spec.column()),
    )
    .into_iter()
    .filter(|name| {
        schema
            .find(name)
            .is_some_and(|(_, column)| !is_aggregatable(column))
    })
    .collect::<Vec<_>>();
    if !not_numeric.is_empty() {
        return Err(Error::InvalidConfiguration(describe_columns(
            "Cannot aggregate non-numeric",
            &not_numeric,
        )));
    }

    let bad_weights = distinct(weights)
        .into_iter()
        .filter(|name| {
            schema
                .find(name)
                .is_some_and(|(_, column)| !is_weight_candidate(column))
        })
        .collect::<Vec<_>>();
    if !bad_weights.is_empty() {
        return Err(Error::InvalidConfiguration(describe_columns(
            "Cannot weight by non-numeric",
            &bad_weights,
        )));
    }

    let mut outputs = HashSet::new();
    for spec in config
        .aggregations()
        .iter()
        .filter(|spec| spec.operation() != AggregateOperation::Count)
    {
        if !outputs.insert(spec.output_name()) {
            return Err(Error::InvalidConfiguration(format!(
                "Aggregation {} is configured more than once",
                spec.output_name()
            )));
        }
    }

    Ok(warnings)
}

#[cfg(test)]
mod test {
    use super::{validate, ZERO_COLUMN_WARNING};
    use crate::{
        config::{AggregationConfig, AggregationSpec, NO_SELECTION},
        error::Error,
        table::{ColumnSpec, Schema},
    };
    use tally_physical::datatypes::CellKind;
    use test_log::test;

    fn schema() -> Schema {
        Schema::new(vec![
            ColumnSpec::new("group", CellKind::Text),
            ColumnSpec::new("value", CellKind::Int32),
            ColumnSpec::new("weight", CellKind::Double),
            ColumnSpec::new("label", CellKind::Text),
        ])
        .unwrap()
    }

    fn message(result: Result<Vec<String>, Error>) -> String {
        match result {
            Err(Error::InvalidConfiguration(message)) => message,
            other => panic!("expected invalid configuration, got {other:?}"),
        }
    }

    #[test]
    fn valid() {
        let config = AggregationConfig::new()
            .group_by("group")
            .aggregate(AggregationSpec::sum("value").weighted_by("weight"))
            .aggregate(AggregationSpec::count("label"));

        assert_eq!(validate(&config, &schema()).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn no_frequency_column() {
        let message = message(validate(&AggregationConfig::new(), &schema()));
        assert!(message.contains("column:"));

        let config = AggregationConfig::new().aggregate(AggregationSpec::count_rows());
        assert!(validate(&config, &schema()).is_err());
    }

    #[test]
    fn placeholders() {
        let config = AggregationConfig::new().aggregate(AggregationSpec::sum(NO_SELECTION));
        let single = message(validate(&config, &schema()));
        assert!(single.contains("column:"));
        assert!(!single.contains("columns:"));

        let config = config.aggregate(AggregationSpec::average(NO_SELECTION));
        let plural = message(validate(&config, &schema()));
        assert!(plural.contains("columns:"));
    }

    #[test]
    fn unknown_columns() {
        let config = AggregationConfig::new()
            .group_by("nope")
            .aggregate(AggregationSpec::sum("value").weighted_by("heavy"));
        let message = message(validate(&config, &schema()));

        assert!(message.contains("columns: nope, heavy"));

        let config = AggregationConfig::new().aggregate(AggregationSpec::min("missing"));
        assert!(message_of(&config).contains("column: missing"));
    }

    fn message_of(config: &AggregationConfig) -> String {
        message(validate(config, &schema()))
    }

    #[test]
    fn non_numeric_columns() {
        let config = AggregationConfig::new().aggregate(AggregationSpec::sum("label"));
        assert!(message_of(&config).contains("column: label"));

        let config = AggregationConfig::new()
            .aggregate(AggregationSpec::sum("value").weighted_by("group"));
        assert!(message_of(&config).contains("column: group"));

        // counting does not look at the values
        let config = AggregationConfig::new().aggregate(AggregationSpec::count("label"));
        assert!(validate(&config, &schema()).is_ok());
    }

    #[test]
    fn duplicate_aggregation() {
        let config = AggregationConfig::new()
            .aggregate(AggregationSpec::sum("value"))
            .aggregate(AggregationSpec::sum("value"));
        assert!(message_of(&config).contains("Sum(value)"));

        let config = AggregationConfig::new()
            .aggregate(AggregationSpec::count("value"))
            .aggregate(AggregationSpec::count("label"));
        assert!(validate(&config, &schema()).is_ok());
    }

    #[test]
    fn zero_columns() {
        let config = AggregationConfig::new()
            .group_by("group")
            .aggregate(AggregationSpec::sum("value"));

        assert_eq!(
            validate(&config, &Schema::default()).unwrap(),
            vec![ZERO_COLUMN_WARNING.to_string()]
        );
    }
}
