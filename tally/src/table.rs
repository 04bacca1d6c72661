//! Schemas, records, and in-memory tables

use std::fmt::Display;

use hashbrown::HashSet;
use itertools::Itertools;
use tally_physical::datatypes::{Cell, CellKind};

use crate::error::ReadingError;

/// A row of a table, one cell per column of its [Schema]
pub type Record = Vec<Cell>;

/// Name and declared kind of a column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSpec {
    name: String,
    kind: CellKind,
}

impl ColumnSpec {
    /// Create a new [ColumnSpec].
    pub fn new(name: impl Into<String>, kind: CellKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Return the name of the column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the declared kind of the column.
    pub fn kind(&self) -> CellKind {
        self.kind
    }
}

impl Display for ColumnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)
    }
}

/// Ordered list of columns with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Create a new [Schema].
    ///
    /// # Errors
    /// Returns an error if two columns share a name.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, ReadingError> {
        {
            let mut names = HashSet::with_capacity(columns.len());
            for column in &columns {
                if !names.insert(column.name()) {
                    return Err(ReadingError::DuplicateColumn(column.name().to_string()));
                }
            }
        }

        Ok(Self { columns })
    }

    /// Create a [Schema] from columns whose names may collide.
    ///
    /// Repeated names get the suffix ` (#n)` with the smallest `n` that makes them unique.
    pub fn with_unique_names(columns: Vec<ColumnSpec>) -> Self {
        let mut names: HashSet<String> = HashSet::with_capacity(columns.len());
        let mut result = Vec::with_capacity(columns.len());

        for column in columns {
            let mut name = column.name.clone();
            let mut suffix = 1;
            while names.contains(&name) {
                name = format!("{} (#{suffix})", column.name);
                suffix += 1;
            }

            names.insert(name.clone());
            result.push(ColumnSpec::new(name, column.kind));
        }

        Self { columns: result }
    }

    /// Return the columns of this schema.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Return the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Return whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Return the position and [ColumnSpec] of the column with the given name.
    pub fn find(&self, name: &str) -> Option<(usize, &ColumnSpec)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.name() == name)
    }

    /// Return whether a column with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Return the names of all columns.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnSpec::name)
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.columns.iter().join(", "))
    }
}

/// A fully materialized table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Record>,
}

impl Table {
    /// Create a new empty [Table].
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Create a new [Table] with the given rows.
    pub fn with_rows(schema: Schema, rows: Vec<Record>) -> Self {
        Self { schema, rows }
    }

    /// Return the schema of the table.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Return the rows of the table.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Return the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Return whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Return the cells of the column with the given name, or [None] if there is no such column.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let (index, _) = self.schema.find(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

#[cfg(test)]
mod test {
    use super::{ColumnSpec, Schema};
    use crate::error::ReadingError;
    use tally_physical::datatypes::CellKind;
    use test_log::test;

    #[test]
    fn duplicate_names_are_rejected() {
        let result = Schema::new(vec![
            ColumnSpec::new("a", CellKind::Int32),
            ColumnSpec::new("a", CellKind::Text),
        ]);

        assert!(matches!(result, Err(ReadingError::DuplicateColumn(name)) if name == "a"));
    }

    #[test]
    fn unique_names() {
        let schema = Schema::with_unique_names(vec![
            ColumnSpec::new("Count", CellKind::Text),
            ColumnSpec::new("Count", CellKind::Int64),
            ColumnSpec::new("Count", CellKind::Int64),
        ]);

        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["Count", "Count (#1)", "Count (#2)"]
        );
    }

    #[test]
    fn find() {
        let schema = Schema::new(vec![
            ColumnSpec::new("a", CellKind::Int32),
            ColumnSpec::new("b", CellKind::Double),
        ])
        .unwrap();

        assert_eq!(
            schema.find("b"),
            Some((1, &ColumnSpec::new("b", CellKind::Double)))
        );
        assert_eq!(schema.find("c"), None);
        assert_eq!(schema.to_string(), "[a: Int32, b: Double]");
    }
}
