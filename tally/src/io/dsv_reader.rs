//! The reader for DSV files.

use std::{fs::File, io::Read, path::Path};

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use tally_physical::datatypes::{Cell, CellKind, Double};

use crate::{
    error::{Error, ReadingError},
    table::{ColumnSpec, Record, Schema, Table},
};

use super::PROGRESS_NOTIFY_INCREMENT;

/// Kinds a column may be inferred as, from the narrowest to the widest.
/// Columns that fit none of them are [`CellKind::Text`].
const INFERRED_KINDS: [CellKind; 4] = [
    CellKind::Boolean,
    CellKind::Int32,
    CellKind::Int64,
    CellKind::Double,
];

/// Converts a non-missing field into a cell of the given kind.
fn parse_field(kind: CellKind, field: &str) -> Option<Cell> {
    match kind {
        CellKind::Boolean => {
            if field.eq_ignore_ascii_case("true") {
                Some(Cell::Boolean(true))
            } else if field.eq_ignore_ascii_case("false") {
                Some(Cell::Boolean(false))
            } else {
                None
            }
        }
        CellKind::Int32 => field.parse::<i32>().ok().map(Cell::Int32),
        CellKind::Int64 => field.parse::<i64>().ok().map(Cell::Int64),
        CellKind::Double => field
            .parse::<f64>()
            .ok()
            .and_then(|value| Double::new(value).ok())
            .map(Cell::Double),
        CellKind::Text => Some(Cell::Text(field.to_string())),
        CellKind::Other => Some(Cell::Other(field.to_string())),
    }
}

/// Tracks which of the [INFERRED_KINDS] can still represent every field of a column.
#[derive(Debug, Clone, Copy)]
struct KindCandidates {
    viable: [bool; INFERRED_KINDS.len()],
    observed: bool,
}

impl Default for KindCandidates {
    fn default() -> Self {
        Self {
            viable: [true; INFERRED_KINDS.len()],
            observed: false,
        }
    }
}

impl KindCandidates {
    fn observe(&mut self, field: &str) {
        self.observed = true;
        for (viable, kind) in self.viable.iter_mut().zip(INFERRED_KINDS) {
            *viable = *viable && parse_field(kind, field).is_some();
        }
    }

    fn kind(&self) -> CellKind {
        if !self.observed {
            return CellKind::Text;
        }

        self.viable
            .iter()
            .zip(INFERRED_KINDS)
            .find_map(|(viable, kind)| viable.then_some(kind))
            .unwrap_or(CellKind::Text)
    }
}

/// A reader object for reading DSV files into a [Table].
///
/// The kind of every column is inferred from its non-missing fields as the narrowest of
/// [`CellKind::Boolean`], [`CellKind::Int32`], [`CellKind::Int64`] and [`CellKind::Double`]
/// that fits all of them, and [`CellKind::Text`] otherwise.
#[derive(Debug, Clone)]
pub struct DsvReader {
    delimiter: u8,
    missing_token: String,
    has_headers: bool,
}

impl DsvReader {
    /// Instantiate a [DsvReader] for a given delimiter
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            missing_token: String::new(),
            has_headers: true,
        }
    }

    /// Instantiate a [DsvReader] for CSV files
    pub fn csv() -> Self {
        Self::new(b',')
    }

    /// Instantiate a [DsvReader] for TSV files
    pub fn tsv() -> Self {
        Self::new(b'\t')
    }

    /// Set the field content that denotes a missing value (the empty field by default).
    pub fn missing_token(mut self, token: impl Into<String>) -> Self {
        self.missing_token = token.into();
        self
    }

    /// Set whether the first line holds the column names (true by default).
    ///
    /// Without headers, columns are named `column_1`, `column_2`, and so on.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    fn reader<R: Read>(&self, read: R) -> Reader<R> {
        ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .double_quote(true)
            .flexible(true)
            .trim(Trim::Fields)
            .from_reader(read)
    }

    /// Read the file at `path`.
    pub fn read_file(&self, path: &Path) -> Result<Table, Error> {
        let file = File::open(path).map_err(|error| Error::IoReading {
            error,
            filename: path.display().to_string(),
        })?;

        self.read_table(file)
    }

    /// Read a complete table from `read`.
    ///
    /// # Errors
    /// Returns an error if the input is not valid DSV, if a row has a different number of fields
    /// than the first row, or if two columns have the same name.
    pub fn read_table<R: Read>(&self, read: R) -> Result<Table, Error> {
        let mut reader = self.reader(read);

        let header = if self.has_headers {
            Some(
                reader
                    .headers()?
                    .iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>(),
            )
        } else {
            None
        };

        let mut records = Vec::<StringRecord>::new();
        let mut width = header.as_ref().map(Vec::len);
        for record in reader.records() {
            let record = record?;
            let expected = *width.get_or_insert(record.len());

            if record.len() != expected {
                return Err(ReadingError::RaggedRow {
                    line: record.position().map(|position| position.line()).unwrap_or_default(),
                    expected,
                    found: record.len(),
                }
                .into());
            }

            records.push(record);
            if (records.len() as u64 % PROGRESS_NOTIFY_INCREMENT) == 0 {
                log::info!("... read {} rows", records.len());
            }
        }

        let width = width.unwrap_or_default();
        let names = header.unwrap_or_else(|| (1..=width).map(|index| format!("column_{index}")).collect());

        let mut candidates = vec![KindCandidates::default(); width];
        for record in &records {
            for (candidate, field) in candidates.iter_mut().zip(record.iter()) {
                if field != self.missing_token {
                    candidate.observe(field);
                }
            }
        }

        let schema = Schema::new(
            names
                .into_iter()
                .zip(&candidates)
                .map(|(name, candidate)| ColumnSpec::new(name, candidate.kind()))
                .collect(),
        )?;
        log::debug!("inferred schema {schema}");

        let rows = records
            .iter()
            .map(|record| self.convert(&schema, record))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Read {} rows with schema {schema}", rows.len());

        Ok(Table::with_rows(schema, rows))
    }

    fn convert(&self, schema: &Schema, record: &StringRecord) -> Result<Record, ReadingError> {
        schema
            .columns()
            .iter()
            .zip(record.iter())
            .map(|(column, field)| {
                if field == self.missing_token {
                    return Ok(Cell::Missing);
                }

                parse_field(column.kind(), field).ok_or_else(|| ReadingError::InvalidValue {
                    line: record.position().map(|position| position.line()).unwrap_or_default(),
                    column: column.name().to_string(),
                    kind: column.kind(),
                    value: field.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::DsvReader;
    use crate::error::{Error, ReadingError};
    use tally_physical::datatypes::{Cell, CellKind, Double};
    use test_log::test;

    fn kinds(reader: &DsvReader, data: &str) -> Vec<CellKind> {
        reader
            .read_table(data.as_bytes())
            .unwrap()
            .schema()
            .columns()
            .iter()
            .map(|column| column.kind())
            .collect()
    }

    #[test]
    fn kind_inference() {
        let data = "\
flag,small,large,real,text,empty,mixed
true,1,1,1,a,,true
FALSE,,3000000000,2.5,b,,2
";

        assert_eq!(
            kinds(&DsvReader::csv(), data),
            vec![
                CellKind::Boolean,
                CellKind::Int32,
                CellKind::Int64,
                CellKind::Double,
                CellKind::Text,
                CellKind::Text,
                CellKind::Text,
            ]
        );
    }

    #[test]
    fn rows_with_missing_cells() {
        let data = "\
city;pop;area
Boston;4628910;NA
Dresden;NA;328.48
";
        let table = DsvReader::new(b';')
            .missing_token("NA")
            .read_table(data.as_bytes())
            .unwrap();

        assert_eq!(
            table.schema().names().collect::<Vec<_>>(),
            vec!["city", "pop", "area"]
        );
        assert_eq!(
            table.rows(),
            &[
                vec![Cell::from("Boston"), Cell::Int32(4628910), Cell::Missing],
                vec![
                    Cell::from("Dresden"),
                    Cell::Missing,
                    Cell::Double(Double::new(328.48).unwrap())
                ],
            ]
        );
    }

    #[test]
    fn without_headers() {
        let table = DsvReader::tsv()
            .has_headers(false)
            .read_table("a\t1\nb\t2\n".as_bytes())
            .unwrap();

        assert_eq!(
            table.schema().names().collect::<Vec<_>>(),
            vec!["column_1", "column_2"]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn header_only() {
        let table = DsvReader::csv().read_table("a,b\n".as_bytes()).unwrap();

        assert_eq!(table.schema().len(), 2);
        assert!(table.is_empty());
        assert_eq!(table.schema().columns()[0].kind(), CellKind::Text);
    }

    #[test]
    fn empty_input_has_no_columns() {
        let table = DsvReader::csv().read_table("".as_bytes()).unwrap();

        assert!(table.schema().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn ragged_rows() {
        let result = DsvReader::csv().read_table("a,b\n1,2\n3\n".as_bytes());

        assert!(matches!(
            result,
            Err(Error::Reading(ReadingError::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            }))
        ));
    }

    #[test]
    fn duplicate_columns() {
        let result = DsvReader::csv().read_table("a,a\n1,2\n".as_bytes());

        assert!(matches!(
            result,
            Err(Error::Reading(ReadingError::DuplicateColumn(name))) if name == "a"
        ));
    }
}
