//! The writer for DSV files.

use std::{borrow::Cow, io::Write};

use csv::{Writer, WriterBuilder};
use tally_physical::datatypes::Cell;

use crate::{error::Error, table::Table};

use super::PROGRESS_NOTIFY_INCREMENT;

/// Textual representation of `cell` in a DSV field.
fn serialize<'a>(cell: &'a Cell, missing_token: &'a str) -> Cow<'a, str> {
    match cell {
        Cell::Missing => missing_token.into(),
        Cell::Text(value) | Cell::Other(value) => value.as_str().into(),
        other => other.to_string().into(),
    }
}

/// A writer object for writing [Table]s as DSV files.
///
/// The header line holds the column names.
/// Missing cells are written as the missing token, which is the empty field by default.
/// The writer will use double quotes for string escaping.
pub struct DsvWriter<W: Write> {
    writer: Writer<W>,
    missing_token: String,
}

impl<W: Write> DsvWriter<W> {
    /// Create a new [DsvWriter].
    pub fn new(delimiter: u8, writer: W) -> Self {
        DsvWriter {
            writer: WriterBuilder::new()
                .delimiter(delimiter)
                .double_quote(true)
                .from_writer(writer),
            missing_token: String::new(),
        }
    }

    /// Set the field content written for missing cells.
    pub fn missing_token(mut self, token: impl Into<String>) -> Self {
        self.missing_token = token.into();
        self
    }

    /// Write the header and all rows of `table`.
    pub fn write_table(&mut self, table: &Table) -> Result<(), Error> {
        if table.schema().is_empty() {
            log::warn!("Skipping export of a table without columns");
            return Ok(());
        }

        self.writer.write_record(table.schema().names())?;

        let mut line_count: u64 = 0;
        for row in table.rows() {
            let fields = row
                .iter()
                .map(|cell| serialize(cell, &self.missing_token))
                .collect::<Vec<_>>();
            self.writer
                .write_record(fields.iter().map(|field| field.as_bytes()))?;

            line_count += 1;
            if (line_count % PROGRESS_NOTIFY_INCREMENT) == 0 {
                log::info!("... processed {line_count} rows");
            }
        }

        self.writer.flush()?;
        log::info!("Finished export: processed {line_count} rows");

        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|error| Error::Io(error.into_error()))
    }
}

impl<W: Write> std::fmt::Debug for DsvWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DsvWriter")
            .field("writer", &"<unspecified std::io::Write>")
            .field("missing token", &self.missing_token)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::DsvWriter;
    use crate::{
        io::DsvReader,
        table::{ColumnSpec, Schema, Table},
    };
    use tally_physical::datatypes::{Cell, CellKind, Double};
    use test_log::test;

    fn table() -> Table {
        let schema = Schema::new(vec![
            ColumnSpec::new("name", CellKind::Text),
            ColumnSpec::new("Average(x)", CellKind::Double),
            ColumnSpec::new("Count", CellKind::Int64),
        ])
        .unwrap();

        Table::with_rows(
            schema,
            vec![
                vec![
                    Cell::from("a, b"),
                    Cell::Double(Double::new(0.1).unwrap()),
                    Cell::Int64(2),
                ],
                vec![Cell::Missing, Cell::Missing, Cell::Int64(0)],
            ],
        )
    }

    fn written(writer: DsvWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn csv_output() {
        let mut writer = DsvWriter::new(b',', Vec::new());
        writer.write_table(&table()).unwrap();

        assert_eq!(
            written(writer),
            "name,Average(x),Count\n\"a, b\",0.1,2\n,,0\n"
        );
    }

    #[test]
    fn missing_token() {
        let mut writer = DsvWriter::new(b'\t', Vec::new()).missing_token("?");
        writer.write_table(&table()).unwrap();

        assert_eq!(
            written(writer),
            "name\tAverage(x)\tCount\na, b\t0.1\t2\n?\t?\t0\n"
        );
    }

    #[test]
    fn read_back() {
        let mut writer = DsvWriter::new(b';', Vec::new());
        writer.write_table(&table()).unwrap();
        let output = written(writer);

        let table = DsvReader::new(b';').read_table(output.as_bytes()).unwrap();
        assert_eq!(
            table.column("Average(x)").unwrap(),
            vec![&Cell::Double(Double::new(0.1).unwrap()), &Cell::Missing]
        );
    }
}
