//! Error-handling module for the crate

use thiserror::Error;

/// Error-Collection for errors related to reading input tables.
#[derive(Error, Debug)]
pub enum ReadingError {
    /// A row has a different number of fields than the header
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        /// Line of the offending row
        line: u64,
        /// Number of columns of the table
        expected: usize,
        /// Number of fields of the row
        found: usize,
    },
    /// A field could not be converted to the kind inferred for its column
    #[error("line {line}: value \"{value}\" of column \"{column}\" is not a valid {kind}")]
    InvalidValue {
        /// Line of the offending row
        line: u64,
        /// Name of the column
        column: String,
        /// Inferred kind of the column
        kind: tally_physical::datatypes::CellKind,
        /// The field that could not be converted
        value: String,
    },
    /// The input declares the same column name twice
    #[error("column \"{0}\" appears more than once")]
    DuplicateColumn(String),
}

/// Error-Collection for all the possible Errors occurring in this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration does not fit the input table
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// An aggregate operation could not be created
    #[error(transparent)]
    Operator(#[from] tally_physical::error::Error),
    /// The execution was cancelled before the scan finished
    #[error("execution was cancelled")]
    Cancelled,
    /// Error that happened while reading a table
    #[error(transparent)]
    Reading(#[from] ReadingError),
    /// CSV serialization/deserialization error
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// IO Error
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Error during a Read operation
    #[error("Failed to read \"{filename}\": {error}")]
    IoReading {
        /// Underlying IO error
        error: std::io::Error,
        /// Name of the file that could not be read
        filename: String,
    },
    /// Error during a Write operation
    #[error("Failed to write \"{filename}\": {error}")]
    IoWriting {
        /// Underlying IO error
        error: std::io::Error,
        /// Name of the file that could not be written
        filename: String,
    },
}
