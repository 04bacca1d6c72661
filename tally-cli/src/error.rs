//! This module defines all the errors that can occur while executing tally-cli.

use thiserror::Error;

/// Error that occur during execution of tally's CLI app
#[derive(Error, Debug)]
pub enum CliError {
    /// An `--aggregate` argument could not be parsed
    #[error("invalid aggregation `{argument}`: expected FUNCTION:COLUMN, e.g. sum:price")]
    InvalidAggregate {
        /// The offending argument
        argument: String,
    },
    /// The delimiter is not a single-byte character
    #[error("invalid delimiter `{delimiter}`: expected an ASCII character")]
    InvalidDelimiter {
        /// The offending delimiter
        delimiter: char,
    },
    /// Error resulting from io operations
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Error originating from tally
    #[error(transparent)]
    TallyError(#[from] tally::error::Error),
}
