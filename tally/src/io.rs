//! Reading and writing tables as [DSV](https://en.wikipedia.org/wiki/Delimiter-separated_values) (delimiter separated values) files.

pub mod dsv_reader;
pub mod dsv_writer;

pub use dsv_reader::DsvReader;
pub use dsv_writer::DsvWriter;

/// Number of rows after which progress is logged
const PROGRESS_NOTIFY_INCREMENT: u64 = 1_000_000;
