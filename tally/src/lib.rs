//! A streaming group-by and grand-total aggregation engine
//!
//! The [engine::AggregationEngine] consumes the records of a table once,
//! groups them by an optional grouping column and aggregates the configured
//! frequency columns per group and over the whole input.
//! The [router] decides which of the two outputs are produced and in which shape.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

/// The crate for the underlying cells and aggregate operations.
pub extern crate tally_physical;

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod router;
pub mod table;
pub mod validator;

pub(crate) mod group_table;
pub(crate) mod operators;

// cells and aggregate operations are part of our API, so re-export them here.
pub use tally_physical::aggregates::operation::AggregateOperation;
pub use tally_physical::datatypes;
