//! This crate defines the low-level values and aggregate operations of tally,
//! i.e., it corresponds to the physical layer of the aggregation engine.
//! It knows about cells and their kinds, but nothing about column names,
//! records or how rows are grouped.

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
    variant_size_differences,
    clippy::cast_possible_wrap
)]

pub mod aggregates;
pub mod datatypes;
pub mod error;
