//! Physical layer aggregates, which only know about cell kinds, not about columns or groups.
//!
//! An [`operation::AggregateOperation`] is turned into an [`processors::processor::AggregateProcessor`]
//! once the kind of the aggregated column and the use of a weight column are known.
//! The processor then creates one accumulator per group.

pub mod operation;
pub mod processors;
pub mod promotion;
