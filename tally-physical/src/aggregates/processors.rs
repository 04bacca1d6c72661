//! This module contains the built-in aggregate operators, which determine how to aggregate multiple values in a group into a single output value.

pub mod average_aggregate;
pub mod count_aggregate;
pub mod max_aggregate;
pub mod min_aggregate;
pub mod processor;
pub mod sum_aggregate;
