//! Group table and grand-total row, filled during the single scan over the input

use hashbrown::{hash_map::Entry, HashMap};
use tally_physical::datatypes::Cell;

use crate::{
    operators::{AccumulatorRow, OperatorLayout},
    table::Record,
};

/// Value that determines the group of a row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// No grouping column is configured, all rows form one group
    NoGrouping,
    /// Content of the grouping column; [`Cell::Missing`] is a key of its own
    Value(Cell),
}

impl GroupKey {
    /// Return the cell of the grouping column, or [None] without grouping.
    pub fn cell(&self) -> Option<&Cell> {
        match self {
            GroupKey::NoGrouping => None,
            GroupKey::Value(cell) => Some(cell),
        }
    }
}

/// Mapping from group keys to one row of accumulators per group.
///
/// Groups are created the first time their key is observed.
/// The table itself is unordered; [GroupTable::into_sorted] orders the groups by key after the scan.
#[derive(Debug)]
pub(crate) struct GroupTable {
    grouping_index: Option<usize>,
    groups: HashMap<GroupKey, AccumulatorRow>,
}

impl GroupTable {
    /// Create an empty table that groups rows by the column at `grouping_index`.
    pub(crate) fn new(grouping_index: Option<usize>) -> Self {
        Self {
            grouping_index,
            groups: HashMap::new(),
        }
    }

    fn key(&self, record: &Record) -> GroupKey {
        match self.grouping_index {
            None => GroupKey::NoGrouping,
            Some(index) => GroupKey::Value(record.get(index).cloned().unwrap_or_default()),
        }
    }

    /// Feed `record` into the accumulators of its group.
    pub(crate) fn consume(&mut self, layout: &OperatorLayout, record: &Record) {
        let key = self.key(record);

        let row = match self.groups.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::trace!("new group {:?}", entry.key());
                entry.insert(layout.accumulators())
            }
        };

        layout.consume(row, record);
    }

    /// Return the number of groups.
    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    /// Return all groups in ascending order of their keys.
    pub(crate) fn into_sorted(self) -> Vec<(GroupKey, AccumulatorRow)> {
        let mut groups = self.groups.into_iter().collect::<Vec<_>>();
        groups.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));

        groups
    }
}

/// Accumulators over the whole input, created with the first row
#[derive(Debug, Default)]
pub(crate) struct GrandTotal {
    row: Option<AccumulatorRow>,
}

impl GrandTotal {
    /// Feed `record` into the accumulators of the grand total.
    pub(crate) fn consume(&mut self, layout: &OperatorLayout, record: &Record) {
        let row = self.row.get_or_insert_with(|| layout.accumulators());
        layout.consume(row, record);
    }

    /// Compute the result cells.
    ///
    /// If no row has been observed, the result is that of fresh accumulators,
    /// i.e. missing cells and a count of zero.
    pub(crate) fn finish(&self, layout: &OperatorLayout) -> Vec<Cell> {
        match &self.row {
            Some(row) => OperatorLayout::finish(row),
            None => OperatorLayout::finish(&layout.accumulators()),
        }
    }
}
