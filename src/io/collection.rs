//! Collection traversal and aggregate counts.
//!
//! How groups are discovered (directories, database rows) is outside the
//! core; a `Catalog` is just named groups of tree identifiers with an
//! aggregate-count operation over their records.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::error::DrillResult;
use crate::record::{RootRecord, Status, TrainingRecord};
use crate::tree::resolve;

use super::storage::{TreeId, TreeStore};

/// Aggregate training counts for one group of trees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupStats {
    /// Trees in the group.
    pub trees: usize,

    /// Trees never opened for training (no root record yet).
    pub unopened: usize,

    /// Solutions not yet mastered (new or mid-learning).
    pub new: usize,

    /// Solutions awaiting work today (due reviews and relearns).
    pub due: usize,

    /// Solutions that have reached review at some point.
    pub learned: usize,
}

/// Named groups of tree identifiers.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    groups: FxHashMap<String, Vec<TreeId>>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tree to a group, creating the group if needed.
    pub fn add(&mut self, group: &str, id: TreeId) {
        self.groups.entry(group.to_string()).or_default().push(id);
    }

    /// Group names in sorted order.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Tree identifiers in a group, in insertion order.
    #[must_use]
    pub fn trees(&self, group: &str) -> &[TreeId] {
        self.groups.get(group).map_or(&[], Vec::as_slice)
    }

    /// Compute aggregate counts for one group.
    ///
    /// Trees without a root record are counted as unopened and skipped;
    /// structural or decode errors in an opened tree propagate.
    pub fn stats(
        &self,
        group: &str,
        store: &mut dyn TreeStore,
        today: NaiveDate,
    ) -> DrillResult<GroupStats> {
        let mut stats = GroupStats::default();

        for id in self.trees(group) {
            stats.trees += 1;
            let tree = store.load(id)?;

            let Some(note) = tree.get(tree.root()).note.clone() else {
                stats.unopened += 1;
                continue;
            };
            let root_record = RootRecord::decode(&note)?;
            let resolution = resolve(&tree, root_record.perspective)?;

            for &solution in &resolution.solutions {
                let record = TrainingRecord::decode(tree.get(solution).note.as_deref())?;
                match record.status {
                    Status::New | Status::Learning1 | Status::Learning2 => stats.new += 1,
                    Status::Remembering1 | Status::Remembering2 => stats.due += 1,
                    Status::Review => {
                        stats.learned += 1;
                        if record.due.map_or(true, |d| d <= today) {
                            stats.due += 1;
                        }
                    }
                }
            }
        }

        Ok(stats)
    }
}
