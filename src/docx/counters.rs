//! Running list counters, one set per concrete numbering id.

use super::numbering::NumberingIndex;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Per-level counts of one numbered list.
///
/// A level that was never incremented reads as zero through
/// [`get_or_zero`](Self::get_or_zero); [`get`](Self::get) still tells the two
/// apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCounts {
    counts: HashMap<usize, u32>,
}

impl LevelCounts {
    /// Count of a level that has been incremented at least once.
    pub fn get(&self, level: usize) -> Option<u32> {
        self.counts.get(&level).copied()
    }

    pub fn get_or_zero(&self, level: usize) -> u32 {
        self.get(level).unwrap_or(0)
    }

    /// Add one paragraph at `level` and return the new count.
    pub fn increment(&mut self, level: usize) -> u32 {
        let count = self.counts.entry(level).or_insert(0);
        *count += 1;
        *count
    }

    /// Whether no level has been counted yet.
    pub fn is_untouched(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Concrete numbering id mapped to its level counts.
///
/// Built with exactly the ids of a [`NumberingIndex`], all zero. Counts only
/// grow; a new document needs a new context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingCounters {
    lists: HashMap<String, LevelCounts>,
}

impl NumberingCounters {
    pub fn for_index(index: &NumberingIndex) -> Self {
        Self {
            lists: index
                .num_ids()
                .map(|id| (id.to_string(), LevelCounts::default()))
                .collect(),
        }
    }

    /// Counts of one list.
    pub fn get(&self, num_id: &str) -> Option<&LevelCounts> {
        self.lists.get(num_id)
    }

    /// Current count of `(num_id, level)`, zero when the level was never seen.
    pub fn count(&self, num_id: &str, level: usize) -> Result<u32> {
        self.lists
            .get(num_id)
            .map(|counts| counts.get_or_zero(level))
            .ok_or_else(|| Error::UnknownNumbering(num_id.to_string()))
    }

    /// Increment `(num_id, level)` and return the new count.
    pub fn increment(&mut self, num_id: &str, level: usize) -> Result<u32> {
        self.lists
            .get_mut(num_id)
            .map(|counts| counts.increment(level))
            .ok_or_else(|| Error::UnknownNumbering(num_id.to_string()))
    }

    pub fn contains(&self, num_id: &str) -> bool {
        self.lists.contains_key(num_id)
    }

    pub fn num_ids(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
