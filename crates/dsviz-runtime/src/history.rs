#![forbid(unsafe_code)]

//! Bounded undo history of collection contents.
//!
//! [`SnapshotHistory`] keeps the elements a collection held before each
//! committed operation, newest last. Restoring a snapshot puts back the
//! original identities, so a restored element is the same element it was
//! before the operation rather than a copy.
//!
//! # Invariants
//!
//! 1. `len() <= depth()` after any operation.
//! 2. When full, the oldest entry is evicted first.
//! 3. Restoring never mints identities, so undo cannot cause an identity
//!    to be handed out twice.

use std::collections::VecDeque;

use dsviz_core::Element;

/// One recorded state plus the counter value it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub elements: Vec<Element>,
    pub operation_count: usize,
}

/// Depth-bounded stack of pre-operation states.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    entries: VecDeque<HistoryEntry>,
    depth: usize,
}

impl SnapshotHistory {
    /// History holding at most `depth` entries. A depth of zero keeps none.
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(depth.min(64)),
            depth,
        }
    }

    /// Record a state, evicting the oldest entry when full.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.depth == 0 {
            return;
        }
        while self.entries.len() >= self.depth {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Take the most recent state.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsviz_core::Collection;

    fn entry(values: &[i64], count: usize) -> HistoryEntry {
        HistoryEntry {
            elements: Collection::from_values(values.iter().copied())
                .as_slice()
                .to_vec(),
            operation_count: count,
        }
    }

    #[test]
    fn pops_newest_first() {
        let mut h = SnapshotHistory::new(5);
        h.push(entry(&[1], 0));
        h.push(entry(&[1, 2], 1));
        assert_eq!(h.pop().map(|e| e.operation_count), Some(1));
        assert_eq!(h.pop().map(|e| e.operation_count), Some(0));
        assert!(h.pop().is_none());
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut h = SnapshotHistory::new(2);
        for count in 0..4 {
            h.push(entry(&[], count));
        }
        assert_eq!(h.len(), 2);
        assert_eq!(h.pop().map(|e| e.operation_count), Some(3));
        assert_eq!(h.pop().map(|e| e.operation_count), Some(2));
    }

    #[test]
    fn zero_depth_keeps_nothing() {
        let mut h = SnapshotHistory::new(0);
        h.push(entry(&[1], 0));
        assert!(h.is_empty());
    }
}
