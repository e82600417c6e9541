#![forbid(unsafe_code)]

//! Commit applier: the only path that structurally mutates a [`Collection`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::element::{Element, ElementId};
use crate::operation::{OperationKind, ResolvedOperation};

/// Record of one applied commit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Commit {
    pub kind: OperationKind,
    /// Identity of the element added, if any.
    pub inserted: Option<ElementId>,
    /// Elements taken out (one for remove/dequeue/pop, all for clear).
    pub removed: Vec<Element>,
    /// Previous value for an update.
    pub replaced: Option<i64>,
    pub len_before: usize,
    pub len_after: usize,
}

impl Commit {
    /// Signed change in length.
    #[must_use]
    pub fn len_delta(&self) -> isize {
        self.len_after as isize - self.len_before as isize
    }
}

/// Apply `op` to `collection`.
///
/// `pending` is the element minted when the operation started; when absent a
/// fresh one is minted here. Targets are expected to be in range (they were
/// validated when the operation was resolved); an out-of-range removal or
/// update degrades to a no-op rather than panicking.
pub fn apply(
    collection: &mut Collection,
    op: &ResolvedOperation,
    pending: Option<Element>,
) -> Commit {
    let len_before = collection.len();
    let mut inserted = None;
    let mut removed = Vec::new();
    let mut replaced = None;

    match op.kind {
        OperationKind::Add
        | OperationKind::Enqueue
        | OperationKind::Push
        | OperationKind::Insert => {
            let element = pending.unwrap_or_else(|| collection.mint(op.value.unwrap_or_default(), None));
            inserted = Some(element.id);
            if op.kind == OperationKind::Insert {
                collection.insert(op.target, element);
            } else {
                collection.push(element);
            }
        }
        OperationKind::Remove | OperationKind::Dequeue | OperationKind::Pop => {
            removed.extend(collection.remove(op.target));
        }
        OperationKind::Update => {
            if let Some(value) = op.value {
                replaced = collection.set_value(op.target, value);
            }
        }
        OperationKind::Clear => {
            removed = collection.take_all();
        }
        OperationKind::Peek => {}
    }

    Commit {
        kind: op.kind,
        inserted,
        removed,
        replaced,
        len_before,
        len_after: collection.len(),
    }
}

/// Mint the element a growing operation will place, so a view can draw it
/// before the commit lands.
#[must_use]
pub fn mint_pending(
    collection: &mut Collection,
    op: &ResolvedOperation,
    at: Option<std::time::Duration>,
) -> Option<Element> {
    if !op.kind.grows() {
        return None;
    }
    op.value.map(|value| collection.mint(value, at))
}
