#![forbid(unsafe_code)]

//! Derived highlight calculator.
//!
//! Pure mapping from a step's [`StepRole`], the target index and the
//! collection length to the set of indices a view should flag. Indices are
//! always restricted to `0..len`; [`HighlightFrame::identities`] converts
//! them to element identities for keyed rendering.
//!
//! # Invariants
//!
//! 1. No index in a frame is `>= len`.
//! 2. A traversal to index 0 highlights nothing (no underflow).
//! 3. A traversal to `len` highlights the whole collection.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::descriptor::StepRole;
use crate::element::ElementId;

/// Visual flags for one instant of an animation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HighlightFrame {
    pub indices: BTreeSet<usize>,
    /// Whether the not-yet-committed element should be drawn.
    pub pending_visible: bool,
    /// Position of the traversal cursor, if a walk is in progress.
    pub traversal_index: Option<usize>,
}

impl HighlightFrame {
    /// A frame with nothing flagged.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && !self.pending_visible && self.traversal_index.is_none()
    }

    /// Identities of the highlighted elements in `collection`.
    #[must_use]
    pub fn identities(&self, collection: &Collection) -> BTreeSet<ElementId> {
        self.indices
            .iter()
            .filter_map(|&i| collection.get(i).map(|e| e.id))
            .collect()
    }
}

/// Highlights for a step playing `role` against `target` in a collection of
/// `len` elements. `carries_pending` says whether the operation has a pending
/// element that stays visible until it is committed.
#[must_use]
pub fn highlights_for(
    role: StepRole,
    target: usize,
    len: usize,
    carries_pending: bool,
) -> HighlightFrame {
    let within = |i: &usize| *i < len;
    let mut frame = HighlightFrame::empty();
    match role {
        StepRole::Create | StepRole::Move => {
            frame.pending_visible = carries_pending;
        }
        StepRole::Traverse => {
            let end = target.min(len);
            frame.indices = (0..end).collect();
            frame.traversal_index = end.checked_sub(1);
            frame.pending_visible = carries_pending;
        }
        StepRole::SeekTail => {
            if let Some(tail) = len.checked_sub(1) {
                frame.indices.insert(tail);
                frame.traversal_index = Some(tail);
            }
            frame.pending_visible = carries_pending;
        }
        StepRole::Splice => {
            frame.indices = [target.saturating_sub(1), target]
                .into_iter()
                .filter(within)
                .collect();
            frame.pending_visible = carries_pending;
        }
        StepRole::Shift => {
            frame.indices = (target..len).collect();
            frame.pending_visible = carries_pending;
        }
        StepRole::Access | StepRole::Excise | StepRole::Inspect => {
            if within(&target) {
                frame.indices.insert(target);
            }
        }
        StepRole::All => {
            frame.indices = (0..len).collect();
        }
        StepRole::Done => {}
    }
    frame
}
