#![forbid(unsafe_code)]

//! Read-only view of a page for whatever paints it.

use dsviz_core::{Age, Collection, Element, ElementId, HighlightFrame, Structure};
use serde::Serialize;
use web_time::Duration;

use crate::animator::{AnimatorPhase, StagedAnimator};

/// One element as a view should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementView {
    pub id: ElementId,
    pub value: i64,
    pub highlighted: bool,
    pub age: Age,
}

impl ElementView {
    fn of(element: &Element, highlighted: bool, now: Duration) -> Self {
        Self {
            id: element.id,
            value: element.value,
            highlighted,
            age: element.age(now),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub structure: Structure,
    pub elements: Vec<ElementView>,
    /// Element in flight toward the collection.
    pub pending: Option<ElementView>,
    /// Element the last commit took out, shown until the animation ends.
    pub departed: Option<ElementView>,
    pub status: String,
    pub step: usize,
    pub total_steps: usize,
    pub phase: AnimatorPhase,
    /// Traversal cursor for linked-list walks.
    pub cursor: Option<usize>,
    pub operation_count: usize,
    pub capacity: Option<usize>,
    /// Logical time in milliseconds.
    pub clock_ms: u64,
}

impl Snapshot {
    /// Capture `collection` as `animator` currently presents it.
    #[must_use]
    pub fn capture(
        collection: &Collection,
        animator: &StagedAnimator,
        operation_count: usize,
    ) -> Self {
        let now = animator.clock();
        let frame: &HighlightFrame = animator.highlights();
        let elements = collection
            .iter()
            .enumerate()
            .map(|(i, e)| ElementView::of(e, frame.indices.contains(&i), now))
            .collect();
        Self {
            structure: animator.structure(),
            elements,
            pending: animator
                .pending_element()
                .filter(|_| frame.pending_visible)
                .map(|e| ElementView::of(e, true, now)),
            departed: animator
                .departed_element()
                .map(|e| ElementView::of(e, true, now)),
            status: animator.status_message().to_owned(),
            step: animator.step(),
            total_steps: animator.total_steps(),
            phase: animator.phase(),
            cursor: frame.traversal_index,
            operation_count,
            capacity: collection.capacity(),
            clock_ms: u64::try_from(now.as_millis()).unwrap_or(u64::MAX),
        }
    }

    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Indices of highlighted elements, ascending.
    #[must_use]
    pub fn highlighted(&self) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.highlighted.then_some(i))
            .collect()
    }
}
