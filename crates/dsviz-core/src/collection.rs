#![forbid(unsafe_code)]

//! The authoritative ordered collection behind a page.
//!
//! Read access is public. Structural mutation is crate-private and reached
//! only through [`commit::apply`](crate::commit::apply); the one public
//! replacement path, [`Collection::restore`], swaps the whole sequence and is
//! used for undo.

use std::time::Duration;

use crate::element::{Element, ElementId, IdAllocator};

/// Ordered sequence of [`Element`]s with an identity source and an optional
/// capacity limit.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    elements: Vec<Element>,
    ids: IdAllocator,
    capacity: Option<usize>,
}

impl Collection {
    /// Create an empty, unbounded collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection seeded with `values`, each given a fresh identity.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut collection = Self::new();
        for value in values {
            let element = collection.mint(value, None);
            collection.elements.push(element);
        }
        collection
    }

    /// Limit the number of elements (builder pattern).
    #[must_use]
    pub fn with_capacity_limit(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Capacity limit, if any.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Whether the capacity limit has been reached.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.elements.len() >= cap)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    #[must_use]
    pub fn front(&self) -> Option<&Element> {
        self.elements.first()
    }

    #[must_use]
    pub fn back(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id).collect()
    }

    /// Position of the element carrying `id`.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Number of identities issued over the collection's lifetime.
    #[must_use]
    pub fn identities_issued(&self) -> u64 {
        self.ids.issued()
    }

    /// Replace the whole sequence, keeping the identity source.
    ///
    /// Identities already issued stay retired, so restoring an older
    /// sequence never collides with elements minted since.
    pub fn restore(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Create an element with a fresh identity without inserting it.
    pub(crate) fn mint(&mut self, value: i64, at: Option<Duration>) -> Element {
        let element = Element::new(self.ids.allocate(), value);
        match at {
            Some(at) => element.created_at(at),
            None => element,
        }
    }

    pub(crate) fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub(crate) fn insert(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Element> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    pub(crate) fn set_value(&mut self, index: usize, value: i64) -> Option<i64> {
        let slot = self.elements.get_mut(index)?;
        Some(std::mem::replace(&mut slot.value, value))
    }

    pub(crate) fn take_all(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_values_get_distinct_ids() {
        let c = Collection::from_values([10, 20, 30]);
        assert_eq!(c.values(), vec![10, 20, 30]);
        let ids = c.ids();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_eq!(c.identities_issued(), 3);
    }

    #[test]
    fn capacity_limit() {
        let c = Collection::from_values([1, 2]).with_capacity_limit(Some(2));
        assert!(c.is_full());
        let c = Collection::from_values([1]).with_capacity_limit(Some(2));
        assert!(!c.is_full());
        assert!(!Collection::from_values([1, 2, 3]).is_full());
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut c = Collection::from_values([1]);
        assert!(c.remove(3).is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn restore_keeps_identity_source() {
        let mut c = Collection::from_values([1, 2]);
        let before = c.as_slice().to_vec();
        let extra = c.mint(3, None);
        c.push(extra);
        c.restore(before.clone());
        assert_eq!(c.as_slice(), before.as_slice());
        let next = c.mint(4, None);
        assert!(next.id > extra.id);
    }

    #[test]
    fn index_of_tracks_identity() {
        let c = Collection::from_values([5, 6, 7]);
        let id = c.ids()[2];
        assert_eq!(c.index_of(id), Some(2));
        assert_eq!(c.front().map(|e| e.value), Some(5));
        assert_eq!(c.back().map(|e| e.value), Some(7));
    }
}
