#![forbid(unsafe_code)]

//! Elements and their stable identities.
//!
//! An [`Element`] pairs a numeric value with an [`ElementId`] that survives
//! reordering. Identities come from an [`IdAllocator`] owned by the
//! collection; the allocator only ever counts upward, so an identity freed by
//! a removal is never handed out again.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable per-element identity, independent of value and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(u64);

impl ElementId {
    /// Raw numeric identity.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic identity source.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator starting at identity 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Hand out the next unused identity.
    pub fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }

    /// Number of identities handed out so far.
    #[inline]
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next
    }
}

/// One item of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    pub id: ElementId,
    pub value: i64,
    /// Logical time the element was created, if known.
    pub created_at: Option<Duration>,
}

impl Element {
    #[must_use]
    pub const fn new(id: ElementId, value: i64) -> Self {
        Self {
            id,
            value,
            created_at: None,
        }
    }

    /// Attach a creation timestamp (builder pattern).
    #[must_use]
    pub const fn created_at(mut self, at: Duration) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Age bucket of this element at logical time `now`.
    #[must_use]
    pub fn age(&self, now: Duration) -> Age {
        Age::classify(now, self.created_at)
    }
}

/// Coarse age bucket used to tint freshly added elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Age {
    New,
    Recent,
    Old,
}

impl Age {
    /// Elements younger than this are [`Age::New`].
    pub const NEW_WINDOW: Duration = Duration::from_secs(5);
    /// Elements younger than this (and not new) are [`Age::Recent`].
    pub const RECENT_WINDOW: Duration = Duration::from_secs(15);

    /// Classify an element created at `created_at` as seen at `now`.
    ///
    /// Elements without a timestamp, and timestamps in the future, are
    /// treated as old and new respectively.
    #[must_use]
    pub fn classify(now: Duration, created_at: Option<Duration>) -> Self {
        let Some(created_at) = created_at else {
            return Self::Old;
        };
        let age = now.saturating_sub(created_at);
        if age < Self::NEW_WINDOW {
            Self::New
        } else if age < Self::RECENT_WINDOW {
            Self::Recent
        } else {
            Self::Old
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_never_repeats() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert!(a < b && b < c);
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn age_buckets() {
        let now = Duration::from_secs(20);
        assert_eq!(Age::classify(now, Some(Duration::from_secs(18))), Age::New);
        assert_eq!(Age::classify(now, Some(Duration::from_secs(10))), Age::Recent);
        assert_eq!(Age::classify(now, Some(Duration::from_secs(1))), Age::Old);
        assert_eq!(Age::classify(now, None), Age::Old);
    }

    #[test]
    fn future_timestamp_is_new() {
        let now = Duration::from_secs(1);
        assert_eq!(Age::classify(now, Some(Duration::from_secs(3))), Age::New);
    }

    #[test]
    fn id_display() {
        let mut ids = IdAllocator::new();
        ids.allocate();
        assert_eq!(ids.allocate().to_string(), "#1");
    }
}
