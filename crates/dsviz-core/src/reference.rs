#![forbid(unsafe_code)]

//! Static complexity reference tables shown next to each structure.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::structure::Structure;

/// One row of a complexity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ComplexityRow {
    pub operation: &'static str,
    pub time: &'static str,
    pub note: &'static str,
}

const fn row(operation: &'static str, time: &'static str, note: &'static str) -> ComplexityRow {
    ComplexityRow {
        operation,
        time,
        note,
    }
}

const ARRAY: &[ComplexityRow] = &[
    row("Access", "O(1)", "direct indexing"),
    row("Add to end", "O(1)", "amortised"),
    row("Insert", "O(n)", "elements after the index shift right"),
    row("Remove", "O(n)", "elements after the index shift left"),
    row("Update", "O(1)", "direct indexing"),
    row("Search", "O(n)", "linear scan"),
];

const LINKED_LIST: &[ComplexityRow] = &[
    row("Access", "O(n)", "walk from the head"),
    row("Search", "O(n)", "walk from the head"),
    row("Insert at beginning", "O(1)", ""),
    row("Insert at end", "O(n)", "O(1) with a tail pointer"),
    row("Insert at position", "O(n)", "walk to the position"),
    row("Delete at beginning", "O(1)", ""),
    row("Delete at end", "O(n)", "O(1) with a tail pointer"),
    row("Delete at position", "O(n)", "walk to the position"),
];

const STACK: &[ComplexityRow] = &[
    row("Push", "O(1)", "insert at top"),
    row("Pop", "O(1)", "remove from top"),
    row("Peek", "O(1)", "read the top"),
    row("Search", "O(n)", "scan all elements"),
    row("Access (other than top)", "O(n)", "pop down to it"),
];

const QUEUE: &[ComplexityRow] = &[
    row("Enqueue", "O(1)", "insert at rear"),
    row("Dequeue", "O(1)", "O(n) for a shifting array"),
    row("Peek", "O(1)", "read the front"),
    row("Search", "O(n)", "scan all elements"),
    row("Access (other than front)", "O(n)", "dequeue up to it"),
];

/// Time complexity rows for `structure`.
#[must_use]
pub const fn complexities(structure: Structure) -> &'static [ComplexityRow] {
    match structure {
        Structure::Array => ARRAY,
        Structure::LinkedList => LINKED_LIST,
        Structure::Stack => STACK,
        Structure::Queue => QUEUE,
    }
}

/// Space complexity for `structure`.
#[must_use]
pub const fn space_complexity(_structure: Structure) -> &'static str {
    "O(n)"
}

/// Badge tier for a Big-O string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ComplexityTier {
    Constant,
    Linear,
    Superlinear,
}

impl ComplexityTier {
    #[must_use]
    pub fn of(complexity: &str) -> Self {
        match complexity.trim() {
            "O(1)" => Self::Constant,
            "O(n)" => Self::Linear,
            _ => Self::Superlinear,
        }
    }
}

/// Four-step grade used on algorithm cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rating {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Rating {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers() {
        assert_eq!(ComplexityTier::of("O(1)"), ComplexityTier::Constant);
        assert_eq!(ComplexityTier::of(" O(n) "), ComplexityTier::Linear);
        assert_eq!(ComplexityTier::of("O(n log n)"), ComplexityTier::Superlinear);
    }

    #[test]
    fn ratings_order_best_first() {
        assert!(Rating::Excellent < Rating::Poor);
        assert_eq!(Rating::Average.label(), "average");
    }

    #[test]
    fn every_structure_has_rows() {
        for s in Structure::ALL {
            assert!(!complexities(s).is_empty());
        }
        assert_eq!(complexities(Structure::Stack)[0].operation, "Push");
    }
}
