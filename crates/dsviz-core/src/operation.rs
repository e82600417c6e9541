#![forbid(unsafe_code)]

//! Operation kinds, user intents, and their validation.
//!
//! An [`Operation`] is what the UI hands over: a kind plus an optional index
//! and payload. [`Operation::resolve`] checks it against a [`Collection`] and
//! produces a [`ResolvedOperation`] with a concrete target index, or a
//! [`Rejection`] explaining why the intent cannot start. Resolution never
//! touches the collection.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::structure::Structure;

/// Closed set of structural actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationKind {
    Add,
    Insert,
    Remove,
    Update,
    Enqueue,
    Dequeue,
    Push,
    Pop,
    Peek,
    Clear,
}

impl OperationKind {
    pub const ALL: [Self; 10] = [
        Self::Add,
        Self::Insert,
        Self::Remove,
        Self::Update,
        Self::Enqueue,
        Self::Dequeue,
        Self::Push,
        Self::Pop,
        Self::Peek,
        Self::Clear,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Insert => "insert",
            Self::Remove => "remove",
            Self::Update => "update",
            Self::Enqueue => "enqueue",
            Self::Dequeue => "dequeue",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Peek => "peek",
            Self::Clear => "clear",
        }
    }

    /// Kinds that require a payload value.
    #[must_use]
    pub const fn carries_value(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Insert | Self::Update | Self::Enqueue | Self::Push
        )
    }

    /// Kinds whose target index is supplied by the caller.
    #[must_use]
    pub const fn takes_index(self) -> bool {
        matches!(self, Self::Insert | Self::Remove | Self::Update)
    }

    /// Kinds that add one element on commit.
    #[must_use]
    pub const fn grows(self) -> bool {
        matches!(self, Self::Add | Self::Insert | Self::Enqueue | Self::Push)
    }

    /// Kinds that remove one element on commit.
    #[must_use]
    pub const fn shrinks(self) -> bool {
        matches!(self, Self::Remove | Self::Dequeue | Self::Pop)
    }

    /// Kinds that need at least one element to act on.
    #[must_use]
    pub const fn needs_elements(self) -> bool {
        matches!(
            self,
            Self::Remove | Self::Update | Self::Dequeue | Self::Pop | Self::Peek | Self::Clear
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown operation kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation `{0}`")]
pub struct UnknownOperation(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

/// A user intent, not yet checked against any collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operation {
    pub kind: OperationKind,
    pub index: Option<usize>,
    pub value: Option<i64>,
}

impl Operation {
    #[must_use]
    pub const fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            index: None,
            value: None,
        }
    }

    #[must_use]
    pub const fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub const fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub const fn add(value: i64) -> Self {
        Self::new(OperationKind::Add).with_value(value)
    }

    #[must_use]
    pub const fn insert(value: i64, index: usize) -> Self {
        Self::new(OperationKind::Insert)
            .with_value(value)
            .with_index(index)
    }

    #[must_use]
    pub const fn remove(index: usize) -> Self {
        Self::new(OperationKind::Remove).with_index(index)
    }

    #[must_use]
    pub const fn update(value: i64, index: usize) -> Self {
        Self::new(OperationKind::Update)
            .with_value(value)
            .with_index(index)
    }

    #[must_use]
    pub const fn enqueue(value: i64) -> Self {
        Self::new(OperationKind::Enqueue).with_value(value)
    }

    #[must_use]
    pub const fn dequeue() -> Self {
        Self::new(OperationKind::Dequeue)
    }

    #[must_use]
    pub const fn push(value: i64) -> Self {
        Self::new(OperationKind::Push).with_value(value)
    }

    #[must_use]
    pub const fn pop() -> Self {
        Self::new(OperationKind::Pop)
    }

    #[must_use]
    pub const fn peek() -> Self {
        Self::new(OperationKind::Peek)
    }

    #[must_use]
    pub const fn clear() -> Self {
        Self::new(OperationKind::Clear)
    }

    /// Check this intent against `collection` on a `structure` page.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the structure does not offer the kind,
    /// a payload or index is missing, the index is out of range, the
    /// collection is empty for a kind that needs an element, or the
    /// collection is at capacity for a kind that grows it.
    pub fn resolve(
        &self,
        structure: Structure,
        collection: &Collection,
    ) -> Result<ResolvedOperation, Rejection> {
        let kind = self.kind;
        if !structure.supports(kind) {
            return Err(Rejection::Unsupported { structure, kind });
        }
        if kind.carries_value() && self.value.is_none() {
            return Err(Rejection::MissingValue { kind });
        }
        let len = collection.len();
        if kind.needs_elements() && len == 0 {
            return Err(Rejection::Empty { kind });
        }

        let target = if kind.takes_index() {
            let index = self.index.ok_or(Rejection::MissingIndex { kind })?;
            let limit = if kind == OperationKind::Insert { len } else { len.saturating_sub(1) };
            if index > limit {
                return Err(Rejection::IndexOutOfBounds { index, len });
            }
            index
        } else {
            match kind {
                OperationKind::Add | OperationKind::Enqueue | OperationKind::Push => len,
                OperationKind::Dequeue => 0,
                OperationKind::Pop | OperationKind::Peek => structure.head_index(len),
                _ => 0,
            }
        };

        if kind.grows() && collection.is_full() {
            return Err(Rejection::CapacityExceeded {
                capacity: collection.capacity().unwrap_or(len),
            });
        }

        let target_value = match kind {
            OperationKind::Clear => None,
            _ => collection.get(target).map(|e| e.value),
        };

        Ok(ResolvedOperation {
            structure,
            kind,
            target,
            value: self.value.filter(|_| kind.carries_value()),
            target_value,
            len_before: len,
        })
    }
}

/// An operation bound to a concrete target, ready to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedOperation {
    pub structure: Structure,
    pub kind: OperationKind,
    /// Index the operation acts on (the append slot for tail operations).
    pub target: usize,
    /// Payload for kinds that carry one.
    pub value: Option<i64>,
    /// Value stored at `target` when the operation was resolved.
    pub target_value: Option<i64>,
    /// Collection length when the operation was resolved.
    pub len_before: usize,
}

/// Reasons an intent is declined before any animation begins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("another operation is still animating")]
    Busy,
    #[error("{kind} is not available on a {structure}")]
    Unsupported {
        structure: Structure,
        kind: OperationKind,
    },
    #[error("{kind} needs a value")]
    MissingValue { kind: OperationKind },
    #[error("{kind} needs an index")]
    MissingIndex { kind: OperationKind },
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("cannot {kind} on an empty collection")]
    Empty { kind: OperationKind },
    #[error("capacity of {capacity} elements reached")]
    CapacityExceeded { capacity: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> Collection {
        Collection::from_values([10, 20, 30, 40, 50])
    }

    #[test]
    fn insert_bounds() {
        let c = five();
        assert!(Operation::insert(1, 5).resolve(Structure::LinkedList, &c).is_ok());
        assert_eq!(
            Operation::insert(1, 6).resolve(Structure::LinkedList, &c),
            Err(Rejection::IndexOutOfBounds { index: 6, len: 5 })
        );
    }

    #[test]
    fn remove_bounds() {
        let c = five();
        assert!(Operation::remove(4).resolve(Structure::Array, &c).is_ok());
        assert_eq!(
            Operation::remove(5).resolve(Structure::Array, &c),
            Err(Rejection::IndexOutOfBounds { index: 5, len: 5 })
        );
    }

    #[test]
    fn dequeue_on_empty_is_rejected() {
        let c = Collection::new();
        assert_eq!(
            Operation::dequeue().resolve(Structure::Queue, &c),
            Err(Rejection::Empty {
                kind: OperationKind::Dequeue
            })
        );
    }

    #[test]
    fn unsupported_kind() {
        let c = five();
        assert_eq!(
            Operation::push(1).resolve(Structure::Array, &c),
            Err(Rejection::Unsupported {
                structure: Structure::Array,
                kind: OperationKind::Push
            })
        );
    }

    #[test]
    fn missing_payload() {
        let c = five();
        let op = Operation::new(OperationKind::Add);
        assert_eq!(
            op.resolve(Structure::Array, &c),
            Err(Rejection::MissingValue {
                kind: OperationKind::Add
            })
        );
        let op = Operation::new(OperationKind::Remove);
        assert_eq!(
            op.resolve(Structure::Array, &c),
            Err(Rejection::MissingIndex {
                kind: OperationKind::Remove
            })
        );
    }

    #[test]
    fn fixed_targets() {
        let c = five();
        let pop = Operation::pop().resolve(Structure::Stack, &c).unwrap();
        assert_eq!((pop.target, pop.target_value), (4, Some(50)));
        let deq = Operation::dequeue().resolve(Structure::Queue, &c).unwrap();
        assert_eq!((deq.target, deq.target_value), (0, Some(10)));
        let peek = Operation::peek().resolve(Structure::Queue, &c).unwrap();
        assert_eq!(peek.target, 0);
        let push = Operation::push(60).resolve(Structure::Stack, &c).unwrap();
        assert_eq!((push.target, push.target_value), (5, None));
    }

    #[test]
    fn capacity_blocks_growth_only() {
        let c = five().with_capacity_limit(Some(5));
        assert_eq!(
            Operation::push(1).resolve(Structure::Stack, &c),
            Err(Rejection::CapacityExceeded { capacity: 5 })
        );
        assert!(Operation::pop().resolve(Structure::Stack, &c).is_ok());
    }

    #[test]
    fn stray_payload_is_dropped() {
        let c = five();
        let op = Operation::pop().with_value(3);
        let resolved = op.resolve(Structure::Stack, &c).unwrap();
        assert_eq!(resolved.value, None);
    }

    #[test]
    fn parse_kind() {
        assert_eq!("Enqueue".parse::<OperationKind>(), Ok(OperationKind::Enqueue));
        assert!("splice".parse::<OperationKind>().is_err());
    }
}
