#![forbid(unsafe_code)]

//! The data structures a page can visualise.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::operation::OperationKind;

/// Which data structure a page animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Structure {
    Array,
    LinkedList,
    Stack,
    Queue,
}

impl Structure {
    pub const ALL: [Self; 4] = [Self::Array, Self::LinkedList, Self::Stack, Self::Queue];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::LinkedList => "linked_list",
            Self::Stack => "stack",
            Self::Queue => "queue",
        }
    }

    /// Operation kinds offered on this structure's page.
    #[must_use]
    pub const fn kinds(self) -> &'static [OperationKind] {
        use OperationKind as K;
        match self {
            Self::Array => &[K::Add, K::Insert, K::Remove, K::Update],
            Self::LinkedList => &[K::Add, K::Insert, K::Remove],
            Self::Stack => &[K::Push, K::Pop, K::Peek, K::Clear],
            Self::Queue => &[K::Enqueue, K::Dequeue, K::Peek, K::Clear],
        }
    }

    #[must_use]
    pub fn supports(self, kind: OperationKind) -> bool {
        self.kinds().contains(&kind)
    }

    /// Values a freshly loaded page starts with.
    #[must_use]
    pub const fn seed_values(self) -> &'static [i64] {
        match self {
            Self::Array => &[10, 25, 100, 42, 999],
            Self::LinkedList => &[10, 20, 30, 40],
            Self::Stack | Self::Queue => &[10, 20, 30, 40, 50],
        }
    }

    /// Index the "top"/"front" operations (pop, dequeue, peek) act on.
    #[must_use]
    pub const fn head_index(self, len: usize) -> usize {
        match self {
            Self::Stack => len.saturating_sub(1),
            _ => 0,
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown structure name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown structure `{0}` (expected array, linked_list, stack or queue)")]
pub struct UnknownStructure(pub String);

impl FromStr for Structure {
    type Err = UnknownStructure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "array" | "arrays" => Ok(Self::Array),
            "linked_list" | "linkedlist" | "list" => Ok(Self::LinkedList),
            "stack" | "stacks" => Ok(Self::Stack),
            "queue" | "queues" => Ok(Self::Queue),
            _ => Err(UnknownStructure(s.to_string())),
        }
    }
}
