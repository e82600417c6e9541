#![forbid(unsafe_code)]

//! Operation descriptor registry.
//!
//! Each (structure, kind) pair maps to a static [`Descriptor`]: the ordered
//! steps of its animation, the role each step plays, the status message
//! template shown while the step is current, and the step at which the
//! collection is mutated. Adding an operation means adding a table entry.
//!
//! # Templates
//!
//! Message templates substitute these placeholders from a [`StepContext`]:
//!
//! | Placeholder | Meaning |
//! |-------------|---------|
//! | `{value}`   | payload value |
//! | `{index}`   | target index |
//! | `{target}`  | value stored at the target when the operation started |
//! | `{len}`     | collection length when the operation started |
//!
//! Unknown placeholders are left untouched; absent values render as `?`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::operation::{OperationKind, ResolvedOperation};
use crate::structure::Structure;

/// What a step shows, which drives highlight policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepRole {
    /// Pending element is being created off to the side.
    Create,
    /// Pending element travels to its slot.
    Move,
    /// Walking from the head to just before the target.
    Traverse,
    /// Walking to the last element.
    SeekTail,
    /// Elements from the target onward make room.
    Shift,
    /// Links around the target are rewired.
    Splice,
    /// The target element is singled out.
    Access,
    /// The target element is being taken out.
    Excise,
    /// The target element is displayed without change.
    Inspect,
    /// Every element is involved.
    All,
    /// Operation finished.
    Done,
}

/// One step of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSpec {
    pub role: StepRole,
    pub template: &'static str,
}

const fn step(role: StepRole, template: &'static str) -> StepSpec {
    StepSpec { role, template }
}

/// Static metadata for one operation on one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub structure: Structure,
    pub kind: OperationKind,
    pub steps: &'static [StepSpec],
    /// 1-based step at which the commit is applied.
    pub commit_step: usize,
}

impl Descriptor {
    #[inline]
    #[must_use]
    pub const fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Spec for a 1-based step.
    #[must_use]
    pub fn step(&self, step: usize) -> Option<&'static StepSpec> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    #[must_use]
    pub fn role_at(&self, step: usize) -> Option<StepRole> {
        self.step(step).map(|s| s.role)
    }

    /// Rendered status message for a 1-based step.
    #[must_use]
    pub fn message_for(&self, step: usize, ctx: &StepContext) -> Option<String> {
        self.step(step).map(|s| ctx.render(s.template))
    }
}

/// Values available to message templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepContext {
    pub value: Option<i64>,
    pub index: usize,
    pub target: Option<i64>,
    pub len: usize,
}

impl From<&ResolvedOperation> for StepContext {
    fn from(op: &ResolvedOperation) -> Self {
        Self {
            value: op.value,
            index: op.target,
            target: op.target_value,
            len: op.len_before,
        }
    }
}

impl StepContext {
    /// Substitute placeholders in `template`.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + 8);
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open..];
            let Some(close) = after.find('}') else {
                out.push_str(after);
                return out;
            };
            let key = &after[1..close];
            match self.lookup(key) {
                Some(text) => out.push_str(&text),
                None => out.push_str(&after[..=close]),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let missing = || "?".to_string();
        match key {
            "value" => Some(self.value.map_or_else(missing, |v| v.to_string())),
            "index" => Some(self.index.to_string()),
            "target" => Some(self.target.map_or_else(missing, |v| v.to_string())),
            "len" => Some(self.len.to_string()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

use StepRole as R;

const ARRAY_ADD: &[StepSpec] = &[
    step(R::Create, "Creating space at the end of the array"),
    step(R::Done, "Successfully added {value} at index {index}"),
];
const ARRAY_INSERT: &[StepSpec] = &[
    step(R::Shift, "Shifting elements after index {index} to make space"),
    step(R::Splice, "Inserting {value} at index {index}"),
    step(R::Done, "Successfully inserted {value} at index {index}"),
];
const ARRAY_REMOVE: &[StepSpec] = &[
    step(R::Excise, "Removing element at index {index}"),
    step(R::Done, "Successfully removed element and shifted remaining elements"),
];
const ARRAY_UPDATE: &[StepSpec] = &[
    step(R::Access, "Accessing element at index {index}"),
    step(R::Done, "Successfully updated value at index {index} to {value}"),
];

const LIST_ADD: &[StepSpec] = &[
    step(R::Create, "Creating new node with value {value}"),
    step(R::SeekTail, "Traversing to find the last node in the list"),
    step(R::Done, "Successfully linked new node to the end of the list"),
];
const LIST_INSERT: &[StepSpec] = &[
    step(R::Create, "Creating new node with value {value}"),
    step(R::Traverse, "Traversing to position {index}"),
    step(R::Splice, "Updating next pointers to insert the new node"),
    step(R::Done, "Successfully inserted new node at position {index}"),
];
const LIST_REMOVE: &[StepSpec] = &[
    step(R::Traverse, "Traversing to position {index}"),
    step(R::Splice, "Updating next pointers to bypass the node"),
    step(R::Done, "Successfully removed node at position {index}"),
];

const STACK_PUSH: &[StepSpec] = &[
    step(R::Create, "Creating new element with value {value}"),
    step(R::Move, "Moving element to stack top"),
    step(R::Done, "Successfully pushed {value} to the stack"),
];
const STACK_POP: &[StepSpec] = &[
    step(R::Access, "Identifying top element: {target}"),
    step(R::Excise, "Removing element from stack"),
    step(R::Done, "Successfully popped {target}"),
];
const STACK_PEEK: &[StepSpec] = &[
    step(R::Access, "Examining top element: {target}"),
    step(R::Inspect, "Top element is {target} (not removed)"),
];
const STACK_CLEAR: &[StepSpec] = &[
    step(R::All, "Clearing all elements from stack"),
    step(R::Done, "Stack cleared successfully"),
];

const QUEUE_ENQUEUE: &[StepSpec] = &[
    step(R::Create, "Creating new element with value {value}"),
    step(R::Move, "Moving element to the rear of the queue"),
    step(R::Done, "Successfully enqueued {value} at the rear"),
];
const QUEUE_DEQUEUE: &[StepSpec] = &[
    step(R::Access, "Accessing front element: {target}"),
    step(R::Excise, "Removing front element from the queue"),
    step(R::Done, "Successfully dequeued {target}"),
];
const QUEUE_PEEK: &[StepSpec] = &[step(
    R::Inspect,
    "Peeking at front element: {target} (no removal)",
)];
const QUEUE_CLEAR: &[StepSpec] = &[
    step(R::All, "Clearing all elements from queue"),
    step(R::Done, "Queue cleared successfully"),
];

const fn entry(
    structure: Structure,
    kind: OperationKind,
    steps: &'static [StepSpec],
) -> Descriptor {
    Descriptor {
        structure,
        kind,
        steps,
        commit_step: steps.len(),
    }
}

const TABLE: &[Descriptor] = &[
    entry(Structure::Array, OperationKind::Add, ARRAY_ADD),
    entry(Structure::Array, OperationKind::Insert, ARRAY_INSERT),
    entry(Structure::Array, OperationKind::Remove, ARRAY_REMOVE),
    entry(Structure::Array, OperationKind::Update, ARRAY_UPDATE),
    entry(Structure::LinkedList, OperationKind::Add, LIST_ADD),
    entry(Structure::LinkedList, OperationKind::Insert, LIST_INSERT),
    entry(Structure::LinkedList, OperationKind::Remove, LIST_REMOVE),
    entry(Structure::Stack, OperationKind::Push, STACK_PUSH),
    entry(Structure::Stack, OperationKind::Pop, STACK_POP),
    entry(Structure::Stack, OperationKind::Peek, STACK_PEEK),
    entry(Structure::Stack, OperationKind::Clear, STACK_CLEAR),
    entry(Structure::Queue, OperationKind::Enqueue, QUEUE_ENQUEUE),
    entry(Structure::Queue, OperationKind::Dequeue, QUEUE_DEQUEUE),
    entry(Structure::Queue, OperationKind::Peek, QUEUE_PEEK),
    entry(Structure::Queue, OperationKind::Clear, QUEUE_CLEAR),
];

/// Lookup into the static descriptor table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registry;

impl Registry {
    /// Descriptor for `kind` on `structure`, if the page offers it.
    #[must_use]
    pub fn get(structure: Structure, kind: OperationKind) -> Option<&'static Descriptor> {
        TABLE
            .iter()
            .find(|d| d.structure == structure && d.kind == kind)
    }

    /// Descriptor for `kind` on `structure`.
    ///
    /// # Panics
    ///
    /// Panics if no descriptor exists. Intents are checked with
    /// [`Structure::supports`] before they reach this point, so a miss is a
    /// defect in the table.
    #[must_use]
    pub fn describe(structure: Structure, kind: OperationKind) -> &'static Descriptor {
        match Self::get(structure, kind) {
            Some(descriptor) => descriptor,
            None => panic!("no descriptor for {kind} on {structure}"),
        }
    }

    /// Every registered descriptor.
    pub fn all() -> impl Iterator<Item = &'static Descriptor> {
        TABLE.iter()
    }
}
