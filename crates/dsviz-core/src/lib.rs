#![forbid(unsafe_code)]

//! Core: collections, operation descriptors, highlight policy and commits.
//!
//! # Role in dsviz
//! `dsviz-core` holds everything about a data-structure animation that does
//! not depend on time. It knows which steps an operation has, what each step
//! says and highlights, and how the collection changes when the operation
//! commits. It owns no clocks and performs no I/O.
//!
//! # Primary responsibilities
//! - **Collection**: ordered elements with stable, never-reused identities.
//! - **Operation**: closed set of kinds, intent validation into
//!   [`ResolvedOperation`] or a [`Rejection`].
//! - **Registry**: static per-structure step tables ([`Descriptor`]).
//! - **Highlights**: [`highlights_for`] maps a step to flagged indices.
//! - **Commit**: [`commit::apply`] is the single mutation path.
//!
//! # How it fits in the system
//! `dsviz-runtime` drives these pieces on a logical clock and exposes
//! snapshots to whatever paints them.

pub mod collection;
pub mod commit;
pub mod descriptor;
pub mod element;
pub mod highlight;
pub mod operation;
pub mod reference;
pub mod structure;

pub use collection::Collection;
pub use commit::Commit;
pub use descriptor::{Descriptor, Registry, StepContext, StepRole, StepSpec};
pub use element::{Age, Element, ElementId, IdAllocator};
pub use highlight::{HighlightFrame, highlights_for};
pub use operation::{Operation, OperationKind, Rejection, ResolvedOperation, UnknownOperation};
pub use structure::{Structure, UnknownStructure};
