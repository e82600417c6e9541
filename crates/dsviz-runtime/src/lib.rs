#![forbid(unsafe_code)]

//! Runtime: logical-clock animation, page control and simulations.
//!
//! # Role in dsviz
//! `dsviz-runtime` puts [`dsviz_core`] on a clock. The [`StagedAnimator`]
//! steps one operation at a time and applies its commit exactly once; the
//! [`PageController`] wraps it with a collection, undo history and an
//! operation counter; [`Snapshot`] is what a view reads.
//!
//! # Primary responsibilities
//! - **Animator**: Idle, Running, Settling state machine with `tick`
//!   (pure transition) and `advance` (elapsed time).
//! - **Controller**: single mutation entry point per page; cancels on drop.
//! - **Config**: [`PolicyConfig`] loaded from TOML or JSON.
//! - **Autoplay** and **Race**: seeded random drivers.
//!
//! # Logging
//! Events use the `dsviz.animator`, `dsviz.controller`, `dsviz.autoplay`
//! and `dsviz.race` targets.

pub mod animator;
pub mod autoplay;
pub mod clock;
pub mod controller;
pub mod history;
pub mod policy_config;
pub mod race;
pub mod snapshot;
pub mod timing;

pub use animator::{AnimatorPhase, StagedAnimator, TickOutcome};
pub use autoplay::Autoplay;
pub use clock::FrameClock;
pub use controller::PageController;
pub use history::{HistoryEntry, SnapshotHistory};
pub use policy_config::{
    AutoplayPolicy, PagePolicy, PolicyConfig, PolicyConfigError, RacePolicy, StructurePolicy,
};
pub use race::{
    Algorithm, AlgorithmComplexity, Race, RaceError, RaceKind, RaceState, Racer, Standing,
};
pub use snapshot::{ElementView, Snapshot};
pub use timing::TimingProfile;
