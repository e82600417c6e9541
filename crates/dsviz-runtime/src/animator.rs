#![forbid(unsafe_code)]

//! Staged animator: single-flight, logical-clock stepper for one operation.
//!
//! A [`StagedAnimator`] takes a validated operation through the steps of its
//! [`Descriptor`], refreshing the status message and highlight frame on each
//! step and applying the commit exactly once at the descriptor's commit step.
//!
//! # State machine
//!
//! ```text
//!            start() ok                 step == total, tick()
//!   Idle ─────────────────► Running ───────────────────────► Settling
//!    ▲                      │  ▲ │                               │
//!    │                      │  └─┘ tick(): step += 1             │
//!    │        cancel()      │      (commit at commit_step)       │
//!    ├──────────────────────┘                                    │
//!    │                        tick() / cancel()                  │
//!    └───────────────────────────────────────────────────────────┘
//! ```
//!
//! [`tick`](StagedAnimator::tick) is the pure logical transition and can be
//! driven directly in tests. [`advance`](StagedAnimator::advance) feeds it
//! from elapsed time using the [`TimingProfile`].
//!
//! # Invariants
//!
//! 1. `start()` succeeds only from `Idle`; a rejected start changes nothing.
//! 2. Step `n + 1` is never entered before step `n` (including its commit)
//!    has been applied.
//! 3. The commit is applied at most once per operation and never after
//!    `cancel()`.
//! 4. Messages and highlights are evaluated before the commit of the same
//!    step, against the collection the operation was resolved on.
//!
//! # Failure Modes
//!
//! - Invalid intents: returned as [`Rejection`], no transition.
//! - Missing descriptor: panics in [`Registry::describe`] (table defect).

use dsviz_core::commit::{self, Commit};
use dsviz_core::{
    Collection, Descriptor, Element, HighlightFrame, Operation, OperationKind, Registry,
    Rejection, ResolvedOperation, StepContext, Structure, highlights_for,
};
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::timing::TimingProfile;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle phase of the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatorPhase {
    /// Nothing in flight; `start()` is accepted.
    Idle,
    /// Stepping through the descriptor.
    Running,
    /// Final step shown; waiting out the settle delay.
    Settling,
}

/// Result of one logical transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing in flight.
    Idle,
    /// Entered `step` of `total`.
    Stepped { step: usize, total: usize },
    /// Entered `step` and applied the commit.
    Committed { step: usize, commit: Commit },
    /// Final step done; settle delay started.
    Settling,
    /// Returned to idle after `kind` finished.
    Finished { kind: OperationKind },
}

impl TickOutcome {
    /// The commit applied by this transition, if any.
    #[must_use]
    pub fn commit(&self) -> Option<&Commit> {
        match self {
            Self::Committed { commit, .. } => Some(commit),
            _ => None,
        }
    }
}

/// Operation currently in flight.
#[derive(Debug, Clone)]
struct Flight {
    op: ResolvedOperation,
    descriptor: &'static Descriptor,
    step: usize,
    message: String,
    highlights: HighlightFrame,
    pending: Option<Element>,
    departed: Option<Element>,
    commit: Option<Commit>,
}

static EMPTY_FRAME: HighlightFrame = HighlightFrame {
    indices: std::collections::BTreeSet::new(),
    pending_visible: false,
    traversal_index: None,
};

/// Timer-driven stepper for one operation at a time.
#[derive(Debug, Clone)]
pub struct StagedAnimator {
    structure: Structure,
    timing: TimingProfile,
    phase: AnimatorPhase,
    flight: Option<Flight>,
    /// Time accumulated toward the next transition.
    pending_time: Duration,
    /// Total logical time fed through `advance`.
    clock: Duration,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl StagedAnimator {
    #[must_use]
    pub fn new(structure: Structure, timing: TimingProfile) -> Self {
        Self {
            structure,
            timing,
            phase: AnimatorPhase::Idle,
            flight: None,
            pending_time: Duration::ZERO,
            clock: Duration::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

impl StagedAnimator {
    /// Begin animating `op` against `collection`.
    ///
    /// On success the animator is `Running` at step 1 and the returned
    /// outcome describes entering that step (a one-step descriptor commits
    /// immediately).
    ///
    /// # Errors
    ///
    /// [`Rejection::Busy`] while an operation is in flight, otherwise any
    /// rejection from [`Operation::resolve`]. State is untouched on error.
    pub fn start(
        &mut self,
        op: &Operation,
        collection: &mut Collection,
    ) -> Result<TickOutcome, Rejection> {
        if self.phase != AnimatorPhase::Idle {
            tracing::debug!(
                target: "dsviz.animator",
                kind = %op.kind,
                phase = ?self.phase,
                "start rejected: busy"
            );
            return Err(Rejection::Busy);
        }
        let resolved = op.resolve(self.structure, collection).inspect_err(|rejection| {
            tracing::debug!(
                target: "dsviz.animator",
                kind = %op.kind,
                %rejection,
                "start rejected"
            );
        })?;

        let descriptor = Registry::describe(self.structure, resolved.kind);
        let pending = commit::mint_pending(collection, &resolved, Some(self.clock));
        self.flight = Some(Flight {
            op: resolved,
            descriptor,
            step: 0,
            message: String::new(),
            highlights: HighlightFrame::empty(),
            pending,
            departed: None,
            commit: None,
        });
        self.phase = AnimatorPhase::Running;
        self.pending_time = Duration::ZERO;

        tracing::info!(
            target: "dsviz.animator",
            structure = %self.structure,
            kind = %resolved.kind,
            target_index = resolved.target,
            total = descriptor.total_steps(),
            "operation started"
        );
        Ok(self.enter_next_step(collection))
    }

    /// Abort the operation in flight without committing.
    ///
    /// Returns `true` if something was cancelled. A commit already applied
    /// (the animator was settling) stays applied.
    pub fn cancel(&mut self) -> bool {
        if self.phase == AnimatorPhase::Idle {
            return false;
        }
        if let Some(flight) = &self.flight {
            tracing::info!(
                target: "dsviz.animator",
                kind = %flight.op.kind,
                step = flight.step,
                committed = flight.commit.is_some(),
                "operation cancelled"
            );
        }
        self.reset();
        true
    }

    /// Apply one logical transition.
    pub fn tick(&mut self, collection: &mut Collection) -> TickOutcome {
        match self.phase {
            AnimatorPhase::Idle => TickOutcome::Idle,
            AnimatorPhase::Running => {
                let (step, total) = self
                    .flight
                    .as_ref()
                    .map_or((0, 0), |f| (f.step, f.descriptor.total_steps()));
                if step < total {
                    self.enter_next_step(collection)
                } else {
                    self.phase = AnimatorPhase::Settling;
                    tracing::debug!(target: "dsviz.animator", step, total, "settling");
                    TickOutcome::Settling
                }
            }
            AnimatorPhase::Settling => {
                let kind = self
                    .flight
                    .as_ref()
                    .map_or(OperationKind::Peek, |f| f.op.kind);
                self.reset();
                tracing::info!(target: "dsviz.animator", %kind, "operation finished");
                TickOutcome::Finished { kind }
            }
        }
    }

    /// Feed `dt` of elapsed time, firing every transition that falls due.
    ///
    /// Leftover time carries into the next interval. Idle time advances the
    /// logical clock only.
    pub fn advance(&mut self, dt: Duration, collection: &mut Collection) -> Vec<TickOutcome> {
        self.clock = self.clock.saturating_add(dt);
        let mut outcomes = Vec::new();
        if self.phase == AnimatorPhase::Idle {
            return outcomes;
        }
        self.pending_time = self.pending_time.saturating_add(dt);
        while let Some(wait) = self.current_wait() {
            if self.pending_time < wait {
                break;
            }
            self.pending_time -= wait;
            outcomes.push(self.tick(collection));
        }
        outcomes
    }

    /// Time still needed before the next transition, if one is scheduled.
    #[must_use]
    pub fn time_to_next(&self) -> Option<Duration> {
        self.current_wait()
            .map(|wait| wait.saturating_sub(self.pending_time))
    }

    fn current_wait(&self) -> Option<Duration> {
        match self.phase {
            AnimatorPhase::Idle => None,
            AnimatorPhase::Running => Some(self.timing.tick_interval()),
            AnimatorPhase::Settling => self
                .flight
                .as_ref()
                .map(|f| self.timing.settle_for(f.op.kind)),
        }
    }

    fn enter_next_step(&mut self, collection: &mut Collection) -> TickOutcome {
        let Some(flight) = self.flight.as_mut() else {
            return TickOutcome::Idle;
        };
        flight.step += 1;
        let step = flight.step;
        let descriptor = flight.descriptor;
        let total = descriptor.total_steps();
        let ctx = StepContext::from(&flight.op);

        flight.message = descriptor.message_for(step, &ctx).unwrap_or_default();
        flight.highlights = descriptor.role_at(step).map_or_else(HighlightFrame::empty, |role| {
            highlights_for(role, flight.op.target, collection.len(), flight.pending.is_some())
        });
        tracing::debug!(
            target: "dsviz.animator",
            kind = %flight.op.kind,
            step,
            total,
            message = %flight.message,
            "step"
        );

        if step != descriptor.commit_step || flight.commit.is_some() {
            return TickOutcome::Stepped { step, total };
        }

        let applied = commit::apply(collection, &flight.op, flight.pending.take());
        if applied.removed.len() == 1 {
            flight.departed = applied.removed.first().copied();
        }
        flight.commit = Some(applied.clone());
        tracing::info!(
            target: "dsviz.animator",
            kind = %flight.op.kind,
            step,
            len_before = applied.len_before,
            len_after = applied.len_after,
            "commit applied"
        );
        TickOutcome::Committed {
            step,
            commit: applied,
        }
    }

    fn reset(&mut self) {
        self.phase = AnimatorPhase::Idle;
        self.flight = None;
        self.pending_time = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

impl StagedAnimator {
    #[inline]
    #[must_use]
    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == AnimatorPhase::Idle
    }

    #[inline]
    #[must_use]
    pub fn structure(&self) -> Structure {
        self.structure
    }

    #[inline]
    #[must_use]
    pub fn timing(&self) -> &TimingProfile {
        &self.timing
    }

    /// Logical time fed through [`advance`](Self::advance).
    #[inline]
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Current 1-based step; 0 when idle.
    #[must_use]
    pub fn step(&self) -> usize {
        self.flight.as_ref().map_or(0, |f| f.step)
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.flight
            .as_ref()
            .map_or(0, |f| f.descriptor.total_steps())
    }

    /// Status line for the current step; empty when idle.
    #[must_use]
    pub fn status_message(&self) -> &str {
        self.flight.as_ref().map_or("", |f| f.message.as_str())
    }

    #[must_use]
    pub fn highlights(&self) -> &HighlightFrame {
        self.flight.as_ref().map_or(&EMPTY_FRAME, |f| &f.highlights)
    }

    /// Element shown mid-flight before it is committed.
    #[must_use]
    pub fn pending_element(&self) -> Option<&Element> {
        self.flight.as_ref().and_then(|f| f.pending.as_ref())
    }

    /// Element taken out by the commit, kept for display until idle.
    #[must_use]
    pub fn departed_element(&self) -> Option<&Element> {
        self.flight.as_ref().and_then(|f| f.departed.as_ref())
    }

    #[must_use]
    pub fn current_operation(&self) -> Option<&ResolvedOperation> {
        self.flight.as_ref().map(|f| &f.op)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const MS_1500: Duration = Duration::from_millis(1500);

    fn list() -> (StagedAnimator, Collection) {
        (
            StagedAnimator::new(
                Structure::LinkedList,
                TimingProfile::for_structure(Structure::LinkedList),
            ),
            Collection::from_values([10, 20, 30, 40, 50]),
        )
    }

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn starts_at_step_one() {
        let (mut anim, mut c) = list();
        let out = anim.start(&Operation::insert(99, 2), &mut c).unwrap();
        assert_eq!(out, TickOutcome::Stepped { step: 1, total: 4 });
        assert_eq!(anim.phase(), AnimatorPhase::Running);
        assert_eq!(anim.status_message(), "Creating new node with value 99");
        assert!(anim.highlights().pending_visible);
        assert_eq!(anim.pending_element().map(|e| e.value), Some(99));
    }

    #[test]
    fn insert_walks_traverse_then_splice() {
        let (mut anim, mut c) = list();
        anim.start(&Operation::insert(99, 2), &mut c).unwrap();

        anim.tick(&mut c);
        assert_eq!(anim.highlights().indices, set(&[0, 1]));
        assert_eq!(anim.status_message(), "Traversing to position 2");

        anim.tick(&mut c);
        assert_eq!(anim.highlights().indices, set(&[1, 2]));
        assert_eq!(c.len(), 5, "no commit before the commit step");

        let out = anim.tick(&mut c);
        assert!(out.commit().is_some());
        assert_eq!(c.values(), vec![10, 20, 99, 30, 40, 50]);
        assert!(anim.pending_element().is_none());
    }

    #[test]
    fn full_lifecycle_returns_to_idle() {
        let (mut anim, mut c) = list();
        anim.start(&Operation::remove(1), &mut c).unwrap();
        assert!(matches!(anim.tick(&mut c), TickOutcome::Stepped { step: 2, .. }));
        assert!(matches!(anim.tick(&mut c), TickOutcome::Committed { step: 3, .. }));
        assert_eq!(anim.tick(&mut c), TickOutcome::Settling);
        assert_eq!(
            anim.tick(&mut c),
            TickOutcome::Finished {
                kind: OperationKind::Remove
            }
        );
        assert!(anim.is_idle());
        assert_eq!(anim.step(), 0);
        assert_eq!(anim.status_message(), "");
        assert!(anim.highlights().is_empty());
        assert_eq!(c.values(), vec![10, 30, 40, 50]);
    }

    #[test]
    fn busy_start_is_rejected_without_side_effects() {
        let (mut anim, mut c) = list();
        anim.start(&Operation::add(60), &mut c).unwrap();
        let issued = c.identities_issued();
        assert_eq!(
            anim.start(&Operation::remove(0), &mut c),
            Err(Rejection::Busy)
        );
        assert_eq!(c.identities_issued(), issued);
        assert_eq!(anim.current_operation().map(|o| o.kind), Some(OperationKind::Add));
    }

    #[test]
    fn invalid_start_leaves_idle() {
        let (mut anim, mut c) = list();
        let issued = c.identities_issued();
        assert!(anim.start(&Operation::insert(1, 9), &mut c).is_err());
        assert!(anim.is_idle());
        assert_eq!(c.identities_issued(), issued);
    }

    #[test]
    fn cancel_never_commits() {
        let (mut anim, mut c) = list();
        anim.start(&Operation::insert(7, 0), &mut c).unwrap();
        anim.tick(&mut c);
        anim.tick(&mut c);
        assert!(anim.cancel());
        assert!(anim.is_idle());
        assert!(anim.pending_element().is_none());
        for _ in 0..5 {
            assert_eq!(anim.tick(&mut c), TickOutcome::Idle);
        }
        assert_eq!(c.values(), vec![10, 20, 30, 40, 50]);
        assert!(!anim.cancel());
    }

    #[test]
    fn advance_paces_steps() {
        let (mut anim, mut c) = list();
        anim.start(&Operation::add(60), &mut c).unwrap();
        assert!(anim.advance(Duration::from_millis(1499), &mut c).is_empty());
        let out = anim.advance(Duration::from_millis(1), &mut c);
        assert_eq!(out, vec![TickOutcome::Stepped { step: 2, total: 3 }]);
        assert_eq!(anim.time_to_next(), Some(MS_1500));
    }

    #[test]
    fn advance_carries_overshoot_through_settle() {
        let (mut anim, mut c) = list();
        anim.start(&Operation::add(60), &mut c).unwrap();
        let timing = *anim.timing();
        let total = timing.total_for(OperationKind::Add, 3);
        let outcomes = anim.advance(total, &mut c);
        assert_eq!(outcomes.len(), 4);
        assert!(anim.is_idle());
        assert_eq!(c.values(), vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn one_step_peek_commits_on_start() {
        let mut anim = StagedAnimator::new(
            Structure::Queue,
            TimingProfile::for_structure(Structure::Queue),
        );
        let mut q = Collection::from_values([1, 2, 3]);
        let out = anim.start(&Operation::peek(), &mut q).unwrap();
        assert!(out.commit().is_some());
        assert_eq!(anim.highlights().indices, set(&[0]));
        assert_eq!(anim.status_message(), "Peeking at front element: 1 (no removal)");
        assert_eq!(anim.tick(&mut q), TickOutcome::Settling);
        // Peek on a queue lingers beyond the normal settle delay.
        assert!(anim.advance(Duration::from_millis(1500), &mut q).is_empty());
        assert_eq!(anim.advance(Duration::from_millis(2000), &mut q).len(), 1);
        assert_eq!(q.values(), vec![1, 2, 3]);
    }

    #[test]
    fn pop_reports_departed_element() {
        let mut anim = StagedAnimator::new(
            Structure::Stack,
            TimingProfile::for_structure(Structure::Stack),
        );
        let mut s = Collection::from_values([1, 2, 3]);
        anim.start(&Operation::pop(), &mut s).unwrap();
        assert_eq!(anim.status_message(), "Identifying top element: 3");
        anim.tick(&mut s);
        anim.tick(&mut s);
        assert_eq!(anim.status_message(), "Successfully popped 3");
        assert_eq!(anim.departed_element().map(|e| e.value), Some(3));
        assert_eq!(s.values(), vec![1, 2]);
    }

    #[test]
    fn pending_element_carries_logical_timestamp() {
        let (mut anim, mut c) = list();
        anim.advance(Duration::from_secs(3), &mut c);
        anim.start(&Operation::add(1), &mut c).unwrap();
        assert_eq!(
            anim.pending_element().and_then(|e| e.created_at),
            Some(Duration::from_secs(3))
        );
    }
}
