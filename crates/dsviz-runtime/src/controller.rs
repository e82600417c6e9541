#![forbid(unsafe_code)]

//! Page controller: one collection, one animator, undo history and counter.
//!
//! [`PageController`] is the only way a page mutates its collection. Intents
//! go through [`start`](PageController::start); time goes through
//! [`advance`](PageController::advance) or [`tick`](PageController::tick);
//! views read [`snapshot`](PageController::snapshot).
//!
//! # Bookkeeping
//!
//! - Every committed operation that changes contents (everything except
//!   peek and clear) bumps the operation counter and records the
//!   pre-operation contents for undo.
//! - Clear resets both the counter and the history.
//! - Cancelling before the commit records nothing.
//!
//! # Failure Modes
//!
//! - Intents while busy or invalid: [`Rejection`], nothing changes.
//! - Undo while busy or with empty history: returns `false`.

use dsviz_core::{Collection, Operation, OperationKind, Rejection, Structure};
use web_time::Duration;

use crate::animator::{StagedAnimator, TickOutcome};
use crate::history::{HistoryEntry, SnapshotHistory};
use crate::policy_config::{PagePolicy, PolicyConfig};
use crate::snapshot::Snapshot;

/// Owner of a single page's state.
#[derive(Debug)]
pub struct PageController {
    collection: Collection,
    animator: StagedAnimator,
    history: SnapshotHistory,
    operation_count: usize,
    /// Contents before the operation in flight, recorded once it commits.
    pre_operation: Option<HistoryEntry>,
}

impl PageController {
    /// Page for `structure` seeded with its configured contents.
    #[must_use]
    pub fn new(structure: Structure, policy: &PolicyConfig) -> Self {
        Self::from_page(policy.page(structure))
    }

    /// Page for `structure` seeded with `values` instead of the configured
    /// seed.
    #[must_use]
    pub fn with_values(
        structure: Structure,
        values: impl IntoIterator<Item = i64>,
        policy: &PolicyConfig,
    ) -> Self {
        let mut page = policy.page(structure);
        page.seed = values.into_iter().collect();
        Self::from_page(page)
    }

    /// Page built from already resolved settings.
    #[must_use]
    pub fn from_page(page: PagePolicy) -> Self {
        tracing::debug!(
            target: "dsviz.controller",
            structure = %page.structure,
            seed_len = page.seed.len(),
            capacity = ?page.capacity,
            "page created"
        );
        Self {
            collection: Collection::from_values(page.seed).with_capacity_limit(page.capacity),
            animator: StagedAnimator::new(page.structure, page.timing),
            history: SnapshotHistory::new(page.history_depth),
            operation_count: 0,
            pre_operation: None,
        }
    }

    // -----------------------------------------------------------------------
    // Control
    // -----------------------------------------------------------------------

    /// Begin an operation.
    ///
    /// # Errors
    ///
    /// Any [`Rejection`] from the animator; nothing changes on error.
    pub fn start(&mut self, op: &Operation) -> Result<TickOutcome, Rejection> {
        let entry = HistoryEntry {
            elements: self.collection.as_slice().to_vec(),
            operation_count: self.operation_count,
        };
        let outcome = self.animator.start(op, &mut self.collection)?;
        self.pre_operation = Some(entry);
        self.observe(&outcome);
        Ok(outcome)
    }

    /// Apply one logical transition.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.animator.tick(&mut self.collection);
        self.observe(&outcome);
        outcome
    }

    /// Feed elapsed time to the animator.
    pub fn advance(&mut self, dt: Duration) -> Vec<TickOutcome> {
        let outcomes = self.animator.advance(dt, &mut self.collection);
        for outcome in &outcomes {
            self.observe(outcome);
        }
        outcomes
    }

    /// Advance until the animator is idle, returning every outcome and the
    /// logical time it took.
    pub fn run_to_idle(&mut self) -> (Vec<TickOutcome>, Duration) {
        let mut outcomes = Vec::new();
        let mut elapsed = Duration::ZERO;
        while let Some(wait) = self.animator.time_to_next() {
            elapsed += wait;
            outcomes.extend(self.advance(wait));
        }
        (outcomes, elapsed)
    }

    /// Abort the operation in flight. Returns `true` if one was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pre_operation = None;
        self.animator.cancel()
    }

    /// Leave the page: nothing scheduled may fire afterwards.
    pub fn navigate_away(&mut self) {
        if self.cancel() {
            tracing::debug!(
                target: "dsviz.controller",
                structure = %self.structure(),
                "in-flight operation dropped on navigation"
            );
        }
    }

    /// Restore the contents before the last recorded operation.
    ///
    /// Returns `false` while busy or when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.animator.is_idle() {
            return false;
        }
        let Some(entry) = self.history.pop() else {
            return false;
        };
        self.collection.restore(entry.elements);
        self.operation_count = entry.operation_count;
        tracing::info!(
            target: "dsviz.controller",
            len = self.collection.len(),
            operation_count = self.operation_count,
            "undo"
        );
        true
    }

    fn observe(&mut self, outcome: &TickOutcome) {
        let TickOutcome::Committed { commit, .. } = outcome else {
            return;
        };
        let entry = self.pre_operation.take();
        match commit.kind {
            OperationKind::Peek => {}
            OperationKind::Clear => {
                self.history.clear();
                self.operation_count = 0;
            }
            _ => {
                if let Some(entry) = entry {
                    self.history.push(entry);
                }
                self.operation_count += 1;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.collection, &self.animator, self.operation_count)
    }

    #[inline]
    #[must_use]
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    #[inline]
    #[must_use]
    pub fn animator(&self) -> &StagedAnimator {
        &self.animator
    }

    #[inline]
    #[must_use]
    pub fn structure(&self) -> Structure {
        self.animator.structure()
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.animator.is_idle()
    }

    #[inline]
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.animator.is_idle() && !self.history.is_empty()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.navigate_away();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack() -> PageController {
        PageController::new(Structure::Stack, &PolicyConfig::default())
    }

    #[test]
    fn push_then_undo_restores_identities() {
        let mut page = stack();
        let before = page.collection().ids();
        page.start(&Operation::push(60)).unwrap();
        page.run_to_idle();
        assert_eq!(page.collection().values(), vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(page.operation_count(), 1);

        assert!(page.undo());
        assert_eq!(page.collection().ids(), before);
        assert_eq!(page.operation_count(), 0);
        assert!(!page.undo());
    }

    #[test]
    fn peek_is_not_counted() {
        let mut page = stack();
        page.start(&Operation::peek()).unwrap();
        page.run_to_idle();
        assert_eq!(page.operation_count(), 0);
        assert!(!page.can_undo());
    }

    #[test]
    fn clear_resets_counter_and_history() {
        let mut page = stack();
        page.start(&Operation::pop()).unwrap();
        page.run_to_idle();
        assert_eq!(page.operation_count(), 1);
        page.start(&Operation::clear()).unwrap();
        page.run_to_idle();
        assert!(page.collection().is_empty());
        assert_eq!(page.operation_count(), 0);
        assert!(!page.undo());
    }

    #[test]
    fn undo_refused_while_busy() {
        let mut page = stack();
        page.start(&Operation::pop()).unwrap();
        page.run_to_idle();
        page.start(&Operation::push(1)).unwrap();
        assert!(!page.undo());
        page.run_to_idle();
        assert!(page.undo());
    }

    #[test]
    fn cancel_records_nothing() {
        let mut page = stack();
        page.start(&Operation::push(7)).unwrap();
        page.tick();
        assert!(page.cancel());
        page.run_to_idle();
        assert_eq!(page.collection().len(), 5);
        assert_eq!(page.operation_count(), 0);
        assert_eq!(page.history_len(), 0);
    }

    #[test]
    fn run_to_idle_reports_total_time() {
        let mut page = PageController::new(Structure::Array, &PolicyConfig::default());
        page.start(&Operation::insert(7, 1)).unwrap();
        let (_, elapsed) = page.run_to_idle();
        assert_eq!(elapsed, Duration::from_millis(3 * 1200 + 1000));
        assert_eq!(page.collection().values(), vec![10, 7, 25, 100, 42, 999]);
    }

    #[test]
    fn capacity_limits_push() {
        let mut policy = PolicyConfig::default();
        policy.stack.capacity = Some(5);
        let mut page = PageController::new(Structure::Stack, &policy);
        assert_eq!(
            page.start(&Operation::push(1)),
            Err(Rejection::CapacityExceeded { capacity: 5 })
        );
    }

    #[test]
    fn snapshot_reflects_step() {
        let mut page = stack();
        page.start(&Operation::pop()).unwrap();
        let snap = page.snapshot();
        assert_eq!(snap.highlighted(), vec![4]);
        assert_eq!(snap.step, 1);
        assert_eq!(snap.total_steps, 3);
        assert_eq!(snap.status, "Identifying top element: 50");
    }
}
