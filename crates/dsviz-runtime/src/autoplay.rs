#![forbid(unsafe_code)]

//! Automatic random operations on an idle page.
//!
//! Once the page has been idle for the configured interval, [`Autoplay`]
//! picks one of the page's kinds at random and starts it. A pick that the
//! page cannot honour right now (popping an empty stack, pushing a full one)
//! is skipped and the interval starts over. Clear is never picked.

use dsviz_core::{Operation, OperationKind};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::Duration;

use crate::controller::PageController;
use crate::policy_config::AutoplayPolicy;

/// Random operation driver.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Duration,
    min_value: i64,
    max_value: i64,
    idle_for: Duration,
    rng: SmallRng,
}

impl Autoplay {
    /// Driver with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(policy: &AutoplayPolicy, seed: u64) -> Self {
        Self::with_rng(policy, SmallRng::seed_from_u64(seed))
    }

    /// Driver seeded from the OS.
    #[must_use]
    pub fn from_entropy(policy: &AutoplayPolicy) -> Self {
        Self::with_rng(policy, SmallRng::from_os_rng())
    }

    fn with_rng(policy: &AutoplayPolicy, rng: SmallRng) -> Self {
        Self {
            interval: policy.interval(),
            min_value: policy.min_value,
            max_value: policy.max_value.max(policy.min_value),
            idle_for: Duration::ZERO,
            rng,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Account `dt` of time and start an operation if one is due.
    ///
    /// Returns the operation that was started. Time spent while the page is
    /// busy does not count toward the interval.
    pub fn poll(&mut self, dt: Duration, page: &mut PageController) -> Option<Operation> {
        if !page.is_idle() {
            self.idle_for = Duration::ZERO;
            return None;
        }
        self.idle_for = self.idle_for.saturating_add(dt);
        if self.idle_for < self.interval {
            return None;
        }
        self.idle_for = Duration::ZERO;

        let op = self.pick(page)?;
        match page.start(&op) {
            Ok(_) => {
                tracing::debug!(target: "dsviz.autoplay", kind = %op.kind, "autoplay started");
                Some(op)
            }
            Err(rejection) => {
                tracing::debug!(target: "dsviz.autoplay", kind = %op.kind, %rejection, "autoplay skipped");
                None
            }
        }
    }

    /// Choose a random operation for `page`, or `None` when the roll lands
    /// on something the page cannot do.
    fn pick(&mut self, page: &PageController) -> Option<Operation> {
        let kinds: Vec<OperationKind> = page
            .structure()
            .kinds()
            .iter()
            .copied()
            .filter(|k| *k != OperationKind::Clear)
            .collect();
        if kinds.is_empty() {
            return None;
        }
        let kind = kinds[self.rng.random_range(0..kinds.len())];
        let collection = page.collection();
        let len = collection.len();
        if kind.grows() && collection.is_full() {
            return None;
        }
        if kind.needs_elements() && len == 0 {
            return None;
        }

        let value = self.rng.random_range(self.min_value..=self.max_value);
        let op = match kind {
            OperationKind::Insert => Operation::insert(value, self.rng.random_range(0..=len)),
            OperationKind::Update => Operation::update(value, self.rng.random_range(0..len)),
            OperationKind::Remove => Operation::remove(self.rng.random_range(0..len)),
            k if k.carries_value() => Operation::new(k).with_value(value),
            k => Operation::new(k),
        };
        Some(op)
    }
}
