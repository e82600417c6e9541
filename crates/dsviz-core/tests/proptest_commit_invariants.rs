//! Property-based invariant tests for commits and highlight frames.
//!
//! ## Invariants
//!
//! 1. Insert grows by one, places the value at the index, shifts the rest
//!    with identities intact.
//! 2. Remove shrinks by one and the removed identity is gone.
//! 3. Peek never changes the collection.
//! 4. Insert followed by remove at the same index restores the sequence.
//! 5. Highlight frames never reference indices outside the collection.

use dsviz_core::commit::{apply, mint_pending};
use dsviz_core::{Collection, Operation, StepRole, Structure, highlights_for};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_values() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1000i64..1000, 0..24)
}

fn arb_role() -> impl Strategy<Value = StepRole> {
    prop::sample::select(vec![
        StepRole::Create,
        StepRole::Move,
        StepRole::Traverse,
        StepRole::SeekTail,
        StepRole::Shift,
        StepRole::Splice,
        StepRole::Access,
        StepRole::Excise,
        StepRole::Inspect,
        StepRole::All,
        StepRole::Done,
    ])
}

fn snapshot(c: &Collection) -> Vec<(u64, i64)> {
    c.iter().map(|e| (e.id.get(), e.value)).collect()
}

// ── 1. Insert ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn insert_shifts_tail_right(values in arb_values(), value in any::<i64>(), seed in any::<usize>()) {
        let mut c = Collection::from_values(values);
        let index = seed % (c.len() + 1);
        let before = c.as_slice().to_vec();
        let op = Operation::insert(value, index).resolve(Structure::LinkedList, &c).unwrap();
        let pending = mint_pending(&mut c, &op, None);
        apply(&mut c, &op, pending);

        prop_assert_eq!(c.len(), before.len() + 1);
        prop_assert_eq!(c.get(index).map(|e| e.value), Some(value));
        for (i, old) in before.iter().enumerate() {
            let expected = if i >= index { i + 1 } else { i };
            prop_assert_eq!(c.get(expected), Some(old));
        }
    }
}

// ── 2. Remove ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn remove_drops_identity(values in prop::collection::vec(any::<i64>(), 1..24), seed in any::<usize>()) {
        let mut c = Collection::from_values(values);
        let index = seed % c.len();
        let victim = c.get(index).unwrap().id;
        let len = c.len();
        let op = Operation::remove(index).resolve(Structure::Array, &c).unwrap();
        apply(&mut c, &op, None);

        prop_assert_eq!(c.len(), len - 1);
        prop_assert!(c.index_of(victim).is_none());
    }
}

// ── 3. Peek ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn peek_is_inert(values in prop::collection::vec(any::<i64>(), 1..24)) {
        for structure in [Structure::Stack, Structure::Queue] {
            let mut c = Collection::from_values(values.clone());
            let before = snapshot(&c);
            let op = Operation::peek().resolve(structure, &c).unwrap();
            apply(&mut c, &op, None);
            prop_assert_eq!(snapshot(&c), before);
        }
    }
}

// ── 4. Insert/remove round trip ───────────────────────────────────────────

proptest! {
    #[test]
    fn insert_then_remove_restores(values in arb_values(), value in any::<i64>(), seed in any::<usize>()) {
        let mut c = Collection::from_values(values);
        let index = seed % (c.len() + 1);
        let before = snapshot(&c);

        let insert = Operation::insert(value, index).resolve(Structure::Array, &c).unwrap();
        let commit = apply(&mut c, &insert, None);
        let fresh = commit.inserted.unwrap();
        let remove = Operation::remove(index).resolve(Structure::Array, &c).unwrap();
        apply(&mut c, &remove, None);

        prop_assert_eq!(snapshot(&c), before);
        prop_assert!(c.index_of(fresh).is_none());
        prop_assert!(c.identities_issued() > fresh.get());
    }
}

// ── 5. Highlight bounds ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn highlights_stay_in_bounds(role in arb_role(), len in 0usize..32, target in 0usize..40, pending in any::<bool>()) {
        let frame = highlights_for(role, target, len, pending);
        prop_assert!(frame.indices.iter().all(|&i| i < len));
        if let Some(cursor) = frame.traversal_index {
            prop_assert!(cursor < len);
        }
    }

    #[test]
    fn traversal_is_a_prefix(len in 0usize..32, target in 0usize..32) {
        let target = target.min(len);
        let frame = highlights_for(StepRole::Traverse, target, len, true);
        let expected: Vec<usize> = (0..target).collect();
        prop_assert_eq!(frame.indices.into_iter().collect::<Vec<_>>(), expected);
    }
}
