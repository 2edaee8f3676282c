//! History recording and a brute-force linearizability check.
//!
//! Threads run operations through a shared [`HistoryRecorder`], which stamps
//! each call with logical invocation/return times from one atomic clock. The
//! checker then searches for a sequential order that
//!
//! - respects real time: if `a` returned before `b` was invoked, `a` comes
//!   first, and
//! - reproduces every observed return value when replayed on a `BTreeSet`.
//!
//! The search is exponential in the worst case; keep histories small.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam::queue::SegQueue;

use crate::data_structures::OrderedSet;
use crate::error::Operation;

/// Largest history [`is_linearizable`] accepts.
pub const MAX_HISTORY: usize = 64;

/// One completed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub thread: usize,
    pub op: Operation,
    pub key: i32,
    pub result: bool,
    pub invoked: u64,
    pub returned: u64,
}

#[derive(Default)]
pub struct HistoryRecorder {
    clock: AtomicU64,
    events: SegQueue<Event>,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `op` on `set` and record it.
    pub fn record<S>(&self, set: &S, thread: usize, op: Operation, key: i32) -> bool
    where
        S: OrderedSet + ?Sized,
    {
        let invoked = self.clock.fetch_add(1, Ordering::SeqCst);
        let result = match op {
            Operation::Add => set.add(key),
            Operation::Remove => set.remove(key),
            Operation::Contains => set.contains(key),
        };
        let returned = self.clock.fetch_add(1, Ordering::SeqCst);

        self.events.push(Event {
            thread,
            op,
            key,
            result,
            invoked,
            returned,
        });
        result
    }

    /// Drain the recorded events, ordered by invocation time.
    pub fn into_history(self) -> Vec<Event> {
        let mut history = Vec::with_capacity(self.events.len());
        while let Some(event) = self.events.pop() {
            history.push(event);
        }
        history.sort_by_key(|event| event.invoked);
        history
    }
}

/// Returns `true` if `history`, starting from a set holding `initial`, has a
/// valid sequential explanation.
///
/// # Panics
///
/// If `history` holds more than [`MAX_HISTORY`] events.
pub fn is_linearizable(initial: &[i32], history: &[Event]) -> bool {
    assert!(
        history.len() <= MAX_HISTORY,
        "history of {} events is too long to check",
        history.len()
    );

    let full = if history.len() == MAX_HISTORY {
        u64::MAX
    } else {
        (1u64 << history.len()) - 1
    };
    let mut model: BTreeSet<i32> = initial.iter().copied().collect();
    let mut seen = HashSet::new();
    search(history, 0, full, &mut model, &mut seen)
}

fn search(
    history: &[Event],
    done: u64,
    full: u64,
    model: &mut BTreeSet<i32>,
    seen: &mut HashSet<(u64, Vec<i32>)>,
) -> bool {
    if done == full {
        return true;
    }
    if !seen.insert((done, model.iter().copied().collect())) {
        return false;
    }

    let pending = || (0..history.len()).filter(move |i| done & (1u64 << i) == 0);

    // An operation can go next only if no pending operation returned before
    // it was invoked.
    let earliest_return = pending()
        .map(|i| history[i].returned)
        .min()
        .unwrap_or(u64::MAX);

    for i in pending() {
        let event = &history[i];
        if event.invoked > earliest_return {
            continue;
        }

        let result = apply(model, event.op, event.key);
        if result == event.result && search(history, done | (1u64 << i), full, model, seen) {
            return true;
        }
        undo(model, event.op, event.key, result);
    }
    false
}

fn apply(model: &mut BTreeSet<i32>, op: Operation, key: i32) -> bool {
    match op {
        Operation::Add => model.insert(key),
        Operation::Remove => model.remove(&key),
        Operation::Contains => model.contains(&key),
    }
}

fn undo(model: &mut BTreeSet<i32>, op: Operation, key: i32, result: bool) {
    match (op, result) {
        (Operation::Add, true) => {
            model.remove(&key);
        }
        (Operation::Remove, true) => {
            model.insert(key);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(op: Operation, key: i32, result: bool, invoked: u64, returned: u64) -> Event {
        Event {
            thread: 0,
            op,
            key,
            result,
            invoked,
            returned,
        }
    }

    #[test]
    fn sequential_history_is_accepted() {
        let history = vec![
            event(Operation::Add, 1, true, 0, 1),
            event(Operation::Contains, 1, true, 2, 3),
            event(Operation::Remove, 1, true, 4, 5),
        ];
        assert!(is_linearizable(&[], &history));
    }

    #[test]
    fn stale_read_after_completed_add_is_rejected() {
        let history = vec![
            event(Operation::Add, 1, true, 0, 1),
            event(Operation::Contains, 1, false, 2, 3),
        ];
        assert!(!is_linearizable(&[], &history));
    }

    #[test]
    fn overlapping_calls_may_be_reordered() {
        // contains overlaps the add, so it may linearize before it.
        let history = vec![
            event(Operation::Add, 1, true, 0, 3),
            event(Operation::Contains, 1, false, 1, 2),
        ];
        assert!(is_linearizable(&[], &history));
    }

    #[test]
    fn two_successful_adds_of_same_key_are_rejected() {
        let history = vec![
            event(Operation::Add, 4, true, 0, 3),
            event(Operation::Add, 4, true, 1, 2),
        ];
        assert!(!is_linearizable(&[], &history));
    }

    #[test]
    fn initial_contents_are_respected() {
        let history = vec![event(Operation::Remove, 9, true, 0, 1)];
        assert!(is_linearizable(&[9], &history));
        assert!(!is_linearizable(&[], &history));
    }
}
