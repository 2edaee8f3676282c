use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data_structures::{HEAD_KEY, OrderedSet, TAIL_KEY};

/// Test basic add, contains, and duplicate rejection
pub fn test_basic_operations<S>(set: &S)
where
    S: OrderedSet,
{
    // Test add
    assert!(set.add(5));
    assert!(set.add(10));
    assert!(set.add(3));
    assert!(set.add(7));
    assert!(set.add(1));

    // Test duplicate rejection
    assert!(!set.add(5));
    assert!(!set.add(10));

    // Test contains
    assert!(set.contains(1));
    assert!(set.contains(3));
    assert!(set.contains(5));
    assert!(set.contains(7));
    assert!(set.contains(10));
    assert!(!set.contains(2));
    assert!(!set.contains(99));

    // Test remove
    assert!(set.remove(3));
    assert!(!set.contains(3));
    assert!(!set.remove(3)); // Already removed

    // Verify others still present
    assert_eq!(set.to_vec(), vec![1, 5, 7, 10]);
}

/// The walkthrough from an empty set down to a single key
pub fn test_documented_scenario<S>()
where
    S: OrderedSet + Default,
{
    let set = S::default();
    assert!(set.add(5));
    assert!(set.add(3));
    assert!(!set.add(5));
    assert!(set.contains(3));
    assert!(set.remove(5));
    assert!(!set.contains(5));
    assert_eq!(set.to_vec(), vec![3]);
}

/// Adding a key twice yields (true, false) and leaves the set as after the
/// first add
pub fn test_add_idempotence<S>()
where
    S: OrderedSet + Default,
{
    let set = S::default();
    for key in [40, 10, 30] {
        set.add(key);
    }

    assert!(set.add(20));
    let after_first = set.to_vec();
    assert!(!set.add(20));
    assert_eq!(set.to_vec(), after_first);
    assert_eq!(after_first, vec![10, 20, 30, 40]);
}

/// add/remove undo each other in both directions
pub fn test_add_remove_inverse<S>()
where
    S: OrderedSet + Default,
{
    let set = S::default();
    for key in [-7, 0, 12, 90] {
        set.add(key);
    }
    let original = set.to_vec();

    // Absent key: add then remove
    assert!(set.add(50));
    assert!(set.remove(50));
    assert_eq!(set.to_vec(), original);

    // Present key: remove then add
    assert!(set.remove(12));
    assert!(set.add(12));
    assert_eq!(set.to_vec(), original);
}

/// contains follows the most recent successful add/remove
pub fn test_contains_reflects_last_mutation<S>()
where
    S: OrderedSet + Default,
{
    let set = S::default();
    for round in 0..5 {
        assert!(!set.contains(8), "round {round}: present before add");
        assert!(set.add(8));
        assert!(set.contains(8), "round {round}: missing after add");
        assert!(!set.add(8));
        assert!(set.contains(8), "round {round}: failed add changed state");
        assert!(set.remove(8));
        assert!(!set.contains(8), "round {round}: present after remove");
        assert!(!set.remove(8));
        assert!(!set.contains(8), "round {round}: failed remove changed state");
    }
}

/// Keys next to the sentinel values are ordinary; the sentinel values
/// themselves are never accepted
pub fn test_boundary_keys<S>()
where
    S: OrderedSet + Default,
{
    let set = S::default();
    assert!(set.add(TAIL_KEY - 1));
    assert!(set.add(HEAD_KEY + 1));
    assert!(set.add(0));
    assert_eq!(set.to_vec(), vec![HEAD_KEY + 1, 0, TAIL_KEY - 1]);

    assert!(!set.add(HEAD_KEY));
    assert!(!set.add(TAIL_KEY));
    assert!(!set.contains(HEAD_KEY));
    assert!(!set.contains(TAIL_KEY));
    assert!(!set.remove(HEAD_KEY));
    assert!(!set.remove(TAIL_KEY));
    assert_eq!(set.len(), 3);

    // The set still works after the rejected calls.
    assert!(set.remove(TAIL_KEY - 1));
    assert!(set.add(TAIL_KEY - 1));
    assert_eq!(set.to_vec(), vec![HEAD_KEY + 1, 0, TAIL_KEY - 1]);
}

/// Test is_empty and len
pub fn test_len_operations<S>()
where
    S: OrderedSet + Default,
{
    let set = S::default();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);

    for i in 0..10 {
        set.add(i);
    }
    assert!(!set.is_empty());
    assert_eq!(set.len(), 10);

    for i in 0..10 {
        set.remove(i);
    }
    assert!(set.is_empty());
}

/// Random single-threaded operations agree with a BTreeSet model
pub fn test_matches_model<S>(seed: u64)
where
    S: OrderedSet + Default,
{
    let set = S::default();
    let mut model = BTreeSet::new();
    let mut rng = StdRng::seed_from_u64(seed);

    for step in 0..5_000 {
        let key = rng.gen_range(-64..64);
        match rng.gen_range(0..3) {
            0 => assert_eq!(set.add(key), model.insert(key), "step {step}: add({key})"),
            1 => assert_eq!(
                set.remove(key),
                model.remove(&key),
                "step {step}: remove({key})"
            ),
            _ => assert_eq!(
                set.contains(key),
                model.contains(&key),
                "step {step}: contains({key})"
            ),
        }
    }

    assert_eq!(set.to_vec(), model.into_iter().collect::<Vec<_>>());
}

/// Test concurrent insertions from multiple threads
pub fn test_concurrent_operations<S>()
where
    S: OrderedSet + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 4;
    let items_per_thread = 100;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in 0..items_per_thread {
                    let key = thread_id * items_per_thread + i;
                    assert!(set.add(key), "Key {} inserted twice", key);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Verify all inserted
    for i in 0..(num_threads * items_per_thread) {
        assert!(set.contains(i), "Missing key: {}", i);
    }
    assert_eq!(set.len(), (num_threads * items_per_thread) as usize);
}

/// Test concurrent mixed operations (add, remove, contains)
pub fn test_concurrent_mixed_operations<S>()
where
    S: OrderedSet + Default + Send + Sync + 'static,
{
    let set = Arc::new(S::default());
    let num_threads = 6;
    let num_operations = 1000;

    // Pre-populate
    for i in 0..50 {
        set.add(i * 3);
    }

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for i in 0..num_operations {
                    let key = (thread_id * num_operations + i) % 500;

                    match i % 5 {
                        0 | 3 => {
                            set.add(key);
                        }
                        1 => {
                            set.remove(key);
                        }
                        _ => {
                            set.contains(key);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let keys = set.to_vec();
    for window in keys.windows(2) {
        assert!(window[0] < window[1], "Keys out of order: {:?}", window);
    }
    assert_eq!(keys.len(), set.len());
}
