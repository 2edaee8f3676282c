/// A set of distinct `i32` keys kept in ascending order and shared between
/// threads.
///
/// # Key domain
///
/// `i32::MIN` and `i32::MAX` are held by the sentinel nodes bounding the
/// underlying chain and are never legal keys. All three operations return
/// `false` for them without touching the set.
///
/// # Consistency
///
/// Every method runs under the implementation's lock, so each call appears
/// to take effect at a single point between its invocation and its return.
///
/// ```text
/// OrderedSet (this trait)
///    ↓ implemented by
/// LockedSet<L: ChainLock>
///    ├── CoarseLockedSet     = LockedSet<CoarseLock>
///    └── ReadWriteLockedSet  = LockedSet<ReadWriteLock>
/// ```
///
/// # Example
///
/// ```rust
/// use lockset_core::{OrderedSet, ReadWriteLockedSet};
///
/// let set = ReadWriteLockedSet::new();
/// assert!(set.add(5));
/// assert!(set.add(3));
/// assert!(!set.add(5));
/// assert!(set.contains(3));
/// assert!(set.remove(5));
/// assert!(!set.contains(5));
/// assert_eq!(set.to_vec(), vec![3]);
/// ```
///
pub trait OrderedSet {
    /// Insert a key.
    ///
    /// Returns `true` if the key was inserted, `false` if it already exists.
    ///
    fn add(&self, key: i32) -> bool;

    /// Remove a key.
    ///
    /// Returns `true` if the key was removed, `false` if not found.
    ///
    fn remove(&self, key: i32) -> bool;

    /// Check if a key exists in the set.
    ///
    fn contains(&self, key: i32) -> bool;

    /// Returns the number of keys in the set.
    ///
    fn len(&self) -> usize;

    /// Collects all keys, ascending, into a Vec.
    ///
    fn to_vec(&self) -> Vec<i32>;

    /// Check if the set is empty.
    ///
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
