use std::fmt;
use std::ops::Deref;
use std::time::Duration;

use tracing::{debug, warn};

use super::chain_lock::{ChainLock, CoarseLock, ReadWriteLock};
use crate::data_structures::internal::is_reserved;
use crate::data_structures::{OrderedSet, SortedChain};
use crate::error::{LockSetError, Operation};

/// Every operation, `contains` included, serializes on one exclusive lock.
pub type CoarseLockedSet = LockedSet<CoarseLock>;

/// `add`/`remove` take the write side, `contains` the read side.
pub type ReadWriteLockedSet = LockedSet<ReadWriteLock>;

///
/// Sorted chain of `i32` keys guarded as a whole by the lock strategy `L`.
///
/// Each operation acquires exactly one lock, traverses the chain from the
/// head sentinel, and releases the lock when its guard drops. No lock is
/// ever held across a call into user code, so operations cannot deadlock
/// against each other.
///
// Acquisition per operation:
//
//   operation        CoarseLock        ReadWriteLock
//   ─────────        ──────────        ─────────────
//   add              exclusive         write
//   remove           exclusive         write
//   contains         exclusive         read
//   len / to_vec     exclusive         read
//   view             exclusive         read
//
pub struct LockedSet<L: ChainLock> {
    lock: L,
}

impl<L: ChainLock> LockedSet<L> {
    /// Create an empty set: a chain holding only its two sentinels.
    pub fn new() -> Self {
        debug!(lock = L::NAME, "creating locked set");
        LockedSet {
            lock: L::new(SortedChain::new()),
        }
    }

    /// Hold the read side of the lock and look at the chain directly.
    ///
    /// For [`CoarseLockedSet`] this is the exclusive lock, so every other
    /// operation waits until the view is dropped. For
    /// [`ReadWriteLockedSet`] other readers proceed while mutations wait.
    ///
    pub fn view(&self) -> ChainView<'_, L> {
        ChainView {
            guard: self.lock.read(),
        }
    }

    /// Like [`view`](Self::view), but returns `None` instead of blocking.
    pub fn try_view(&self) -> Option<ChainView<'_, L>> {
        self.lock.try_read().map(|guard| ChainView { guard })
    }

    /// Insert every key from `keys` under a single write acquisition.
    ///
    /// Returns the number of keys newly inserted. Reserved keys and
    /// duplicates are skipped. The iterator is drained before the lock is
    /// taken.
    ///
    pub fn add_all<I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = i32>,
    {
        let keys: Vec<i32> = keys.into_iter().filter(|&key| !is_reserved(key)).collect();

        let mut chain = self.lock.write();
        keys.into_iter().filter(|&key| chain.add(key)).count()
    }

    /// [`add`](OrderedSet::add) that gives up after waiting `timeout` for
    /// the lock.
    pub fn try_add_for(&self, key: i32, timeout: Duration) -> Result<bool, LockSetError> {
        check_key(key)?;
        let mut chain = self
            .lock
            .try_write_for(timeout)
            .ok_or_else(|| timed_out::<L>(Operation::Add, timeout))?;
        Ok(chain.add(key))
    }

    /// [`remove`](OrderedSet::remove) that gives up after waiting `timeout`
    /// for the lock.
    pub fn try_remove_for(&self, key: i32, timeout: Duration) -> Result<bool, LockSetError> {
        check_key(key)?;
        let mut chain = self
            .lock
            .try_write_for(timeout)
            .ok_or_else(|| timed_out::<L>(Operation::Remove, timeout))?;
        Ok(chain.remove(key))
    }

    /// [`contains`](OrderedSet::contains) that gives up after waiting
    /// `timeout` for the lock.
    pub fn try_contains_for(&self, key: i32, timeout: Duration) -> Result<bool, LockSetError> {
        check_key(key)?;
        let chain = self
            .lock
            .try_read_for(timeout)
            .ok_or_else(|| timed_out::<L>(Operation::Contains, timeout))?;
        Ok(chain.contains(key))
    }
}

fn check_key(key: i32) -> Result<(), LockSetError> {
    if is_reserved(key) {
        return Err(LockSetError::ReservedKey(key));
    }
    Ok(())
}

fn timed_out<L: ChainLock>(op: Operation, waited: Duration) -> LockSetError {
    warn!(lock = L::NAME, %op, ?waited, "lock acquisition timed out");
    LockSetError::LockTimeout { op, waited }
}

impl<L: ChainLock> OrderedSet for LockedSet<L> {
    fn add(&self, key: i32) -> bool {
        if is_reserved(key) {
            debug!(lock = L::NAME, key, "add rejected reserved key");
            return false;
        }
        self.lock.write().add(key)
    }

    fn remove(&self, key: i32) -> bool {
        if is_reserved(key) {
            debug!(lock = L::NAME, key, "remove rejected reserved key");
            return false;
        }
        self.lock.write().remove(key)
    }

    fn contains(&self, key: i32) -> bool {
        self.lock.read().contains(key)
    }

    fn len(&self) -> usize {
        self.lock.read().len()
    }

    fn to_vec(&self) -> Vec<i32> {
        self.lock.read().to_vec()
    }

    fn is_empty(&self) -> bool {
        self.lock.read().is_empty()
    }
}

impl<L: ChainLock> Default for LockedSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ChainLock> FromIterator<i32> for LockedSet<L> {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let set = Self::new();
        set.add_all(iter);
        set
    }
}

impl<L: ChainLock> fmt::Debug for LockedSet<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("LockedSet");
        out.field("lock", &L::NAME);
        match self.lock.try_read() {
            Some(chain) => out.field("keys", &*chain),
            None => out.field("keys", &format_args!("<locked>")),
        };
        out.finish()
    }
}

/// Read-only access to a set's chain while holding the read side of its
/// lock. The lock is released when the view is dropped.
pub struct ChainView<'a, L: ChainLock + 'a> {
    guard: L::ReadGuard<'a>,
}

impl<L: ChainLock> Deref for ChainView<'_, L> {
    type Target = SortedChain;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<L: ChainLock> fmt::Debug for ChainView<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
