//! Lock strategies guarding a [`SortedChain`].
//!
//! A strategy owns the chain and decides which side of which lock each kind
//! of access takes:
//!
//! ```text
//!                     read()            write()
//!   CoarseLock        Mutex::lock       Mutex::lock
//!   ReadWriteLock     RwLock::read      RwLock::write
//! ```
//!
//! Guards release the lock on drop, so every exit path of an operation
//! releases exactly what it acquired.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::data_structures::SortedChain;

/// Strategy for guarding a [`SortedChain`] shared between threads.
///
/// `read` grants shared access for membership tests and snapshots; `write`
/// grants exclusive access for mutation. Implementations may back both with
/// the same exclusive lock.
///
pub trait ChainLock: Send + Sync {
    /// Guard for read-only access. Releases the lock when dropped.
    type ReadGuard<'a>: Deref<Target = SortedChain>
    where
        Self: 'a;

    /// Guard for mutating access. Releases the lock when dropped.
    type WriteGuard<'a>: DerefMut<Target = SortedChain>
    where
        Self: 'a;

    /// Short name used in log fields.
    const NAME: &'static str;

    /// Take ownership of `chain`.
    fn new(chain: SortedChain) -> Self;

    fn read(&self) -> Self::ReadGuard<'_>;

    fn write(&self) -> Self::WriteGuard<'_>;

    /// Acquire the read side without blocking.
    fn try_read(&self) -> Option<Self::ReadGuard<'_>>;

    /// Acquire the read side, giving up after `timeout`.
    fn try_read_for(&self, timeout: Duration) -> Option<Self::ReadGuard<'_>>;

    /// Acquire the write side, giving up after `timeout`.
    fn try_write_for(&self, timeout: Duration) -> Option<Self::WriteGuard<'_>>;
}

/// One exclusive lock for every operation, reads included.
pub struct CoarseLock {
    chain: Mutex<SortedChain>,
}

impl ChainLock for CoarseLock {
    type ReadGuard<'a> = MutexGuard<'a, SortedChain>;
    type WriteGuard<'a> = MutexGuard<'a, SortedChain>;

    const NAME: &'static str = "coarse";

    fn new(chain: SortedChain) -> Self {
        CoarseLock {
            chain: Mutex::new(chain),
        }
    }

    #[inline]
    fn read(&self) -> Self::ReadGuard<'_> {
        self.chain.lock()
    }

    #[inline]
    fn write(&self) -> Self::WriteGuard<'_> {
        self.chain.lock()
    }

    fn try_read(&self) -> Option<Self::ReadGuard<'_>> {
        self.chain.try_lock()
    }

    fn try_read_for(&self, timeout: Duration) -> Option<Self::ReadGuard<'_>> {
        self.chain.try_lock_for(timeout)
    }

    fn try_write_for(&self, timeout: Duration) -> Option<Self::WriteGuard<'_>> {
        self.chain.try_lock_for(timeout)
    }
}

/// Reader/writer lock: concurrent readers, exclusive writers.
///
/// `parking_lot`'s lock is fair towards writers: once a writer is queued,
/// new readers wait behind it. Readers already holding the lock never block
/// each other.
///
pub struct ReadWriteLock {
    chain: RwLock<SortedChain>,
}

impl ChainLock for ReadWriteLock {
    type ReadGuard<'a> = RwLockReadGuard<'a, SortedChain>;
    type WriteGuard<'a> = RwLockWriteGuard<'a, SortedChain>;

    const NAME: &'static str = "read_write";

    fn new(chain: SortedChain) -> Self {
        ReadWriteLock {
            chain: RwLock::new(chain),
        }
    }

    #[inline]
    fn read(&self) -> Self::ReadGuard<'_> {
        self.chain.read()
    }

    #[inline]
    fn write(&self) -> Self::WriteGuard<'_> {
        self.chain.write()
    }

    fn try_read(&self) -> Option<Self::ReadGuard<'_>> {
        self.chain.try_read()
    }

    fn try_read_for(&self, timeout: Duration) -> Option<Self::ReadGuard<'_>> {
        self.chain.try_read_for(timeout)
    }

    fn try_write_for(&self, timeout: Duration) -> Option<Self::WriteGuard<'_>> {
        self.chain.try_write_for(timeout)
    }
}
