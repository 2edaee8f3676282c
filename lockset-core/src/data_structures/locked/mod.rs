//! Coarse-grained lock-based sets.
//!
//! Sets are parameterized by a lock strategy `L: ChainLock` that decides
//! which lock side each operation takes:
//!
//! - `CoarseLock`: one exclusive lock for everything
//! - `ReadWriteLock`: shared reads, exclusive writes

pub mod chain_lock;
pub mod locked_set;

pub use chain_lock::{ChainLock, CoarseLock, ReadWriteLock};
pub use locked_set::{ChainView, CoarseLockedSet, LockedSet, ReadWriteLockedSet};
