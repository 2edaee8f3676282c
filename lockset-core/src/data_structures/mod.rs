//! Data structures for concurrent ordered sets.
//!
//! # Organization
//!
//! - [`locked`] - Lock strategies and the sets built on them
//! - [`internal`] - The sentinel-bounded sorted chain
//! - [`ordered_set`] - The operation contract every set implements

pub mod internal;
pub mod locked;
pub mod ordered_set;

pub use internal::{HEAD_KEY, Keys, SortedChain, TAIL_KEY};
pub use locked::{
    ChainLock, ChainView, CoarseLock, CoarseLockedSet, LockedSet, ReadWriteLock,
    ReadWriteLockedSet,
};
pub use ordered_set::OrderedSet;
