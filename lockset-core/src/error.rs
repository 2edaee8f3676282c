//! Error type shared by the timed operations, chain validation and the
//! workload driver.
//!
//! The plain `add` / `remove` / `contains` operations are total and never
//! produce one of these.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Set operation, used to label errors and workload statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    Contains,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::Contains => "contains",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockSetError {
    /// The key collides with a sentinel guard value.
    #[error("key {0} is reserved for a sentinel node")]
    ReservedKey(i32),

    /// A timed operation gave up waiting for its lock.
    #[error("{op} timed out after {waited:?} waiting for the lock")]
    LockTimeout { op: Operation, waited: Duration },

    /// The chain no longer satisfies its ordering or sentinel invariants.
    #[error("chain invariant violated: {0}")]
    BrokenInvariant(String),

    #[error("invalid workload configuration: {0}")]
    InvalidConfig(String),
}
