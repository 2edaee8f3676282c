//! Generic test bodies shared by every `OrderedSet` implementation.
//!
//! The integration tests under `tests/` instantiate these per lock strategy.

pub mod linearizability;
pub mod ordered_set_core_tests;
