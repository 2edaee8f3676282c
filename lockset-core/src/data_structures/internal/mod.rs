//! Internal implementation details.
//!
//! The chain itself is public so read views can hand it out; its mutating
//! methods stay crate-private behind the lock strategies.

pub mod sorted_chain;

pub use sorted_chain::{HEAD_KEY, Keys, SortedChain, TAIL_KEY, is_reserved};
