pub mod common_tests;
pub mod data_structures;
pub mod error;
pub mod workload;

// Re-export the set types for convenience
pub use data_structures::{
    ChainLock, ChainView, CoarseLock, CoarseLockedSet, LockedSet, OrderedSet, ReadWriteLock,
    ReadWriteLockedSet, SortedChain,
};
pub use error::{LockSetError, Operation};

/*

Benchmark:

cargo bench --package lockset-core --bench locked_set_benchmark

cargo llvm-cov --html

*/
