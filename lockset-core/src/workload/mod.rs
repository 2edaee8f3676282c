//! Seeded mixed workloads for exercising and measuring an [`OrderedSet`].
//!
//! A run prepopulates the set, then lets `threads` scoped threads issue
//! random `contains` / `add` / `remove` calls and counts how many of each
//! succeeded. Because every successful `add` grows the set by one and every
//! successful `remove` shrinks it by one, a linearizable set always ends with
//! `initial_len + adds.succeeded - removes.succeeded` keys.

mod config;

use std::ops::AddAssign;
use std::panic;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::data_structures::OrderedSet;
use crate::error::{LockSetError, Operation};

pub use config::WorkloadConfig;

/// Attempted and successful calls of one operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpStats {
    pub attempted: usize,
    pub succeeded: usize,
}

impl OpStats {
    fn record(&mut self, success: bool) {
        self.attempted += 1;
        self.succeeded += usize::from(success);
    }
}

impl AddAssign for OpStats {
    fn add_assign(&mut self, other: Self) {
        self.attempted += other.attempted;
        self.succeeded += other.succeeded;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ThreadStats {
    contains: OpStats,
    adds: OpStats,
    removes: OpStats,
}

/// Outcome of [`run_workload`].
#[derive(Debug, Clone)]
pub struct WorkloadReport {
    /// Set size after prepopulation, before the threads started.
    pub initial_len: usize,
    pub contains: OpStats,
    pub adds: OpStats,
    pub removes: OpStats,
    pub elapsed: Duration,
}

impl WorkloadReport {
    pub fn stats(&self, op: Operation) -> OpStats {
        match op {
            Operation::Add => self.adds,
            Operation::Remove => self.removes,
            Operation::Contains => self.contains,
        }
    }

    pub fn total_ops(&self) -> usize {
        self.contains.attempted + self.adds.attempted + self.removes.attempted
    }

    /// Operations per second over the whole run.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total_ops() as f64 / secs
    }

    /// Size the set must have after the run if every operation took effect
    /// atomically. `None` means more removes succeeded than keys ever
    /// existed, which no linearizable history allows.
    pub fn expected_len(&self) -> Option<usize> {
        (self.initial_len + self.adds.succeeded).checked_sub(self.removes.succeeded)
    }
}

/// Prepopulate `set` and run the workload described by `config` against it.
pub fn run_workload<S>(set: &S, config: &WorkloadConfig) -> Result<WorkloadReport, LockSetError>
where
    S: OrderedSet + Sync + ?Sized,
{
    config.validate()?;

    if config.prepopulate > 0 {
        let stride = config.key_range as usize / config.prepopulate;
        for i in 0..config.prepopulate {
            set.add((i * stride) as i32);
        }
    }
    let initial_len = set.len();

    let start = Instant::now();
    let totals = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.threads)
            .map(|t| scope.spawn(move || run_thread(set, config, t)))
            .collect();

        let mut totals = ThreadStats::default();
        for handle in handles {
            let stats = handle
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));
            totals.contains += stats.contains;
            totals.adds += stats.adds;
            totals.removes += stats.removes;
        }
        totals
    });
    let elapsed = start.elapsed();

    let report = WorkloadReport {
        initial_len,
        contains: totals.contains,
        adds: totals.adds,
        removes: totals.removes,
        elapsed,
    };

    info!(
        threads = config.threads,
        ops = report.total_ops(),
        adds_ok = report.adds.succeeded,
        removes_ok = report.removes.succeeded,
        elapsed_ms = elapsed.as_millis() as u64,
        "workload finished"
    );
    Ok(report)
}

fn run_thread<S>(set: &S, config: &WorkloadConfig, thread_index: usize) -> ThreadStats
where
    S: OrderedSet + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(thread_index as u64));
    let add_threshold = config.contains_percent + config.add_percent;
    let mut stats = ThreadStats::default();

    for _ in 0..config.ops_per_thread {
        let key = rng.gen_range(0..config.key_range);
        let roll: u8 = rng.gen_range(0..100);

        if roll < config.contains_percent {
            stats.contains.record(set.contains(key));
        } else if roll < add_threshold {
            stats.adds.record(set.add(key));
        } else {
            stats.removes.record(set.remove(key));
        }
    }
    stats
}
