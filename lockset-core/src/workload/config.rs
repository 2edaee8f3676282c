use crate::data_structures::TAIL_KEY;
use crate::error::LockSetError;

/// Shape of a mixed random workload run by [`run_workload`].
///
/// Keys are drawn uniformly from `0..key_range`. Each operation is a
/// `contains` with probability `contains_percent`, an `add` with
/// probability `add_percent`, and a `remove` otherwise.
///
/// [`run_workload`]: super::run_workload
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    pub threads: usize,
    pub ops_per_thread: usize,
    pub key_range: i32,
    pub contains_percent: u8,
    pub add_percent: u8,
    /// Distinct keys inserted before the threads start.
    pub prepopulate: usize,
    /// Thread `t` seeds its generator with `seed + t`.
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            threads: 4,
            ops_per_thread: 10_000,
            key_range: 1_024,
            contains_percent: 80,
            add_percent: 10,
            prepopulate: 512,
            seed: 0x5eed,
        }
    }
}

impl WorkloadConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_ops_per_thread(mut self, ops_per_thread: usize) -> Self {
        self.ops_per_thread = ops_per_thread;
        self
    }

    pub fn with_key_range(mut self, key_range: i32) -> Self {
        self.key_range = key_range;
        self
    }

    /// Set the operation mix. Whatever is left of 100% becomes `remove`.
    pub fn with_mix(mut self, contains_percent: u8, add_percent: u8) -> Self {
        self.contains_percent = contains_percent;
        self.add_percent = add_percent;
        self
    }

    pub fn with_prepopulate(mut self, prepopulate: usize) -> Self {
        self.prepopulate = prepopulate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn remove_percent(&self) -> u8 {
        100u8
            .saturating_sub(self.contains_percent)
            .saturating_sub(self.add_percent)
    }

    pub fn total_ops(&self) -> usize {
        self.threads * self.ops_per_thread
    }

    pub fn validate(&self) -> Result<(), LockSetError> {
        if self.threads == 0 {
            return Err(LockSetError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.key_range <= 0 || self.key_range == TAIL_KEY {
            return Err(LockSetError::InvalidConfig(format!(
                "key_range must lie in 1..{}, got {}",
                TAIL_KEY, self.key_range
            )));
        }
        let mix = u16::from(self.contains_percent) + u16::from(self.add_percent);
        if mix > 100 {
            return Err(LockSetError::InvalidConfig(format!(
                "contains_percent + add_percent is {mix}, above 100"
            )));
        }
        if self.prepopulate > self.key_range as usize {
            return Err(LockSetError::InvalidConfig(format!(
                "cannot prepopulate {} distinct keys from a range of {}",
                self.prepopulate, self.key_range
            )));
        }
        Ok(())
    }
}
