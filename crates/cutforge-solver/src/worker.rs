//! Fixed-size fork-join worker pool.

use std::fmt;

use cutforge_core::{CutForgeError, Partition, Result};
use rayon::prelude::*;

/// A dedicated thread pool shared by every parallel phase of one run.
///
/// Each call to [`for_each_partition`](Self::for_each_partition) returns only
/// after all partitions are processed, so consecutive calls form barriers.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    concurrency: usize,
}

impl WorkerPool {
    /// Starts `concurrency` worker threads (at least one).
    ///
    /// # Errors
    ///
    /// Returns [`CutForgeError::ThreadPool`] if the threads cannot be spawned.
    pub fn new(concurrency: usize) -> Result<Self> {
        let concurrency = concurrency.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .thread_name(|i| format!("cutforge-worker-{i}"))
            .build()
            .map_err(|e| CutForgeError::ThreadPool(e.to_string()))?;
        Ok(Self { pool, concurrency })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs `op` once per partition on the pool and waits for all of them.
    pub fn for_each_partition<F>(&self, partitions: &[Partition], op: F)
    where
        F: Fn(Partition) + Send + Sync,
    {
        self.pool
            .install(|| partitions.par_iter().for_each(|&partition| op(partition)));
    }

    /// Runs `op` inside the pool so nested rayon iterators use its threads.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_every_partition_runs_once() {
        let workers = WorkerPool::new(3).unwrap();
        let partitions = cutforge_core::range_partition(100, 3, 1);
        let visited = AtomicUsize::new(0);

        workers.for_each_partition(&partitions, |partition| {
            visited.fetch_add(partition.len, Ordering::Relaxed);
        });

        assert_eq!(visited.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let workers = WorkerPool::new(0).unwrap();
        assert_eq!(workers.concurrency(), 1);
        assert_eq!(workers.install(rayon::current_num_threads), 1);
    }
}
