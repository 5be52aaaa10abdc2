//! Solver-level scope.

use std::time::{Duration, Instant};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::progress::{ProgressTracker, Task};
use crate::statistics::StatisticsCollector;
use crate::termination::Termination;
use crate::worker::WorkerPool;

/// Run-wide context handed to every component.
///
/// Owns the worker pool, the single seeded generator, the progress tracker
/// and the statistics; borrows the caller's termination condition. Parallel
/// workers never touch the generator directly, they receive sub-streams from
/// [`split_rng`](Self::split_rng).
pub struct SolverScope<'a> {
    workers: WorkerPool,
    rng: ChaCha8Rng,
    seed: u64,
    termination: &'a dyn Termination,
    progress: ProgressTracker,
    statistics: StatisticsCollector,
    start_time: Instant,
}

impl<'a> SolverScope<'a> {
    pub fn new(workers: WorkerPool, seed: u64, termination: &'a dyn Termination) -> Self {
        Self {
            workers,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            termination,
            progress: ProgressTracker::new(),
            statistics: StatisticsCollector::new(),
            start_time: Instant::now(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressTracker) -> Self {
        self.progress = progress;
        self
    }

    pub fn workers(&self) -> &WorkerPool {
        &self.workers
    }

    /// The seed the run's generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Derives an independent generator from the next value of the run's generator.
    pub fn split_rng(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.rng.next_u64())
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_terminated()
    }

    pub fn is_running(&self) -> bool {
        !self.is_terminated()
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn begin(&self, task: Task) {
        self.progress.begin(task);
    }

    pub fn end(&self, task: Task) {
        self.progress.end(task);
    }

    pub fn statistics(&self) -> &StatisticsCollector {
        &self.statistics
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl std::fmt::Debug for SolverScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("workers", &self.workers)
            .field("seed", &self.seed)
            .field("termination", &self.termination)
            .field("progress", &self.progress)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::NeverTerminate;
    use rand::Rng;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::termination::ExternalTermination;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SolverScope::new(WorkerPool::new(1).unwrap(), 42, &NeverTerminate);
        let mut b = SolverScope::new(WorkerPool::new(1).unwrap(), 42, &NeverTerminate);

        assert_eq!(a.seed(), 42);
        assert_eq!(a.rng().random::<u64>(), b.rng().random::<u64>());

        let mut split_a = a.split_rng();
        let mut split_b = b.split_rng();
        assert_eq!(split_a.random::<u64>(), split_b.random::<u64>());
    }

    #[test]
    fn test_running_follows_termination() {
        let flag = AtomicBool::new(false);
        let termination = ExternalTermination::new(&flag);
        let scope = SolverScope::new(WorkerPool::new(1).unwrap(), 0, &termination);

        assert!(scope.is_running());
        flag.store(true, Ordering::SeqCst);
        assert!(!scope.is_running());
        assert!(scope.is_terminated());
    }
}
