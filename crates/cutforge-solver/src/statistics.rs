//! Solver statistics collection and reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Complete statistics for a solver run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolveStatistics {
    /// GRASP trials whose search ran, including one cut short by termination.
    pub trials_completed: u64,
    /// Trials whose result replaced the best solution.
    pub best_improvements: u64,
    /// Local search invocations, including those made by VNS.
    pub local_search_calls: u64,
    /// Affinity / swap rounds across all local searches.
    pub local_search_rounds: u64,
    /// Node recolorings performed by local search.
    pub node_swaps: u64,
    pub vns_rounds: u64,
    /// VNS rounds whose neighbor was adopted.
    pub vns_improvements: u64,
    /// VNS runs that stopped because no node could be perturbed.
    pub vns_stuck: u64,
    /// Total time spent solving.
    pub total_duration: Duration,
}

impl SolveStatistics {
    /// Average number of rounds a local search needed to converge.
    pub fn avg_rounds_per_local_search(&self) -> f64 {
        if self.local_search_calls == 0 {
            0.0
        } else {
            self.local_search_rounds as f64 / self.local_search_calls as f64
        }
    }
}

/// Thread-safe collector for solver statistics.
///
/// Counters are updated from the driving thread between phases and read once
/// at the end via [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct StatisticsCollector {
    trials_completed: AtomicU64,
    best_improvements: AtomicU64,
    local_search_calls: AtomicU64,
    local_search_rounds: AtomicU64,
    node_swaps: AtomicU64,
    vns_rounds: AtomicU64,
    vns_improvements: AtomicU64,
    vns_stuck: AtomicU64,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_trial(&self) {
        self.trials_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_best_improvement(&self) {
        self.best_improvements.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one finished local search with its round and swap counts.
    pub fn record_local_search(&self, rounds: u64, swaps: u64) {
        self.local_search_calls.fetch_add(1, Ordering::Relaxed);
        self.local_search_rounds.fetch_add(rounds, Ordering::Relaxed);
        self.node_swaps.fetch_add(swaps, Ordering::Relaxed);
    }

    pub fn record_vns_round(&self, improved: bool) {
        self.vns_rounds.fetch_add(1, Ordering::Relaxed);
        if improved {
            self.vns_improvements.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_vns_stuck(&self) {
        self.vns_stuck.fetch_add(1, Ordering::Relaxed);
    }

    pub fn trials_completed(&self) -> u64 {
        self.trials_completed.load(Ordering::Relaxed)
    }

    /// Returns the collected counters together with the run duration.
    pub fn snapshot(&self, total_duration: Duration) -> SolveStatistics {
        SolveStatistics {
            trials_completed: self.trials_completed.load(Ordering::Relaxed),
            best_improvements: self.best_improvements.load(Ordering::Relaxed),
            local_search_calls: self.local_search_calls.load(Ordering::Relaxed),
            local_search_rounds: self.local_search_rounds.load(Ordering::Relaxed),
            node_swaps: self.node_swaps.load(Ordering::Relaxed),
            vns_rounds: self.vns_rounds.load(Ordering::Relaxed),
            vns_improvements: self.vns_improvements.load(Ordering::Relaxed),
            vns_stuck: self.vns_stuck.load(Ordering::Relaxed),
            total_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_snapshot() {
        let collector = StatisticsCollector::new();
        collector.record_trial();
        collector.record_trial();
        collector.record_best_improvement();
        collector.record_local_search(3, 10);
        collector.record_local_search(1, 0);
        collector.record_vns_round(true);
        collector.record_vns_round(false);
        collector.record_vns_stuck();

        let stats = collector.snapshot(Duration::from_millis(5));
        assert_eq!(stats.trials_completed, 2);
        assert_eq!(stats.best_improvements, 1);
        assert_eq!(stats.local_search_calls, 2);
        assert_eq!(stats.local_search_rounds, 4);
        assert_eq!(stats.node_swaps, 10);
        assert_eq!(stats.vns_rounds, 2);
        assert_eq!(stats.vns_improvements, 1);
        assert_eq!(stats.vns_stuck, 1);
        assert_eq!(stats.total_duration, Duration::from_millis(5));
        assert_eq!(stats.avg_rounds_per_local_search(), 2.0);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = SolveStatistics::default();
        assert_eq!(stats.avg_rounds_per_local_search(), 0.0);
    }
}
