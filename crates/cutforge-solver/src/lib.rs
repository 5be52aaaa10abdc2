//! cutforge Solver Engine
//!
//! This crate provides the approximate maximum k-cut solver:
//! - GRASP orchestrator ([`ApproxMaxKCut`]) running independent trials
//! - Randomized construction honoring minimum community sizes
//! - Parallel round-based local search
//! - Variable neighborhood search around each trial's local optimum
//! - Termination conditions, progress listeners and run statistics

pub mod construction;
pub mod grasp;
pub mod localsearch;
pub mod progress;
pub mod scope;
pub mod statistics;
pub mod termination;
pub mod vns;
pub mod worker;

pub use construction::{ConstructionHeuristic, RandomPlacement};
pub use grasp::{ApproxMaxKCut, CutResult, ImprovedSolution, SolutionArena};
pub use localsearch::{LocalSearch, LocalSearchOutcome};
pub use progress::{
    CountingProgressListener, LoggingProgressListener, ProgressListener, ProgressTracker, Task,
};
pub use scope::SolverScope;
pub use statistics::{SolveStatistics, StatisticsCollector};
pub use termination::{
    ExternalTermination, FnTermination, NeverTerminate, OrTermination, Termination,
    TimeTermination,
};
pub use vns::{VariableNeighborhoodSearch, VnsOutcome};
pub use worker::WorkerPool;

#[cfg(test)]
pub(crate) mod test_utils;
