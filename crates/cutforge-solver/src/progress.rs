//! Task-level progress reporting.
//!
//! The solver announces the start and end of each nested unit of work. The
//! hierarchy of a run is:
//!
//! ```text
//! Grasp
//! └── Trial { index }
//!     ├── Construction
//!     └── VariableNeighborhoodSearch        (only when VNS is enabled)
//!         └── VnsRound { order }
//!             └── LocalSearch
//!                 ├── ConvergenceLoop
//!                 │   ├── ComputeAffinities
//!                 │   └── SwapForLocalImprovements
//!                 └── ComputeCost
//! ```
//!
//! Listeners are purely observational and never influence the search.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use cutforge_solver::progress::{CountingProgressListener, ProgressTracker, Task};
//!
//! let counter = Arc::new(CountingProgressListener::new());
//! let mut tracker = ProgressTracker::new();
//! tracker.add_listener(counter.clone());
//!
//! tracker.begin(Task::Trial { index: 1 });
//! tracker.end(Task::Trial { index: 1 });
//!
//! assert_eq!(counter.trial_count(), 1);
//! ```

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::trace;

/// A unit of work reported to progress listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// The whole multi-trial run.
    Grasp,
    /// One GRASP trial, 1-based.
    Trial { index: usize },
    /// Randomized placement of all nodes.
    Construction,
    /// Neighborhood search around one trial's solution.
    VariableNeighborhoodSearch,
    /// One perturb + local search round of the given order.
    VnsRound { order: usize },
    /// One local search call, including its final cost computation.
    LocalSearch,
    /// The repeated affinity / swap rounds of a local search.
    ConvergenceLoop,
    ComputeAffinities,
    SwapForLocalImprovements,
    ComputeCost,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Grasp => write!(f, "Grasp"),
            Task::Trial { index } => write!(f, "Trial {index}"),
            Task::Construction => write!(f, "Construction"),
            Task::VariableNeighborhoodSearch => write!(f, "VariableNeighborhoodSearch"),
            Task::VnsRound { order } => write!(f, "VnsRound (order {order})"),
            Task::LocalSearch => write!(f, "LocalSearch"),
            Task::ConvergenceLoop => write!(f, "ConvergenceLoop"),
            Task::ComputeAffinities => write!(f, "ComputeAffinities"),
            Task::SwapForLocalImprovements => write!(f, "SwapForLocalImprovements"),
            Task::ComputeCost => write!(f, "ComputeCost"),
        }
    }
}

/// Listener for task lifecycle events.
pub trait ProgressListener: Send + Sync + Debug {
    /// Called when a task starts.
    fn on_task_started(&self, task: Task);

    /// Called when a task ends, including when it ends early on termination.
    fn on_task_ended(&self, task: Task);
}

/// Broadcasts task events to registered listeners.
///
/// All listener methods are called synchronously in registration order,
/// always from the thread driving the run.
#[derive(Clone, Default)]
pub struct ProgressTracker {
    listeners: Vec<Arc<dyn ProgressListener>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ProgressListener>) {
        self.listeners.push(listener);
    }

    pub fn begin(&self, task: Task) {
        for listener in &self.listeners {
            listener.on_task_started(task);
        }
    }

    pub fn end(&self, task: Task) {
        for listener in &self.listeners {
            listener.on_task_ended(task);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }
}

impl Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Emits a `tracing` event for every task transition.
#[derive(Debug, Clone, Default)]
pub struct LoggingProgressListener;

impl LoggingProgressListener {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressListener for LoggingProgressListener {
    fn on_task_started(&self, task: Task) {
        trace!(event = "task_start", task = %task);
    }

    fn on_task_ended(&self, task: Task) {
        trace!(event = "task_end", task = %task);
    }
}

/// Counts task occurrences.
///
/// Useful for testing and coarse statistics.
#[derive(Debug, Default)]
pub struct CountingProgressListener {
    started: AtomicU64,
    ended: AtomicU64,
    trials: AtomicU64,
    local_searches: AtomicU64,
    convergence_rounds: AtomicU64,
    vns_rounds: AtomicU64,
}

impl CountingProgressListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of started tasks.
    pub fn started_count(&self) -> u64 {
        self.started.load(Ordering::SeqCst)
    }

    /// Total number of ended tasks.
    pub fn ended_count(&self) -> u64 {
        self.ended.load(Ordering::SeqCst)
    }

    pub fn trial_count(&self) -> u64 {
        self.trials.load(Ordering::SeqCst)
    }

    pub fn local_search_count(&self) -> u64 {
        self.local_searches.load(Ordering::SeqCst)
    }

    /// Number of affinity computations, one per local search round.
    pub fn convergence_round_count(&self) -> u64 {
        self.convergence_rounds.load(Ordering::SeqCst)
    }

    pub fn vns_round_count(&self) -> u64 {
        self.vns_rounds.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        for counter in [
            &self.started,
            &self.ended,
            &self.trials,
            &self.local_searches,
            &self.convergence_rounds,
            &self.vns_rounds,
        ] {
            counter.store(0, Ordering::SeqCst);
        }
    }
}

impl ProgressListener for CountingProgressListener {
    fn on_task_started(&self, task: Task) {
        self.started.fetch_add(1, Ordering::SeqCst);
        let counter = match task {
            Task::Trial { .. } => &self.trials,
            Task::LocalSearch => &self.local_searches,
            Task::ComputeAffinities => &self.convergence_rounds,
            Task::VnsRound { .. } => &self.vns_rounds,
            _ => return,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_ended(&self, _task: Task) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
