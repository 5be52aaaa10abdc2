//! cutforge - Parallel approximate maximum k-cut in Rust
//!
//! Partition the nodes of a graph into `k` communities so that the weight of
//! the relationships crossing community boundaries is as large (or as small)
//! as possible, optionally with a minimum size per community.
//!
//! # Example
//!
//! ```rust
//! use cutforge::prelude::*;
//!
//! let graph = CsrGraph::builder(4)
//!     .undirected()
//!     .edges([(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])
//!     .build()
//!     .unwrap();
//! let config = KCutConfig::new().with_k(2).with_iterations(10).with_random_seed(1);
//!
//! let result = cutforge::solve(&graph, &config).unwrap();
//! assert_eq!(result.cut_cost, 4.0);
//! ```

use std::sync::atomic::AtomicBool;

use tokio::sync::mpsc::UnboundedSender;

pub use cutforge_config::{ConfigError, KCutConfig, TerminationConfig};
pub use cutforge_core::{
    CsrGraph, CsrGraphBuilder, CutForgeError, Graph, ObjectiveKind, RelationshipCursor, Result,
};
pub use cutforge_solver::{
    ApproxMaxKCut, CountingProgressListener, CutResult, ExternalTermination, ImprovedSolution,
    LoggingProgressListener, ProgressListener, SolveStatistics, Task, Termination,
};

#[cfg(feature = "console")]
pub mod console;

/// Validates `config` against `graph` and runs the solver.
///
/// # Errors
///
/// Returns [`CutForgeError::Config`] if the configuration is invalid for the
/// graph, or [`CutForgeError::ThreadPool`] if the workers cannot start.
pub fn solve<G: Graph>(graph: &G, config: &KCutConfig) -> Result<CutResult> {
    config.validate_for_node_count(graph.node_count())?;
    ApproxMaxKCut::new(graph, config.clone()).compute()
}

/// Solves with caller-driven cancellation and solution streaming.
///
/// Every new best solution is sent through `sender` as it is found. Setting
/// `terminate` stops the run after the current local search round; the best
/// solution so far is returned.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_with_channel<G: Graph>(
    graph: &G,
    config: &KCutConfig,
    terminate: Option<&AtomicBool>,
    sender: UnboundedSender<ImprovedSolution>,
) -> Result<CutResult> {
    config.validate_for_node_count(graph.node_count())?;
    let solver = ApproxMaxKCut::new(graph, config.clone()).with_channel(sender);
    match terminate {
        Some(flag) => solver
            .with_termination(ExternalTermination::new(flag))
            .compute(),
        None => solver.compute(),
    }
}

pub mod prelude {
    pub use super::{solve, solve_with_channel};
    pub use super::{ApproxMaxKCut, CutResult, ImprovedSolution, SolveStatistics};
    pub use super::{CsrGraph, Graph, KCutConfig, ObjectiveKind};
}
