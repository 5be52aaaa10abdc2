//! Construction heuristics producing the starting solution of each trial.

mod random;

use std::fmt::Debug;

use cutforge_core::{CandidateSolution, Cardinalities, Graph};

use crate::scope::SolverScope;

pub use random::RandomPlacement;

/// Fills a solution buffer with a fresh assignment.
///
/// Implementations must leave `cardinalities` exactly matching `solution`
/// and give every community `c` at least `min_community_sizes[c]` nodes
/// whenever the minimums fit into the graph. The number of communities is
/// `cardinalities.k()`.
pub trait ConstructionHeuristic: Send + Sync + Debug {
    fn construct<G: Graph>(
        &self,
        graph: &G,
        scope: &mut SolverScope<'_>,
        min_community_sizes: &[u64],
        solution: &CandidateSolution,
        cardinalities: &Cardinalities,
    );
}
