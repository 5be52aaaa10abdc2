//! Parallel round-based local search.
//!
//! Each round runs two fork-join phases over static degree partitions:
//!
//! 1. **Affinities**: for every node, the incident weight toward each of the
//!    `k` communities is accumulated into a `node_count * k` scratch table.
//! 2. **Swaps**: every node whose best community improves the objective
//!    moves there, provided its current community stays above its minimum
//!    size and no adjacent node moves in the same round.
//!
//! Rounds repeat until one makes no move or termination is requested. A
//! final phase then recomputes the cut weight from scratch.
//!
//! Directed graphs are searched over all incident relationships; a reverse
//! adjacency is built once for them.

mod incoming;
mod phases;

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

use cutforge_core::{
    degree_partition, AtomicCost, CandidateSolution, Cardinalities, Graph, Objective, Partition,
};
use tracing::trace;

use crate::progress::Task;
use crate::scope::SolverScope;

use incoming::IncomingRelationships;
use phases::{compute_affinities, compute_cost, reset_swap_status, swap_for_local_improvements};

/// Result of one [`LocalSearch::compute`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchOutcome {
    /// Affinity / swap rounds executed.
    pub rounds: u64,
    /// Node recolorings across all rounds.
    pub swaps: u64,
    /// False if termination cut the search short.
    pub converged: bool,
}

/// Reusable local search over one graph.
///
/// Holds the scratch buffers (affinity table and swap flags) and the
/// partitioning, so repeated calls allocate nothing.
pub struct LocalSearch<'g, G: Graph, O: Objective> {
    graph: &'g G,
    objective: O,
    k: usize,
    min_community_sizes: Vec<u64>,
    partitions: Vec<Partition>,
    affinities: Vec<f64>,
    swap_status: Vec<AtomicU8>,
    incoming: Option<IncomingRelationships>,
}

impl<'g, G: Graph, O: Objective> LocalSearch<'g, G, O> {
    /// Creates a local search for `k` communities.
    ///
    /// `min_community_sizes` must hold `k` entries.
    pub fn new(
        graph: &'g G,
        objective: O,
        k: usize,
        min_community_sizes: Vec<u64>,
        concurrency: usize,
        min_batch_size: usize,
    ) -> Self {
        let node_count = graph.node_count();
        Self {
            graph,
            objective,
            k,
            min_community_sizes,
            partitions: degree_partition(graph, concurrency, min_batch_size),
            affinities: vec![0.0; node_count * k],
            swap_status: (0..node_count).map(|_| AtomicU8::new(0)).collect(),
            incoming: (!graph.is_undirected()).then(|| IncomingRelationships::build(graph)),
        }
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Writes the cut weight of `solution` into `cost` without moving nodes.
    pub fn evaluate(
        &self,
        scope: &SolverScope<'_>,
        solution: &CandidateSolution,
        cost: &AtomicCost,
    ) {
        scope.begin(Task::ComputeCost);
        compute_cost(
            scope.workers(),
            self.graph,
            &self.partitions,
            self.graph.has_relationship_property(),
            solution,
            cost,
        );
        scope.end(Task::ComputeCost);
    }

    /// Improves `solution` in place until no single-node move helps.
    ///
    /// `cardinalities` must match `solution` on entry and matches it again on
    /// return. `cost` always receives the cut weight of the returned
    /// solution, even when termination stopped the rounds early.
    pub fn compute(
        &mut self,
        scope: &SolverScope<'_>,
        solution: &CandidateSolution,
        cost: &AtomicCost,
        cardinalities: &Cardinalities,
    ) -> LocalSearchOutcome {
        let workers = scope.workers();
        let weighted = self.graph.has_relationship_property();
        let changed = AtomicBool::new(true);
        let mut rounds = 0u64;
        let mut swaps = 0u64;

        scope.begin(Task::LocalSearch);
        scope.begin(Task::ConvergenceLoop);
        while changed.load(Ordering::Relaxed) && scope.is_running() {
            scope.begin(Task::ComputeAffinities);
            compute_affinities(
                workers,
                self.graph,
                self.incoming.as_ref(),
                &self.partitions,
                self.k,
                weighted,
                solution,
                &mut self.affinities,
            );
            scope.end(Task::ComputeAffinities);

            changed.store(false, Ordering::Relaxed);
            scope.begin(Task::SwapForLocalImprovements);
            reset_swap_status(workers, &self.partitions, &self.swap_status);
            let round_swaps = AtomicU64::new(0);
            workers.for_each_partition(&self.partitions, |partition| {
                let moved = swap_for_local_improvements(
                    self.graph,
                    self.incoming.as_ref(),
                    self.objective,
                    self.k,
                    &self.min_community_sizes,
                    &self.affinities,
                    &self.swap_status,
                    solution,
                    cardinalities,
                    &changed,
                    partition,
                );
                round_swaps.fetch_add(moved, Ordering::Relaxed);
            });
            scope.end(Task::SwapForLocalImprovements);

            rounds += 1;
            let round_swaps = round_swaps.into_inner();
            swaps += round_swaps;
            trace!(event = "local_search_round", round = rounds, swaps = round_swaps);
        }
        let converged = !changed.load(Ordering::Relaxed);
        scope.end(Task::ConvergenceLoop);

        scope.begin(Task::ComputeCost);
        compute_cost(workers, self.graph, &self.partitions, weighted, solution, cost);
        scope.end(Task::ComputeCost);
        scope.end(Task::LocalSearch);

        scope.statistics().record_local_search(rounds, swaps);
        LocalSearchOutcome {
            rounds,
            swaps,
            converged,
        }
    }
}

impl<G: Graph, O: Objective> std::fmt::Debug for LocalSearch<'_, G, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearch")
            .field("objective", &self.objective)
            .field("k", &self.k)
            .field("min_community_sizes", &self.min_community_sizes)
            .field("partitions", &self.partitions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
