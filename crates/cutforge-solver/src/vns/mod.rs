//! Variable neighborhood search around one trial's solution.
//!
//! # Algorithm
//!
//! 1. Start with perturbation order 0
//! 2. Copy the best solution into the neighbor buffer and move `order`
//!    random nodes to a different random community
//! 3. Run local search on the neighbor
//! 4. If the neighbor is strictly better: adopt it, restart from order 0
//! 5. Otherwise: escalate to order + 1
//! 6. Stop at the maximum order, on termination, or when no node can be
//!    perturbed without breaking a minimum community size

use std::mem;

use cutforge_core::{AtomicCost, CandidateSolution, Cardinalities, CommunityId, Graph, Objective};
use rand::Rng;
use tracing::{debug, trace};

use crate::localsearch::LocalSearch;
use crate::progress::Task;
use crate::scope::SolverScope;

/// Result of one [`VariableNeighborhoodSearch::compute`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VnsOutcome {
    /// Perturb + local search rounds executed.
    pub rounds: u64,
    /// Rounds whose neighbor replaced the best solution.
    pub improvements: u64,
    /// True if the search stopped because a perturbation found no movable node.
    pub stuck: bool,
}

/// Variable neighborhood search with owned neighbor buffers.
///
/// Adoption swaps the neighbor buffers with the caller's best buffers, so no
/// solution is ever copied back.
#[derive(Debug)]
pub struct VariableNeighborhoodSearch<O: Objective> {
    objective: O,
    k: usize,
    max_order: usize,
    max_retries: usize,
    min_community_sizes: Vec<u64>,
    neighbor: CandidateSolution,
    neighbor_cardinalities: Cardinalities,
    neighbor_cost: AtomicCost,
}

impl<O: Objective> VariableNeighborhoodSearch<O> {
    /// Creates a search over `node_count` nodes and `k` communities.
    ///
    /// `min_community_sizes` must hold `k` entries.
    pub fn new(
        objective: O,
        node_count: usize,
        k: usize,
        max_order: usize,
        max_retries: usize,
        min_community_sizes: Vec<u64>,
    ) -> Self {
        Self {
            objective,
            k,
            max_order,
            max_retries,
            min_community_sizes,
            neighbor: CandidateSolution::new(node_count),
            neighbor_cardinalities: Cardinalities::new(k),
            neighbor_cost: AtomicCost::new(objective.worst()),
        }
    }

    /// Searches around `best`, leaving the best solution found in the same slot.
    ///
    /// With a maximum order of zero this is exactly one local search on `best`.
    pub fn compute<G: Graph>(
        &mut self,
        scope: &mut SolverScope<'_>,
        local_search: &mut LocalSearch<'_, G, O>,
        best: &mut CandidateSolution,
        best_cost: &AtomicCost,
        best_cardinalities: &mut Cardinalities,
    ) -> VnsOutcome {
        if self.max_order == 0 {
            local_search.compute(scope, best, best_cost, best_cardinalities);
            return VnsOutcome::default();
        }

        let mut outcome = VnsOutcome::default();
        let mut order = 0;

        scope.begin(Task::VariableNeighborhoodSearch);
        while order < self.max_order && scope.is_running() {
            let round_order = order;
            scope.begin(Task::VnsRound { order: round_order });

            self.neighbor.copy_from(best);
            self.neighbor_cardinalities.copy_from(best_cardinalities);

            let mut perturbed = true;
            for _ in 0..order {
                if !self.perturb(scope) {
                    perturbed = false;
                    break;
                }
            }

            local_search.compute(
                scope,
                &self.neighbor,
                &self.neighbor_cost,
                &self.neighbor_cardinalities,
            );

            let neighbor_cost = self.neighbor_cost.get();
            let improved = self.objective.better_than(neighbor_cost, best_cost.get());
            if improved {
                mem::swap(best, &mut self.neighbor);
                mem::swap(best_cardinalities, &mut self.neighbor_cardinalities);
                best_cost.set(neighbor_cost);
                outcome.improvements += 1;
                order = 0;
            } else {
                order += 1;
            }

            outcome.rounds += 1;
            scope.statistics().record_vns_round(improved);
            trace!(
                event = "vns_round",
                order = round_order,
                cost = neighbor_cost,
                improved = improved,
            );
            scope.end(Task::VnsRound { order: round_order });

            if !perturbed {
                outcome.stuck = true;
                scope.statistics().record_vns_stuck();
                break;
            }
        }
        scope.end(Task::VariableNeighborhoodSearch);

        debug!(
            event = "vns_end",
            rounds = outcome.rounds,
            improvements = outcome.improvements,
            stuck = outcome.stuck,
            cost = best_cost.get(),
        );
        outcome
    }

    /// Moves one random node of the neighbor to a different random community.
    ///
    /// Draws up to `max_retries` nodes. A draw is rejected if its community is
    /// already at its minimum size or if there is no other community. Returns
    /// false if every draw was rejected.
    fn perturb(&mut self, scope: &mut SolverScope<'_>) -> bool {
        let node_count = self.neighbor.len();
        if node_count == 0 {
            return false;
        }

        for _ in 0..self.max_retries {
            let node = scope.rng().random_range(0..node_count);
            let current = self.neighbor.get(node);
            if self.neighbor_cardinalities.get(current)
                <= self.min_community_sizes[current as usize]
            {
                continue;
            }
            if self.k < 2 {
                continue;
            }

            let shift = scope.rng().random_range(1..self.k) as CommunityId;
            let target = (current + shift) % self.k as CommunityId;
            self.neighbor.set(node, target);
            self.neighbor_cardinalities.decrement(current);
            self.neighbor_cardinalities.increment(target);
            return true;
        }
        false
    }
}
