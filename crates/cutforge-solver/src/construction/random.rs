//! Uniform random placement.

use cutforge_core::{range_partition, CandidateSolution, Cardinalities, CommunityId, Graph};
use rand::Rng;
use rayon::prelude::*;
use tracing::trace;

use super::ConstructionHeuristic;
use crate::progress::Task;
use crate::scope::SolverScope;

/// Places nodes into uniformly random communities.
///
/// Runs in two steps:
/// 1. Reserves `min_community_sizes[c]` distinct random nodes for every
///    community `c` with a partial Fisher-Yates shuffle on the run's generator.
/// 2. Assigns every remaining node a uniformly random community in parallel.
///    Each node-range partition draws from its own split generator, so the
///    result depends only on the seed and the partitioning.
#[derive(Debug, Clone)]
pub struct RandomPlacement {
    min_batch_size: usize,
}

impl RandomPlacement {
    pub fn new(min_batch_size: usize) -> Self {
        Self {
            min_batch_size: min_batch_size.max(1),
        }
    }
}

impl Default for RandomPlacement {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl ConstructionHeuristic for RandomPlacement {
    fn construct<G: Graph>(
        &self,
        graph: &G,
        scope: &mut SolverScope<'_>,
        min_community_sizes: &[u64],
        solution: &CandidateSolution,
        cardinalities: &Cardinalities,
    ) {
        scope.begin(Task::Construction);

        let node_count = graph.node_count();
        let k = cardinalities.k();
        cardinalities.reset();

        let mut nodes: Vec<usize> = (0..node_count).collect();
        let mut reserved = 0;
        for (community, &min_size) in min_community_sizes.iter().enumerate().take(k) {
            let take = (min_size as usize).min(node_count - reserved);
            for _ in 0..take {
                let pick = scope.rng().random_range(reserved..node_count);
                nodes.swap(reserved, pick);
                solution.set(nodes[reserved], community as CommunityId);
                reserved += 1;
            }
            cardinalities.add(community as CommunityId, take as u64);
        }

        let free = &nodes[reserved..];
        let partitions = range_partition(
            free.len(),
            scope.workers().concurrency(),
            self.min_batch_size,
        );
        let mut tasks: Vec<_> = partitions.iter().map(|&p| (p, scope.split_rng())).collect();

        scope.workers().install(|| {
            tasks.par_iter_mut().for_each(|(partition, rng)| {
                let mut counts = vec![0u64; k];
                for &node in &free[partition.nodes()] {
                    let community = rng.random_range(0..k);
                    solution.set(node, community as CommunityId);
                    counts[community] += 1;
                }
                for (community, count) in counts.into_iter().enumerate() {
                    if count > 0 {
                        cardinalities.add(community as CommunityId, count);
                    }
                }
            });
        });

        trace!(
            event = "construction_end",
            reserved = reserved,
            placed = free.len(),
            partitions = partitions.len(),
        );
        scope.end(Task::Construction);
    }
}
