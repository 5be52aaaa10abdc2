//! Test utilities for cutforge-solver
//!
//! Re-exports graph fixtures from cutforge-test and adds solver-specific helpers.

use cutforge_core::{CandidateSolution, Cardinalities, CommunityId};

use crate::scope::SolverScope;
use crate::termination::NeverTerminate;
use crate::worker::WorkerPool;

pub use cutforge_test::{community_sizes, complete, cut_cost, cycle, grid, star};

/// A scope that never terminates.
pub fn create_scope(concurrency: usize, seed: u64) -> SolverScope<'static> {
    SolverScope::new(
        WorkerPool::new(concurrency).expect("worker pool"),
        seed,
        &NeverTerminate,
    )
}

/// A solution buffer together with cardinalities matching it exactly.
pub fn solution_with_cardinalities(
    communities: &[CommunityId],
    k: usize,
) -> (CandidateSolution, Cardinalities) {
    let cardinalities = Cardinalities::new(k);
    for (community, size) in community_sizes(communities, k).into_iter().enumerate() {
        cardinalities.add(community as CommunityId, size);
    }
    (CandidateSolution::from_communities(communities), cardinalities)
}
