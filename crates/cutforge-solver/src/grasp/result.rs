//! What a run hands back to the caller.

use cutforge_core::CommunityId;
use serde::Serialize;

use crate::statistics::SolveStatistics;

/// Best solution of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutResult {
    /// Community of every node, indexed by node id.
    pub candidate_solution: Vec<CommunityId>,
    /// Cut weight of `candidate_solution`.
    pub cut_cost: f64,
    pub statistics: SolveStatistics,
}

impl CutResult {
    pub fn community_of(&self, node: usize) -> CommunityId {
        self.candidate_solution[node]
    }

    /// Number of nodes in each of the `k` communities.
    pub fn community_sizes(&self, k: usize) -> Vec<u64> {
        let mut sizes = vec![0; k];
        for &community in &self.candidate_solution {
            sizes[community as usize] += 1;
        }
        sizes
    }
}

/// Sent through the solution channel whenever a trial beats the best so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovedSolution {
    /// 1-based index of the trial that produced the solution.
    pub trial: usize,
    pub cost: f64,
    pub solution: Vec<CommunityId>,
}
