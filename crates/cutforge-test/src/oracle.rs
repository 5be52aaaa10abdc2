//! Straightforward sequential evaluation of an assignment.

use cutforge_core::{CommunityId, Graph, RelationshipCursor};

/// Total weight of edges whose endpoints lie in different communities.
///
/// Unweighted relationships count as `1.0`; undirected edges count once.
pub fn cut_cost<G: Graph>(graph: &G, communities: &[CommunityId]) -> f64 {
    assert_eq!(graph.node_count(), communities.len());

    let mut cursor = graph.concurrent_copy();
    let mut total = 0.0;
    for node in 0..graph.node_count() {
        cursor.for_each_relationship(node, 1.0, |source, target, weight| {
            if communities[source] != communities[target] {
                total += weight;
            }
            true
        });
    }
    if graph.is_undirected() {
        total / 2.0
    } else {
        total
    }
}

/// Number of nodes per community.
pub fn community_sizes(communities: &[CommunityId], k: usize) -> Vec<u64> {
    let mut sizes = vec![0; k];
    for &community in communities {
        sizes[community as usize] += 1;
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{complete, weighted_star};

    #[test]
    fn test_balanced_k4_cut() {
        assert_eq!(cut_cost(&complete(4), &[0, 0, 1, 1]), 4.0);
        assert_eq!(cut_cost(&complete(4), &[0, 0, 0, 0]), 0.0);
    }

    #[test]
    fn test_weighted_star_cut() {
        let graph = weighted_star(&[1.0, 2.5, 4.0]);
        assert_eq!(cut_cost(&graph, &[0, 1, 0, 1]), 5.0);
    }

    #[test]
    fn test_community_sizes() {
        assert_eq!(community_sizes(&[0, 2, 2, 1], 3), vec![1, 1, 2]);
    }
}
