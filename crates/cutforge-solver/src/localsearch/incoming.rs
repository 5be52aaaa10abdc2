//! Reverse adjacency for directed graphs.

use cutforge_core::{Graph, RelationshipCursor};

use super::phases::{relationship_weight, DEFAULT_WEIGHT};

/// Relationships grouped by target node, with weights already resolved.
///
/// Built once per local search so that affinities and neighbour locks see
/// every relationship incident to a node, not only the outgoing ones.
#[derive(Debug)]
pub(super) struct IncomingRelationships {
    offsets: Vec<usize>,
    sources: Vec<usize>,
    weights: Vec<f64>,
}

impl IncomingRelationships {
    pub(super) fn build<G: Graph>(graph: &G) -> Self {
        let node_count = graph.node_count();
        let weighted = graph.has_relationship_property();
        let mut cursor = graph.concurrent_copy();

        let mut offsets = vec![0usize; node_count + 1];
        for node in 0..node_count {
            cursor.for_each_relationship(node, DEFAULT_WEIGHT, |_, target, _| {
                offsets[target + 1] += 1;
                true
            });
        }
        for node in 0..node_count {
            offsets[node + 1] += offsets[node];
        }

        let total = offsets[node_count];
        let mut sources = vec![0usize; total];
        let mut weights = vec![0.0f64; total];
        let mut next = offsets[..node_count].to_vec();
        for node in 0..node_count {
            cursor.for_each_relationship(node, DEFAULT_WEIGHT, |source, target, weight| {
                let slot = next[target];
                sources[slot] = source;
                weights[slot] = relationship_weight(weighted, weight);
                next[target] += 1;
                true
            });
        }

        Self {
            offsets,
            sources,
            weights,
        }
    }

    /// Visits `(source, weight)` of every relationship pointing at `node`.
    #[inline]
    pub(super) fn for_each<F>(&self, node: usize, mut visitor: F)
    where
        F: FnMut(usize, f64) -> bool,
    {
        for idx in self.offsets[node]..self.offsets[node + 1] {
            if !visitor(self.sources[idx], self.weights[idx]) {
                return;
            }
        }
    }

    #[cfg(test)]
    pub(super) fn sources(&self, node: usize) -> &[usize] {
        &self.sources[self.offsets[node]..self.offsets[node + 1]]
    }
}
