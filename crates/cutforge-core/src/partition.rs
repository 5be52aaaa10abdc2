//! Static work partitions over node ids.
//!
//! Partitions are contiguous, disjoint and together cover `0..node_count`.
//! They are computed once per run and reused by every parallel phase.

use std::ops::Range;

use crate::graph::Graph;

/// A contiguous block of node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub len: usize,
}

impl Partition {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Node ids covered by this partition.
    #[inline]
    pub fn nodes(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Splits nodes so that every partition carries roughly the same number of
/// relationships.
///
/// Nodes are accumulated until their summed degree reaches
/// `max(min_batch_size, ceil(relationships / concurrency))`; the remainder
/// forms a trailing partition. An empty graph yields no partitions.
///
/// # Examples
///
/// ```
/// use cutforge_core::{degree_partition, CsrGraph};
///
/// let graph = CsrGraph::builder(4)
///     .undirected()
///     .edges([(0, 1), (1, 2), (2, 3)])
///     .build()
///     .unwrap();
///
/// let partitions = degree_partition(&graph, 2, 1);
/// assert_eq!(partitions.iter().map(|p| p.len).sum::<usize>(), 4);
/// ```
pub fn degree_partition<G: Graph + ?Sized>(
    graph: &G,
    concurrency: usize,
    min_batch_size: usize,
) -> Vec<Partition> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Vec::new();
    }

    let batch_size = batch_size(graph.relationship_count(), concurrency, min_batch_size);

    let mut partitions = Vec::new();
    let mut start = 0;
    let mut accumulated = 0;
    for node in 0..node_count {
        accumulated += graph.degree(node);
        if accumulated >= batch_size {
            partitions.push(Partition::new(start, node + 1 - start));
            start = node + 1;
            accumulated = 0;
        }
    }
    if start < node_count {
        partitions.push(Partition::new(start, node_count - start));
    }
    partitions
}

/// Splits `0..node_count` into blocks of `max(min_batch_size, ceil(n / concurrency))` nodes.
pub fn range_partition(
    node_count: usize,
    concurrency: usize,
    min_batch_size: usize,
) -> Vec<Partition> {
    if node_count == 0 {
        return Vec::new();
    }

    let batch_size = batch_size(node_count, concurrency, min_batch_size);
    (0..node_count)
        .step_by(batch_size)
        .map(|start| Partition::new(start, batch_size.min(node_count - start)))
        .collect()
}

fn batch_size(total: usize, concurrency: usize, min_batch_size: usize) -> usize {
    let concurrency = concurrency.max(1);
    total.div_ceil(concurrency).max(min_batch_size).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CsrGraph;

    fn assert_covers(partitions: &[Partition], node_count: usize) {
        let mut next = 0;
        for partition in partitions {
            assert_eq!(partition.start, next);
            assert!(partition.len > 0);
            next = partition.end();
        }
        assert_eq!(next, node_count);
    }

    #[test]
    fn test_degree_partition_empty_graph() {
        let graph = CsrGraph::builder(0).build().unwrap();
        assert!(degree_partition(&graph, 4, 1).is_empty());
    }

    #[test]
    fn test_degree_partition_single_batch_when_min_is_large() {
        let graph = CsrGraph::builder(5)
            .undirected()
            .edges([(0, 1), (1, 2), (2, 3), (3, 4)])
            .build()
            .unwrap();

        let partitions = degree_partition(&graph, 4, 10_000);
        assert_eq!(partitions, vec![Partition::new(0, 5)]);
    }

    #[test]
    fn test_degree_partition_balances_relationships() {
        // Ring of 8 nodes: every degree is 2, 16 relationships, batch of 4.
        let graph = CsrGraph::builder(8)
            .undirected()
            .edges((0..8).map(|i| (i, (i + 1) % 8)))
            .build()
            .unwrap();

        let partitions = degree_partition(&graph, 4, 1);
        assert_eq!(partitions.len(), 4);
        assert!(partitions.iter().all(|p| p.len == 2));
        assert_covers(&partitions, 8);
    }

    #[test]
    fn test_degree_partition_keeps_isolated_tail() {
        let graph = CsrGraph::builder(6)
            .undirected()
            .edges([(0, 1), (0, 2)])
            .build()
            .unwrap();

        let partitions = degree_partition(&graph, 2, 1);
        assert_covers(&partitions, 6);
    }

    #[test]
    fn test_range_partition_splits_evenly() {
        let partitions = range_partition(10, 3, 1);
        assert_eq!(
            partitions,
            vec![
                Partition::new(0, 4),
                Partition::new(4, 4),
                Partition::new(8, 2),
            ]
        );
    }

    #[test]
    fn test_range_partition_respects_min_batch() {
        let partitions = range_partition(10, 8, 6);
        assert_eq!(partitions, vec![Partition::new(0, 6), Partition::new(6, 4)]);
        assert!(range_partition(0, 4, 1).is_empty());
    }
}
