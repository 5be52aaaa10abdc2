//! Read-only graph capability consumed by the solver.
//!
//! The solver never mutates a graph. Parallel phases obtain one independent
//! traversal cursor per worker task through [`Graph::concurrent_copy`] and
//! pass it around explicitly; there is no ambient thread-local state.

mod csr;

pub use csr::{CsrCursor, CsrGraph, CsrGraphBuilder};

/// A read-only weighted graph.
///
/// Node ids are dense in `0..node_count()`. Relationships are stored per
/// source node; undirected graphs expose every edge from both endpoints.
pub trait Graph: Send + Sync {
    /// Independent traversal handle handed to a single worker task.
    type Cursor<'g>: RelationshipCursor + Send
    where
        Self: 'g;

    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of stored relationships (both directions for undirected graphs).
    fn relationship_count(&self) -> usize;

    /// Number of relationships stored for `node`.
    fn degree(&self, node: usize) -> usize;

    /// Whether relationships carry a weight property.
    ///
    /// Unweighted graphs are traversed with the caller's fallback weight.
    fn has_relationship_property(&self) -> bool;

    /// Whether every edge is stored in both directions.
    fn is_undirected(&self) -> bool;

    /// Creates a traversal cursor that may be used concurrently with others.
    fn concurrent_copy(&self) -> Self::Cursor<'_>;
}

/// Traversal over the relationships of single nodes.
pub trait RelationshipCursor {
    /// Visits each relationship of `node` as `(source, target, weight)`.
    ///
    /// `fallback_weight` is reported for graphs without a weight property.
    /// Returning `false` from the visitor stops the traversal early.
    fn for_each_relationship<F>(&mut self, node: usize, fallback_weight: f64, visitor: F)
    where
        F: FnMut(usize, usize, f64) -> bool;
}
