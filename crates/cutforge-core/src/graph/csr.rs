//! Compressed sparse row graph.

use std::fmt;

use super::{Graph, RelationshipCursor};
use crate::error::{CutForgeError, Result};

/// An immutable graph in compressed sparse row layout.
///
/// - `offsets`: length `node_count + 1`, relationships of node `n` live in
///   `offsets[n]..offsets[n + 1]`
/// - `targets`: target node of every stored relationship
/// - `weights`: present only for weighted graphs, parallel to `targets`
///
/// # Examples
///
/// ```
/// use cutforge_core::{CsrGraph, Graph};
///
/// let graph = CsrGraph::builder(3)
///     .undirected()
///     .edge(0, 1)
///     .edge(1, 2)
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.relationship_count(), 4);
/// assert_eq!(graph.degree(1), 2);
/// ```
#[derive(Clone)]
pub struct CsrGraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    weights: Option<Vec<f64>>,
    undirected: bool,
}

impl CsrGraph {
    /// Starts building a graph with `node_count` nodes.
    pub fn builder(node_count: usize) -> CsrGraphBuilder {
        CsrGraphBuilder::new(node_count)
    }

    /// Targets of the relationships stored for `node`.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Sum of all relationship weights, each undirected edge counted once.
    ///
    /// Unweighted graphs count every edge as `1.0`.
    pub fn total_edge_weight(&self) -> f64 {
        let stored: f64 = match &self.weights {
            Some(weights) => weights.iter().sum(),
            None => self.targets.len() as f64,
        };
        if self.undirected {
            stored / 2.0
        } else {
            stored
        }
    }
}

impl fmt::Debug for CsrGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrGraph")
            .field("node_count", &self.node_count())
            .field("relationship_count", &self.relationship_count())
            .field("weighted", &self.weights.is_some())
            .field("undirected", &self.undirected)
            .finish()
    }
}

impl Graph for CsrGraph {
    type Cursor<'g> = CsrCursor<'g>;

    fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn relationship_count(&self) -> usize {
        self.targets.len()
    }

    fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    fn has_relationship_property(&self) -> bool {
        self.weights.is_some()
    }

    fn is_undirected(&self) -> bool {
        self.undirected
    }

    fn concurrent_copy(&self) -> Self::Cursor<'_> {
        CsrCursor { graph: self }
    }
}

/// Traversal cursor over a [`CsrGraph`].
#[derive(Debug, Clone, Copy)]
pub struct CsrCursor<'g> {
    graph: &'g CsrGraph,
}

impl RelationshipCursor for CsrCursor<'_> {
    fn for_each_relationship<F>(&mut self, node: usize, fallback_weight: f64, mut visitor: F)
    where
        F: FnMut(usize, usize, f64) -> bool,
    {
        let range = self.graph.offsets[node]..self.graph.offsets[node + 1];
        match &self.graph.weights {
            Some(weights) => {
                for idx in range {
                    if !visitor(node, self.graph.targets[idx], weights[idx]) {
                        return;
                    }
                }
            }
            None => {
                for idx in range {
                    if !visitor(node, self.graph.targets[idx], fallback_weight) {
                        return;
                    }
                }
            }
        }
    }
}

/// Builder for [`CsrGraph`].
///
/// Edges may be added in any order. Mixing weighted and unweighted edges is
/// allowed; unweighted edges then receive a weight of `1.0`.
#[derive(Debug, Clone)]
pub struct CsrGraphBuilder {
    node_count: usize,
    edges: Vec<(usize, usize, Option<f64>)>,
    undirected: bool,
}

impl CsrGraphBuilder {
    /// Creates a builder for a directed graph with `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            undirected: false,
        }
    }

    /// Stores every edge in both directions.
    pub fn undirected(mut self) -> Self {
        self.undirected = true;
        self
    }

    /// Adds an unweighted edge.
    pub fn edge(mut self, source: usize, target: usize) -> Self {
        self.edges.push((source, target, None));
        self
    }

    /// Adds a weighted edge.
    pub fn weighted_edge(mut self, source: usize, target: usize, weight: f64) -> Self {
        self.edges.push((source, target, Some(weight)));
        self
    }

    /// Adds all edges from an iterator of `(source, target)` pairs.
    pub fn edges(mut self, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.edges
            .extend(edges.into_iter().map(|(source, target)| (source, target, None)));
        self
    }

    /// Builds the graph.
    ///
    /// # Errors
    ///
    /// Returns [`CutForgeError::Graph`] if an edge references a node outside
    /// `0..node_count` or carries a non-finite weight.
    pub fn build(self) -> Result<CsrGraph> {
        let weighted = self.edges.iter().any(|(_, _, w)| w.is_some());

        for &(source, target, weight) in &self.edges {
            if source >= self.node_count || target >= self.node_count {
                return Err(CutForgeError::Graph(format!(
                    "edge ({source}, {target}) out of range for {} nodes",
                    self.node_count
                )));
            }
            if let Some(w) = weight {
                if !w.is_finite() {
                    return Err(CutForgeError::Graph(format!(
                        "edge ({source}, {target}) has non-finite weight {w}"
                    )));
                }
            }
        }

        let mut degrees = vec![0usize; self.node_count];
        for &(source, target, _) in &self.edges {
            degrees[source] += 1;
            if self.undirected {
                degrees[target] += 1;
            }
        }

        let mut offsets = Vec::with_capacity(self.node_count + 1);
        offsets.push(0);
        for degree in &degrees {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + degree);
        }

        let stored = offsets[self.node_count];
        let mut targets = vec![0usize; stored];
        let mut weights = weighted.then(|| vec![0.0f64; stored]);
        let mut cursor = offsets[..self.node_count].to_vec();

        let mut push = |from: usize, to: usize, weight: f64| {
            let slot = cursor[from];
            targets[slot] = to;
            if let Some(weights) = weights.as_mut() {
                weights[slot] = weight;
            }
            cursor[from] += 1;
        };

        for &(source, target, weight) in &self.edges {
            let weight = weight.unwrap_or(1.0);
            push(source, target, weight);
            if self.undirected {
                push(target, source, weight);
            }
        }

        Ok(CsrGraph {
            offsets,
            targets,
            weights,
            undirected: self.undirected,
        })
    }
}
