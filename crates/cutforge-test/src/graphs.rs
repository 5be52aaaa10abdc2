//! Undirected graph fixtures.
//!
//! Every constructor panics on invalid input; fixtures are test-only.

use cutforge_core::CsrGraph;

/// Complete graph on `n` nodes. Max 2-cut is `floor(n/2) * ceil(n/2)`.
pub fn complete(n: usize) -> CsrGraph {
    let edges = (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j)));
    CsrGraph::builder(n)
        .undirected()
        .edges(edges)
        .build()
        .expect("complete graph fixture")
}

/// Cycle `0 - 1 - ... - (n-1) - 0`. Even cycles are fully bipartite.
pub fn cycle(n: usize) -> CsrGraph {
    CsrGraph::builder(n)
        .undirected()
        .edges((0..n).map(|i| (i, (i + 1) % n)))
        .build()
        .expect("cycle fixture")
}

/// Star with center `0` and `leaves` leaves.
pub fn star(leaves: usize) -> CsrGraph {
    CsrGraph::builder(leaves + 1)
        .undirected()
        .edges((1..=leaves).map(|leaf| (0, leaf)))
        .build()
        .expect("star fixture")
}

/// Star with center `0`; leaf `i + 1` is attached with `weights[i]`.
pub fn weighted_star(weights: &[f64]) -> CsrGraph {
    weights
        .iter()
        .enumerate()
        .fold(
            CsrGraph::builder(weights.len() + 1).undirected(),
            |builder, (i, &w)| builder.weighted_edge(0, i + 1, w),
        )
        .build()
        .expect("weighted star fixture")
}

/// `rows x cols` grid with 4-neighborhood. Bipartite, so every edge can be cut.
pub fn grid(rows: usize, cols: usize) -> CsrGraph {
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let node = r * cols + c;
            if c + 1 < cols {
                edges.push((node, node + 1));
            }
            if r + 1 < rows {
                edges.push((node, node + cols));
            }
        }
    }
    CsrGraph::builder(rows * cols)
        .undirected()
        .edges(edges)
        .build()
        .expect("grid fixture")
}

/// Two disjoint cliques of `size` nodes joined by a single bridge edge.
///
/// Nodes `0..size` form the first clique, `size..2*size` the second.
pub fn two_cliques(size: usize) -> CsrGraph {
    let mut edges = Vec::new();
    for offset in [0, size] {
        for i in 0..size {
            for j in i + 1..size {
                edges.push((offset + i, offset + j));
            }
        }
    }
    if size > 0 {
        edges.push((size - 1, size));
    }
    CsrGraph::builder(2 * size)
        .undirected()
        .edges(edges)
        .build()
        .expect("two cliques fixture")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutforge_core::Graph;

    #[test]
    fn test_fixture_sizes() {
        assert_eq!(complete(4).relationship_count(), 12);
        assert_eq!(cycle(6).relationship_count(), 12);
        assert_eq!(star(5).node_count(), 6);
        assert_eq!(grid(3, 4).relationship_count(), 2 * (3 * 3 + 2 * 4));
        assert_eq!(two_cliques(3).relationship_count(), 2 * 7);
        assert!(weighted_star(&[1.0, 2.0]).has_relationship_property());
    }
}
