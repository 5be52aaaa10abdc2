//! Tests for local search.

use std::sync::atomic::AtomicBool;

use cutforge_core::{CsrGraph, Maximize, Minimize};

use super::*;
use crate::construction::{ConstructionHeuristic, RandomPlacement};
use crate::termination::ExternalTermination;
use crate::test_utils::{
    community_sizes, complete, create_scope, cut_cost, cycle, grid, solution_with_cardinalities,
};
use crate::worker::WorkerPool;
use cutforge_test::weighted_star;

fn run<O: Objective>(
    graph: &CsrGraph,
    objective: O,
    start: &[u32],
    k: usize,
    min_sizes: &[u64],
) -> (Vec<u32>, f64, Vec<u64>, LocalSearchOutcome) {
    let scope = create_scope(1, 0);
    let (solution, cardinalities) = solution_with_cardinalities(start, k);
    let cost = AtomicCost::new(objective.worst());
    let mut local_search = LocalSearch::new(graph, objective, k, min_sizes.to_vec(), 1, 1);

    let outcome = local_search.compute(&scope, &solution, &cost, &cardinalities);
    (solution.to_vec(), cost.get(), cardinalities.to_vec(), outcome)
}

/// No node can strictly lower the weight toward its own community (maximize).
fn assert_locally_optimal(graph: &CsrGraph, communities: &[u32], k: usize) {
    for node in 0..communities.len() {
        let mut affinity = vec![0.0; k];
        for &target in graph.neighbors(node) {
            if target != node {
                affinity[communities[target] as usize] += 1.0;
            }
        }
        let own = affinity[communities[node] as usize];
        assert!(
            affinity.iter().all(|&other| own <= other),
            "node {node} could improve: {affinity:?}"
        );
    }
}

#[test]
fn test_k4_converges_to_balanced_cut() {
    let graph = complete(4);
    let (communities, cost, cardinalities, outcome) =
        run(&graph, Maximize, &[0, 0, 0, 0], 2, &[0, 0]);

    assert_eq!(cost, 4.0);
    assert_eq!(cardinalities, vec![2, 2]);
    assert_eq!(community_sizes(&communities, 2), cardinalities);
    assert_eq!(outcome.swaps, 2);
    assert_eq!(outcome.rounds, 3);
    assert!(outcome.converged);
}

#[test]
fn test_minimum_size_blocks_every_move() {
    let graph = complete(4);
    let (communities, cost, _, outcome) = run(&graph, Maximize, &[0, 0, 0, 0], 2, &[4, 0]);

    assert_eq!(communities, vec![0, 0, 0, 0]);
    assert_eq!(cost, 0.0);
    assert_eq!(outcome.swaps, 0);
    assert_eq!(outcome.rounds, 1);
}

#[test]
fn test_minimize_merges_communities() {
    let graph = complete(4);
    let (_, cost, cardinalities, outcome) = run(&graph, Minimize, &[0, 0, 1, 1], 2, &[0, 0]);

    assert_eq!(cost, 0.0);
    assert_eq!(cardinalities, vec![0, 4]);
    assert_eq!(outcome.swaps, 2);
}

#[test]
fn test_minimize_respects_minimum_sizes() {
    let graph = complete(4);
    let (communities, cost, cardinalities, _) = run(&graph, Minimize, &[0, 0, 1, 1], 2, &[1, 1]);

    assert_eq!(cardinalities, vec![1, 3]);
    assert_eq!(cost, 3.0);
    assert_eq!(cut_cost(&graph, &communities), 3.0);
}

#[test]
fn test_single_community_never_swaps() {
    let graph = complete(5);
    let (communities, cost, _, outcome) = run(&graph, Maximize, &[0; 5], 1, &[0]);

    assert_eq!(communities, vec![0; 5]);
    assert_eq!(cost, 0.0);
    assert_eq!(outcome.swaps, 0);
    assert!(outcome.converged);
}

#[test]
fn test_weighted_star_cuts_every_edge() {
    let graph = weighted_star(&[1.0, 2.5, 4.0]);
    let (communities, cost, _, _) = run(&graph, Maximize, &[0; 4], 2, &[0, 0]);

    assert_eq!(cost, 7.5);
    assert_eq!(communities, vec![1, 0, 0, 0]);
}

#[test]
fn test_self_loops_are_ignored() {
    let graph = CsrGraph::builder(2)
        .undirected()
        .edges([(0, 0), (0, 1)])
        .build()
        .unwrap();
    let (communities, cost, _, _) = run(&graph, Maximize, &[0, 0], 2, &[0, 0]);

    assert_ne!(communities[0], communities[1]);
    assert_eq!(cost, 1.0);
}

#[test]
fn test_directed_cost_matches_oracle() {
    let graph = CsrGraph::builder(4)
        .edges([(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)])
        .build()
        .unwrap();
    let (communities, cost, _, outcome) = run(&graph, Maximize, &[0; 4], 2, &[0, 0]);

    assert!(outcome.converged);
    assert_eq!(cost, cut_cost(&graph, &communities));
    // 0 -> 1 -> 2 -> 3 -> 0 plus 0 -> 2: the best 2-cut leaves only one edge uncut.
    assert_eq!(cost, 4.0);
}

#[test]
fn test_incoming_relationships_reverse_directed_edges() {
    let graph = CsrGraph::builder(3)
        .edges([(0, 2), (1, 2), (2, 0)])
        .build()
        .unwrap();
    let incoming = incoming::IncomingRelationships::build(&graph);

    assert_eq!(incoming.sources(2), &[0, 1]);
    assert_eq!(incoming.sources(0), &[2]);
    assert!(incoming.sources(1).is_empty());
}

#[test]
fn test_parallel_run_is_consistent_and_locally_optimal() {
    let k = 3;
    for (graph, seed) in [(cycle(64), 1), (grid(8, 8), 2), (complete(12), 3)] {
        let mut scope = create_scope(4, seed);
        let solution = CandidateSolution::new(graph.node_count());
        let cardinalities = Cardinalities::new(k);
        RandomPlacement::new(8).construct(&graph, &mut scope, &[0; 3], &solution, &cardinalities);

        let cost = AtomicCost::new(Maximize.worst());
        let mut local_search = LocalSearch::new(&graph, Maximize, k, vec![0; 3], 4, 8);
        assert!(local_search.partitions().len() > 1);

        let outcome = local_search.compute(&scope, &solution, &cost, &cardinalities);
        let communities = solution.to_vec();

        assert!(outcome.converged);
        assert_eq!(cost.get(), cut_cost(&graph, &communities));
        assert_eq!(community_sizes(&communities, k), cardinalities.to_vec());
        assert_locally_optimal(&graph, &communities, k);

        // A converged solution is a fixed point.
        let again = local_search.compute(&scope, &solution, &cost, &cardinalities);
        assert_eq!(again.swaps, 0);
        assert_eq!(again.rounds, 1);
        assert_eq!(cost.get(), cut_cost(&graph, &communities));
    }
}

#[test]
fn test_terminated_search_still_reports_cost() {
    let graph = complete(4);
    let flag = AtomicBool::new(true);
    let termination = ExternalTermination::new(&flag);
    let scope = SolverScope::new(WorkerPool::new(2).unwrap(), 0, &termination);
    let (solution, cardinalities) = solution_with_cardinalities(&[0, 1, 0, 0], 2);
    let cost = AtomicCost::new(f64::NEG_INFINITY);

    let outcome = LocalSearch::new(&graph, Maximize, 2, vec![0, 0], 2, 1).compute(
        &scope,
        &solution,
        &cost,
        &cardinalities,
    );

    assert_eq!(outcome.rounds, 0);
    assert!(!outcome.converged);
    assert_eq!(solution.to_vec(), vec![0, 1, 0, 0]);
    assert_eq!(cost.get(), 3.0);
}

#[test]
fn test_statistics_are_recorded() {
    let graph = complete(4);
    let scope = create_scope(1, 0);
    let (solution, cardinalities) = solution_with_cardinalities(&[0; 4], 2);
    let cost = AtomicCost::new(0.0);

    LocalSearch::new(&graph, Maximize, 2, vec![0, 0], 1, 1).compute(
        &scope,
        &solution,
        &cost,
        &cardinalities,
    );

    let stats = scope.statistics().snapshot(scope.elapsed());
    assert_eq!(stats.local_search_calls, 1);
    assert_eq!(stats.local_search_rounds, 3);
    assert_eq!(stats.node_swaps, 2);
}
