//! End-to-end tests through the public facade.

use std::sync::atomic::AtomicBool;

use cutforge::prelude::*;
use cutforge::CutForgeError;
use cutforge_test::{complete, cut_cost, grid, two_cliques, weighted_star};
use tokio::sync::mpsc::unbounded_channel;

fn seeded(k: u32, iterations: usize) -> KCutConfig {
    KCutConfig::new()
        .with_k(k)
        .with_iterations(iterations)
        .with_random_seed(2024)
        .with_concurrency(2)
}

#[test]
fn test_complete_graph_splits_in_half() {
    let graph = complete(4);
    let config = seeded(2, 10).with_min_community_sizes([0, 0]);

    let result = solve(&graph, &config).unwrap();

    assert_eq!(result.cut_cost, 4.0);
    assert_eq!(result.community_sizes(2), vec![2, 2]);
}

#[test]
fn test_single_community_has_no_cut() {
    let graph = complete(6);
    for minimize in [false, true] {
        let config = seeded(1, 2)
            .with_minimize(minimize)
            .with_vns_max_neighborhood_order(2);

        let result = solve(&graph, &config).unwrap();

        assert_eq!(result.cut_cost, 0.0);
        assert!(result.candidate_solution.iter().all(|&c| c == 0));
        assert_eq!(result.statistics.node_swaps, 0);
    }
}

#[test]
fn test_weighted_star_cuts_all_weight() {
    let graph = weighted_star(&[0.5, 1.5, 2.0, 4.0]);
    let result = solve(&graph, &seeded(2, 3)).unwrap();

    assert_eq!(result.cut_cost, 8.0);
}

#[test]
fn test_local_optimum_cuts_most_edges() {
    // A converged k-cut keeps at least (k - 1) / k of the weight crossing.
    let graph = grid(6, 6);
    let total = graph.total_edge_weight();
    let config = seeded(3, 4).with_vns_max_neighborhood_order(3);

    let result = solve(&graph, &config).unwrap();

    assert!(result.cut_cost >= total * 2.0 / 3.0);
    assert!(result.cut_cost <= total);
    assert_eq!(result.cut_cost, cut_cost(&graph, &result.candidate_solution));
}

#[test]
fn test_minimize_keeps_cliques_together() {
    let graph = two_cliques(5);
    let config = seeded(2, 6).with_minimize(true).with_min_community_sizes([5, 5]);

    let result = solve(&graph, &config).unwrap();

    assert_eq!(result.community_sizes(2), vec![5, 5]);
    assert_eq!(result.cut_cost, cut_cost(&graph, &result.candidate_solution));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let graph = complete(4);

    let too_large = seeded(2, 1).with_min_community_sizes([3, 3]);
    assert!(matches!(
        solve(&graph, &too_large),
        Err(CutForgeError::Config(_))
    ));

    let no_communities = seeded(0, 1);
    assert!(matches!(
        solve(&graph, &no_communities),
        Err(CutForgeError::Config(_))
    ));

    let wrong_length = seeded(3, 1).with_min_community_sizes([1, 1]);
    assert!(matches!(
        solve(&graph, &wrong_length),
        Err(CutForgeError::Config(_))
    ));
}

#[test]
fn test_configuration_from_toml() {
    let config = KCutConfig::from_toml_str(
        r#"
        k = 2
        iterations = 5
        concurrency = 1
        random_seed = 3
        vns_max_neighborhood_order = 2
        "#,
    )
    .unwrap();

    let result = solve(&complete(4), &config).unwrap();
    assert_eq!(result.cut_cost, 4.0);
    assert_eq!(result.statistics.trials_completed, 5);
}

#[test]
fn test_channel_streams_improvements() {
    let graph = grid(5, 5);
    let (sender, mut receiver) = unbounded_channel();

    let result = solve_with_channel(&graph, &seeded(2, 6), None, sender).unwrap();

    let mut last = None;
    while let Ok(update) = receiver.try_recv() {
        last = Some(update);
    }
    let last = last.unwrap();
    assert_eq!(last.cost, result.cut_cost);
    assert_eq!(last.solution, result.candidate_solution);
}

#[test]
fn test_terminate_flag_stops_before_any_trial() {
    let graph = complete(4);
    let terminate = AtomicBool::new(true);
    let (sender, mut receiver) = unbounded_channel();

    let result = solve_with_channel(&graph, &seeded(2, 50), Some(&terminate), sender).unwrap();

    assert_eq!(result.statistics.trials_completed, 0);
    assert!(receiver.try_recv().is_err());
}
