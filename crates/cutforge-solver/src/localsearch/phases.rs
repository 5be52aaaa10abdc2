//! The parallel phases of a local search round.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use cutforge_core::{
    AtomicCost, CandidateSolution, Cardinalities, CommunityId, Graph, Objective, Partition,
    RelationshipCursor,
};
use rayon::prelude::*;

use super::incoming::IncomingRelationships;
use crate::worker::WorkerPool;

/// Weight reported by the cursor for graphs without a weight property.
pub(super) const DEFAULT_WEIGHT: f64 = 0.0;

/// Swap flag states, one per node and round.
pub(super) const UNTOUCHED: u8 = 0;
pub(super) const SWAPPING: u8 = 1;
pub(super) const SHOULD_NOT_SWAP: u8 = 2;

#[inline]
pub(super) fn relationship_weight(weighted: bool, weight: f64) -> f64 {
    if weighted {
        weight
    } else {
        1.0
    }
}

/// Fills `affinities[node * k + c]` with the weight from `node` toward community `c`.
///
/// Each partition owns the disjoint block of rows for its nodes. Directed
/// graphs also count relationships pointing at the node.
#[allow(clippy::too_many_arguments)]
pub(super) fn compute_affinities<G: Graph>(
    workers: &WorkerPool,
    graph: &G,
    incoming: Option<&IncomingRelationships>,
    partitions: &[Partition],
    k: usize,
    weighted: bool,
    solution: &CandidateSolution,
    affinities: &mut [f64],
) {
    let mut blocks = Vec::with_capacity(partitions.len());
    let mut rest = affinities;
    for &partition in partitions {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(partition.len * k);
        blocks.push((partition, head));
        rest = tail;
    }

    workers.install(|| {
        blocks.into_par_iter().for_each(|(partition, block)| {
            block.fill(0.0);
            let mut cursor = graph.concurrent_copy();
            for (row, node) in block.chunks_exact_mut(k).zip(partition.nodes()) {
                cursor.for_each_relationship(node, DEFAULT_WEIGHT, |source, target, weight| {
                    // Self-loops are never cut, wherever the node goes.
                    if source != target {
                        row[solution.get(target) as usize] += relationship_weight(weighted, weight);
                    }
                    true
                });
                if let Some(incoming) = incoming {
                    incoming.for_each(node, |source, weight| {
                        if source != node {
                            row[solution.get(source) as usize] += weight;
                        }
                        true
                    });
                }
            }
        });
    });
}

pub(super) fn reset_swap_status(
    workers: &WorkerPool,
    partitions: &[Partition],
    swap_status: &[AtomicU8],
) {
    workers.for_each_partition(partitions, |partition| {
        for node in partition.nodes() {
            swap_status[node].store(UNTOUCHED, Ordering::Relaxed);
        }
    });
}

/// Moves every node of `partition` that can improve the objective.
///
/// A moving node first claims itself (`UNTOUCHED -> SWAPPING`) and then
/// locks each neighbour (`UNTOUCHED -> SHOULD_NOT_SWAP`). Meeting a
/// neighbour that is already `SWAPPING` makes it back off. Hence adjacent
/// nodes never move in the same round and every move's gain is exact.
/// A back-off still raises `changed` so the blocked move is retried.
///
/// Returns the number of nodes moved.
#[allow(clippy::too_many_arguments)]
pub(super) fn swap_for_local_improvements<G: Graph, O: Objective>(
    graph: &G,
    incoming: Option<&IncomingRelationships>,
    objective: O,
    k: usize,
    min_community_sizes: &[u64],
    affinities: &[f64],
    swap_status: &[AtomicU8],
    solution: &CandidateSolution,
    cardinalities: &Cardinalities,
    changed: &AtomicBool,
    partition: Partition,
) -> u64 {
    let mut cursor = graph.concurrent_copy();
    let mut moved = 0;

    for node in partition.nodes() {
        let current = solution.get(node);
        let row = &affinities[node * k..(node + 1) * k];
        let current_affinity = row[current as usize];

        // Positive improvement means moving away from more weight than we move into.
        let mut best = current;
        let mut best_improvement = 0.0;
        for (community, &affinity) in row.iter().enumerate() {
            let community = community as CommunityId;
            if community == current {
                continue;
            }
            let improvement = current_affinity - affinity;
            if objective.better_than(improvement, best_improvement) {
                best = community;
                best_improvement = improvement;
            }
        }

        if best == current {
            continue;
        }

        // Advisory: concurrent decrements of the same community are not serialized.
        if cardinalities.get(current) <= min_community_sizes[current as usize] {
            continue;
        }

        if swap_status[node]
            .compare_exchange(UNTOUCHED, SWAPPING, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            continue;
        }

        let mut blocked = false;
        cursor.for_each_relationship(node, DEFAULT_WEIGHT, |_, target, _| {
            blocked = !lock_neighbour(swap_status, node, target);
            !blocked
        });
        if let (false, Some(incoming)) = (blocked, incoming) {
            incoming.for_each(node, |source, _| {
                blocked = !lock_neighbour(swap_status, node, source);
                !blocked
            });
        }

        changed.store(true, Ordering::Relaxed);
        if blocked {
            swap_status[node].store(SHOULD_NOT_SWAP, Ordering::SeqCst);
            continue;
        }

        cardinalities.decrement(current);
        cardinalities.increment(best);
        solution.set(node, best);
        moved += 1;
    }

    moved
}

/// Keeps `neighbour` from moving this round.
///
/// Returns false if the neighbour already claimed a move.
#[inline]
fn lock_neighbour(swap_status: &[AtomicU8], node: usize, neighbour: usize) -> bool {
    if neighbour == node {
        return true;
    }
    swap_status[neighbour]
        .compare_exchange(
            UNTOUCHED,
            SHOULD_NOT_SWAP,
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        != Err(SWAPPING)
}

/// Writes the cut weight of `solution` into `cost`.
///
/// Every stored relationship is visited once, so undirected edges are seen
/// from both endpoints and contribute half their weight each time.
pub(super) fn compute_cost<G: Graph>(
    workers: &WorkerPool,
    graph: &G,
    partitions: &[Partition],
    weighted: bool,
    solution: &CandidateSolution,
    cost: &AtomicCost,
) {
    let scale = if graph.is_undirected() { 0.5 } else { 1.0 };
    cost.set(0.0);
    workers.for_each_partition(partitions, |partition| {
        let mut cursor = graph.concurrent_copy();
        let mut local = 0.0;
        for node in partition.nodes() {
            let community = solution.get(node);
            cursor.for_each_relationship(node, DEFAULT_WEIGHT, |_, target, weight| {
                if solution.get(target) != community {
                    local += relationship_weight(weighted, weight);
                }
                true
            });
        }
        cost.add(local * scale);
    });
}
