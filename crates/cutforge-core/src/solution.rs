//! Shared buffers mutated by the parallel phases.
//!
//! All mutation goes through per-cell atomics. Relaxed ordering is enough:
//! the fork-join barrier between phases publishes every write before the
//! next phase starts.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Community id of a node, always in `0..k`.
pub type CommunityId = u32;

/// Dense node -> community assignment.
#[derive(Debug)]
pub struct CandidateSolution {
    communities: Vec<AtomicU32>,
}

impl CandidateSolution {
    /// Creates an assignment of `node_count` nodes, all in community 0.
    pub fn new(node_count: usize) -> Self {
        Self {
            communities: (0..node_count).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    /// Creates an assignment from explicit community ids.
    pub fn from_communities(communities: &[CommunityId]) -> Self {
        Self {
            communities: communities.iter().map(|&c| AtomicU32::new(c)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    #[inline]
    pub fn get(&self, node: usize) -> CommunityId {
        self.communities[node].load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, node: usize, community: CommunityId) {
        self.communities[node].store(community, Ordering::Relaxed);
    }

    /// Overwrites this assignment with `source`.
    pub fn copy_from(&self, source: &CandidateSolution) {
        debug_assert_eq!(self.len(), source.len());
        for (target, value) in self.communities.iter().zip(&source.communities) {
            target.store(value.load(Ordering::Relaxed), Ordering::Relaxed);
        }
    }

    /// Snapshot of the assignment.
    pub fn to_vec(&self) -> Vec<CommunityId> {
        self.communities
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }

    /// Consumes the buffer into plain community ids.
    pub fn into_vec(self) -> Vec<CommunityId> {
        self.communities
            .into_iter()
            .map(AtomicU32::into_inner)
            .collect()
    }
}

/// Live node count per community.
///
/// May be transiently out of sync with the assignment while a swap phase
/// is in flight; consistent again at every barrier.
#[derive(Debug)]
pub struct Cardinalities {
    counts: Vec<AtomicU64>,
}

impl Cardinalities {
    /// Creates `k` zeroed counters.
    pub fn new(k: usize) -> Self {
        Self {
            counts: (0..k).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    /// Number of communities.
    pub fn k(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn get(&self, community: CommunityId) -> u64 {
        self.counts[community as usize].load(Ordering::Relaxed)
    }

    #[inline]
    pub fn increment(&self, community: CommunityId) {
        self.counts[community as usize].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn decrement(&self, community: CommunityId) {
        self.counts[community as usize].fetch_sub(1, Ordering::Relaxed);
    }

    pub fn add(&self, community: CommunityId, delta: u64) {
        self.counts[community as usize].fetch_add(delta, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        for count in &self.counts {
            count.store(0, Ordering::Relaxed);
        }
    }

    pub fn copy_from(&self, source: &Cardinalities) {
        debug_assert!(self.k() >= source.k());
        for (target, value) in self.counts.iter().zip(&source.counts) {
            target.store(value.load(Ordering::Relaxed), Ordering::Relaxed);
        }
    }

    /// Sum over all communities; equals node count at quiescent points.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    pub fn to_vec(&self) -> Vec<u64> {
        self.counts
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }
}

/// Shared `f64` cell holding the cost of one candidate solution.
#[derive(Debug)]
pub struct AtomicCost {
    bits: AtomicU64,
}

impl AtomicCost {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Atomically adds `delta` via compare-and-swap.
    pub fn add(&self, delta: f64) {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self.bits.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_candidate_solution_roundtrip() {
        let solution = CandidateSolution::from_communities(&[0, 2, 1]);
        assert_eq!(solution.len(), 3);
        solution.set(0, 1);
        assert_eq!(solution.get(0), 1);
        assert_eq!(solution.into_vec(), vec![1, 2, 1]);
    }

    #[test]
    fn test_candidate_solution_copy_from() {
        let source = CandidateSolution::from_communities(&[1, 1, 0]);
        let target = CandidateSolution::new(3);
        target.copy_from(&source);
        assert_eq!(target.to_vec(), vec![1, 1, 0]);
    }

    #[test]
    fn test_cardinalities_track_moves() {
        let cardinalities = Cardinalities::new(3);
        cardinalities.add(0, 4);
        cardinalities.decrement(0);
        cardinalities.increment(2);

        assert_eq!(cardinalities.to_vec(), vec![3, 0, 1]);
        assert_eq!(cardinalities.total(), 4);

        let copy = Cardinalities::new(3);
        copy.copy_from(&cardinalities);
        assert_eq!(copy.to_vec(), vec![3, 0, 1]);

        cardinalities.reset();
        assert_eq!(cardinalities.total(), 0);
    }

    #[test]
    fn test_atomic_cost_set_and_add() {
        let cost = AtomicCost::new(f64::NEG_INFINITY);
        cost.set(0.0);
        cost.add(1.5);
        cost.add(2.0);
        assert_eq!(cost.get(), 3.5);
    }

    #[test]
    fn test_atomic_cost_concurrent_adds() {
        let cost = Arc::new(AtomicCost::new(0.0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cost = Arc::clone(&cost);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        cost.add(1.0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cost.get(), 4000.0);
    }
}
