//! Two-slot solution storage for the GRASP loop.

use cutforge_core::{AtomicCost, CandidateSolution, Objective};

/// The "current" and "best" candidate solutions of a run.
///
/// Each trial overwrites the current slot. Promotion exchanges the slot
/// indices, so the backing buffers are allocated once and never copied.
#[derive(Debug)]
pub struct SolutionArena {
    solutions: [CandidateSolution; 2],
    costs: [AtomicCost; 2],
    current: usize,
    best: usize,
}

impl SolutionArena {
    /// Allocates both slots; their costs start at `worst`.
    pub fn new(node_count: usize, worst: f64) -> Self {
        Self {
            solutions: [
                CandidateSolution::new(node_count),
                CandidateSolution::new(node_count),
            ],
            costs: [AtomicCost::new(worst), AtomicCost::new(worst)],
            current: 0,
            best: 1,
        }
    }

    /// The slot the next trial writes into.
    pub fn current_mut(&mut self) -> (&mut CandidateSolution, &AtomicCost) {
        let index = self.current;
        (&mut self.solutions[index], &self.costs[index])
    }

    pub fn best(&self) -> &CandidateSolution {
        &self.solutions[self.best]
    }

    pub fn best_cost(&self) -> f64 {
        self.costs[self.best].get()
    }

    /// Makes the current slot the best one if its cost is strictly better.
    ///
    /// Equal costs keep the earlier best. Returns true on promotion.
    pub fn promote_if_better<O: Objective>(&mut self, objective: O) -> bool {
        let candidate = self.costs[self.current].get();
        if objective.better_than(candidate, self.best_cost()) {
            std::mem::swap(&mut self.current, &mut self.best);
            true
        } else {
            false
        }
    }

    /// Consumes the arena, returning the best solution and its cost.
    pub fn into_best(self) -> (CandidateSolution, f64) {
        let cost = self.best_cost();
        let [first, second] = self.solutions;
        let solution = if self.best == 0 { first } else { second };
        (solution, cost)
    }
}
