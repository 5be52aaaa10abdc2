//! GRASP orchestrator.
//!
//! Each trial constructs a fresh randomized solution, improves it with
//! variable neighborhood search (or plain local search when VNS is
//! disabled) and keeps it if it beats the best solution so far.
//!
//! Logging levels:
//! - **INFO**: Solver start/end, new best solutions
//! - **DEBUG**: Per-trial and per-VNS summaries
//! - **TRACE**: Local search rounds

mod arena;
mod result;

use std::sync::Arc;

use cutforge_config::KCutConfig;
use cutforge_core::{Cardinalities, Graph, Maximize, Minimize, Objective, ObjectiveKind, Result};
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::construction::{ConstructionHeuristic, RandomPlacement};
use crate::localsearch::LocalSearch;
use crate::progress::{ProgressListener, ProgressTracker, Task};
use crate::scope::SolverScope;
use crate::statistics::SolveStatistics;
use crate::termination::{NeverTerminate, OrTermination, Termination, TimeTermination};
use crate::vns::VariableNeighborhoodSearch;
use crate::worker::WorkerPool;

pub use arena::SolutionArena;
pub use result::{CutResult, ImprovedSolution};

/// Approximate maximum (or minimum) k-cut over one graph.
///
/// # Example
///
/// ```
/// use cutforge_config::KCutConfig;
/// use cutforge_core::CsrGraph;
/// use cutforge_solver::ApproxMaxKCut;
///
/// let graph = CsrGraph::builder(4)
///     .undirected()
///     .edges([(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])
///     .build()
///     .unwrap();
/// let config = KCutConfig::new().with_k(2).with_iterations(10).with_random_seed(7);
///
/// let result = ApproxMaxKCut::new(&graph, config).compute().unwrap();
/// assert_eq!(result.cut_cost, 4.0);
/// assert_eq!(result.community_sizes(2), vec![2, 2]);
/// ```
pub struct ApproxMaxKCut<'g, G: Graph, C: ConstructionHeuristic = RandomPlacement> {
    graph: &'g G,
    config: KCutConfig,
    construction: C,
    termination: Option<Box<dyn Termination + 'g>>,
    progress: ProgressTracker,
    channel: Option<UnboundedSender<ImprovedSolution>>,
}

impl<'g, G: Graph> ApproxMaxKCut<'g, G> {
    /// Creates a solver with random construction and no external termination.
    ///
    /// The configuration is used as given; see [`KCutConfig::validate_for_node_count`].
    pub fn new(graph: &'g G, config: KCutConfig) -> Self {
        let construction = RandomPlacement::new(config.min_batch_size);
        Self {
            graph,
            config,
            construction,
            termination: None,
            progress: ProgressTracker::new(),
            channel: None,
        }
    }
}

impl<'g, G: Graph, C: ConstructionHeuristic> ApproxMaxKCut<'g, G, C> {
    /// Stops the run once `termination` fires.
    ///
    /// A time limit from the configuration still applies on top of it.
    pub fn with_termination(mut self, termination: impl Termination + 'g) -> Self {
        self.termination = Some(Box::new(termination));
        self
    }

    pub fn with_progress_listener(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.progress.add_listener(listener);
        self
    }

    /// Replaces the construction heuristic.
    pub fn with_construction<C2: ConstructionHeuristic>(
        self,
        construction: C2,
    ) -> ApproxMaxKCut<'g, G, C2> {
        ApproxMaxKCut {
            graph: self.graph,
            config: self.config,
            construction,
            termination: self.termination,
            progress: self.progress,
            channel: self.channel,
        }
    }

    /// Streams every new best solution through `sender`.
    pub fn with_channel(mut self, sender: UnboundedSender<ImprovedSolution>) -> Self {
        self.channel = Some(sender);
        self
    }

    pub fn config(&self) -> &KCutConfig {
        &self.config
    }

    /// Runs the trials and returns the best solution found.
    ///
    /// A candidate whose search was cut short by termination still competes
    /// with its exact cut weight. If termination fires before the first
    /// construction, the result is the all-zero assignment with the
    /// objective's worst cost.
    ///
    /// # Errors
    ///
    /// Returns [`CutForgeError::ThreadPool`](cutforge_core::CutForgeError::ThreadPool)
    /// if the worker threads cannot be started.
    pub fn compute(&self) -> Result<CutResult> {
        let node_count = self.graph.node_count();
        let objective = self.config.objective_kind();
        let seed = self
            .config
            .random_seed
            .unwrap_or_else(|| rand::rng().random());

        info!(
            event = "solve_start",
            node_count = node_count,
            relationship_count = self.graph.relationship_count(),
            k = self.config.k,
            iterations = self.config.iterations,
            vns_max_neighborhood_order = self.config.vns_max_neighborhood_order,
            objective = %objective,
            concurrency = self.config.concurrency,
            seed = seed,
        );

        if node_count == 0 {
            info!(event = "solve_end", cost = 0.0, trials = 0);
            return Ok(CutResult {
                candidate_solution: Vec::new(),
                cut_cost: 0.0,
                statistics: SolveStatistics::default(),
            });
        }

        let never = NeverTerminate;
        let external: &dyn Termination = self.termination.as_deref().unwrap_or(&never);
        let timed;
        let termination: &dyn Termination = match self.config.time_limit() {
            Some(limit) => {
                timed = OrTermination((TimeTermination::new(limit), external));
                &timed
            }
            None => external,
        };

        let workers = WorkerPool::new(self.config.concurrency)?;
        let mut scope =
            SolverScope::new(workers, seed, termination).with_progress(self.progress.clone());

        let result = match objective {
            ObjectiveKind::Maximize => self.compute_with(&mut scope, Maximize),
            ObjectiveKind::Minimize => self.compute_with(&mut scope, Minimize),
        };

        info!(
            event = "solve_end",
            cost = result.cut_cost,
            trials = result.statistics.trials_completed,
            best_improvements = result.statistics.best_improvements,
            duration_ms = result.statistics.total_duration.as_millis() as u64,
        );
        Ok(result)
    }

    fn compute_with<O: Objective>(&self, scope: &mut SolverScope<'_>, objective: O) -> CutResult {
        let graph = self.graph;
        let node_count = graph.node_count();
        let k = self.config.k as usize;
        let min_community_sizes = self.config.min_community_sizes();

        let mut arena = SolutionArena::new(node_count, objective.worst());
        let mut cardinalities = Cardinalities::new(k);
        let mut local_search = LocalSearch::new(
            graph,
            objective,
            k,
            min_community_sizes.clone(),
            self.config.concurrency,
            self.config.min_batch_size,
        );
        let mut vns = VariableNeighborhoodSearch::new(
            objective,
            node_count,
            k,
            self.config.vns_max_neighborhood_order,
            self.config.max_perturbation_retries,
            min_community_sizes.clone(),
        );

        scope.begin(Task::Grasp);
        for index in 1..=self.config.iterations {
            if scope.is_terminated() {
                break;
            }
            scope.begin(Task::Trial { index });

            let (solution, cost) = arena.current_mut();
            self.construction.construct(
                graph,
                scope,
                &min_community_sizes,
                solution,
                &cardinalities,
            );
            cost.set(objective.worst());

            if scope.is_terminated() {
                // The unsearched candidate still competes for best.
                local_search.evaluate(scope, solution, cost);
                let trial_cost = cost.get();
                if arena.promote_if_better(objective) {
                    self.report_best(scope, &arena, index, trial_cost);
                }
                scope.end(Task::Trial { index });
                break;
            }

            vns.compute(scope, &mut local_search, solution, cost, &mut cardinalities);
            let trial_cost = cost.get();

            let improved = arena.promote_if_better(objective);
            if improved {
                self.report_best(scope, &arena, index, trial_cost);
            }
            scope.statistics().record_trial();

            debug!(
                event = "trial_end",
                trial = index,
                cost = trial_cost,
                best_cost = arena.best_cost(),
                improved = improved,
            );
            scope.end(Task::Trial { index });
        }
        scope.end(Task::Grasp);

        let statistics = scope.statistics().snapshot(scope.elapsed());
        let (solution, cut_cost) = arena.into_best();
        CutResult {
            candidate_solution: solution.into_vec(),
            cut_cost,
            statistics,
        }
    }

    fn report_best(
        &self,
        scope: &SolverScope<'_>,
        arena: &SolutionArena,
        trial: usize,
        cost: f64,
    ) {
        scope.statistics().record_best_improvement();
        info!(event = "new_best", trial = trial, cost = cost);
        if let Some(sender) = &self.channel {
            // The receiver may have been dropped; the run continues regardless.
            let _ = sender.send(ImprovedSolution {
                trial,
                cost,
                solution: arena.best().to_vec(),
            });
        }
    }
}

impl<G: Graph, C: ConstructionHeuristic> std::fmt::Debug for ApproxMaxKCut<'_, G, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApproxMaxKCut")
            .field("config", &self.config)
            .field("construction", &self.construction)
            .field("termination", &self.termination)
            .field("progress", &self.progress)
            .finish()
    }
}
