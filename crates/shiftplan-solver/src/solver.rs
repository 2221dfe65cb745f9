//! Solver entry point: strategy selection, termination wiring and logging.

use std::num::NonZeroUsize;
use std::time::Duration;

use shiftplan_config::{SearchStrategy, SolverConfig};
use shiftplan_core::{generate_patterns_with_policy, Assignment, Demand, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::incumbent::CONSTRUCTION_RANK;
use crate::model::{build_model, CoverageModel};
use crate::result::{SolveOutcome, StrategyKind};
use crate::scope::SearchScope;
use crate::strategy::{
    construct, estimate_search_space, BranchAndBound, CoverageSolver, ExhaustiveSearch,
};
use crate::termination::{NodeCountTermination, OrTermination, TimeTermination};

/// Solves coverage models according to a [`SolverConfig`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shiftplan_config::SolverConfig;
/// use shiftplan_core::Demand;
/// use shiftplan_solver::Solver;
///
/// let solver = Solver::new(SolverConfig::new().with_time_limit(Duration::from_secs(5)));
/// let outcome = solver.solve_demand(&Demand::new(vec![1, 1, 1, 1, 1])).unwrap();
///
/// assert!(outcome.is_optimal());
/// assert_eq!(outcome.objective(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    sender: Option<mpsc::UnboundedSender<(u64, Assignment)>>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            sender: None,
        }
    }

    /// Streams every improving assignment with its objective.
    pub fn with_improvement_sender(
        mut self,
        sender: mpsc::UnboundedSender<(u64, Assignment)>,
    ) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Generates patterns from the configured shift bounds and solves.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the bounds do not fit the horizon,
    /// `Infeasible` if some demand cannot be covered.
    pub fn solve_demand(&self, demand: &Demand) -> Result<SolveOutcome> {
        let shift = &self.config.shift;
        let patterns = generate_patterns_with_policy(
            demand.len(),
            shift.min_hours,
            shift.max_hours,
            shift.max_hours_policy.into(),
        )?;
        let model = build_model(&patterns, demand)?;
        self.solve(&model)
    }

    /// Solves within the configured time limit.
    pub fn solve(&self, model: &CoverageModel) -> Result<SolveOutcome> {
        self.solve_with_deadline(model, self.config.time_limit())
    }

    /// Solves within `deadline`, returning the best assignment found.
    ///
    /// The deadline covers strategy selection and the construction
    /// heuristic as well as the search.
    pub fn solve_with_deadline(
        &self,
        model: &CoverageModel,
        deadline: Duration,
    ) -> Result<SolveOutcome> {
        let threads = self.config.search.thread_count.resolve(
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        );

        let time = TimeTermination::new(deadline);
        let mut scope = match self.config.node_count_limit() {
            Some(limit) => {
                SearchScope::new(OrTermination((time, NodeCountTermination::new(limit))))
            }
            None => SearchScope::new(time),
        }
        .with_thread_count(threads);
        if let Some(sender) = &self.sender {
            scope = scope.with_improvement_sender(sender.clone());
        }

        let warm_start = construction(model)?;
        let (kind, search_space) = self.choose(model, warm_start.as_ref());

        info!(
            event = "solve_start",
            patterns = model.variable_count(),
            timeslots = model.horizon(),
            peak_demand = model.demand().peak(),
            strategy = %kind,
            threads,
            time_limit_ms = deadline.as_millis() as u64,
        );

        if let Some(assignment) = warm_start {
            scope.offer(CONSTRUCTION_RANK, assignment);
        }
        let mut outcome = strategy_for(kind).solve(model, &scope)?;
        outcome.stats.search_space = search_space;

        info!(
            event = "solve_end",
            status = ?outcome.status,
            objective = outcome.objective(),
            drivers = outcome.driver_count(),
            nodes = outcome.stats.nodes_explored,
            pruned = outcome.stats.nodes_pruned,
            duration_ms = outcome.stats.elapsed.as_millis() as u64,
        );
        Ok(outcome)
    }

    /// Strategy the configuration picks for `model`.
    ///
    /// # Errors
    ///
    /// `Infeasible` if some demand cannot be covered.
    pub fn select_strategy(&self, model: &CoverageModel) -> Result<StrategyKind> {
        let warm_start = construction(model)?;
        Ok(self.choose(model, warm_start.as_ref()).0)
    }

    fn choose(
        &self,
        model: &CoverageModel,
        warm_start: Option<&Assignment>,
    ) -> (StrategyKind, Option<u128>) {
        let search_space = exhaustive_search_space(model, warm_start);
        let kind = match self.config.search.strategy {
            SearchStrategy::Exhaustive => StrategyKind::Exhaustive,
            SearchStrategy::BranchAndBound => StrategyKind::BranchAndBound,
            SearchStrategy::Auto => {
                let limit = u128::from(self.config.search.exhaustive_search_limit);
                if search_space <= limit {
                    StrategyKind::Exhaustive
                } else {
                    StrategyKind::BranchAndBound
                }
            }
        };
        debug!(
            event = "strategy",
            strategy = %kind,
            configured = ?self.config.search.strategy,
            search_space = %search_space,
        );
        (kind, Some(search_space))
    }
}

/// Solves `model` with the default configuration within `deadline`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shiftplan_core::{generate_patterns, Demand};
/// use shiftplan_solver::{build_model, solve};
///
/// let patterns = generate_patterns(5, 4, 10).unwrap();
/// let model = build_model(&patterns, &Demand::new(vec![0; 5])).unwrap();
///
/// let outcome = solve(&model, Duration::from_secs(1)).unwrap();
/// assert!(outcome.assignment.is_empty());
/// ```
pub fn solve(model: &CoverageModel, deadline: Duration) -> Result<SolveOutcome> {
    Solver::default().solve_with_deadline(model, deadline)
}

fn strategy_for(kind: StrategyKind) -> Box<dyn CoverageSolver> {
    match kind {
        StrategyKind::Exhaustive => Box::new(ExhaustiveSearch::new()),
        StrategyKind::BranchAndBound => Box::new(BranchAndBound::new()),
    }
}

/// Construction heuristic's assignment, `None` when there is no demand.
fn construction(model: &CoverageModel) -> Result<Option<Assignment>> {
    model.check_feasible()?;
    if model.demand().is_zero() {
        return Ok(None);
    }
    model.assignment(&construct(model)?).map(Some)
}

/// Multisets the exhaustive strategy may visit, capped by the drivers the
/// construction heuristic's objective leaves room for.
fn exhaustive_search_space(model: &CoverageModel, warm_start: Option<&Assignment>) -> u128 {
    let Some(greedy) = warm_start else {
        return 1;
    };
    let min_hours = model.min_hours().unwrap_or(1);
    let cap = model.demand().total().min(greedy.objective() / min_hours);
    estimate_search_space(model, cap)
}
