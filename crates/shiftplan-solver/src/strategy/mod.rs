//! Search strategies for the coverage model.
//!
//! Every strategy starts from the construction heuristic's assignment, so a
//! feasible answer exists from the first node on. Strategies differ in how
//! they prove (or improve toward) optimality:
//!
//! - [`ExhaustiveSearch`]: enumerates driver multisets of increasing size.
//!   Exact, and only practical for small instances.
//! - [`BranchAndBound`]: assigns per-pattern counts with demand-derived
//!   bounds and explores independent subtrees in parallel.

mod branch_and_bound;
mod construction;
mod exhaustive;

use std::fmt::Debug;

use shiftplan_core::{Assignment, Result};

use crate::incumbent::CONSTRUCTION_RANK;
use crate::model::CoverageModel;
use crate::result::{SolveOutcome, SolveStatus, StrategyKind};
use crate::scope::SearchScope;
use crate::stats::SolverStats;

pub use branch_and_bound::BranchAndBound;
pub use construction::construct;
pub use exhaustive::{estimate_search_space, multiset_count, ExhaustiveSearch};

/// A strategy that solves a [`CoverageModel`] within a [`SearchScope`].
pub trait CoverageSolver: Send + Sync + Debug {
    fn strategy(&self) -> StrategyKind;

    /// Returns the cheapest assignment found before the scope terminated.
    ///
    /// # Errors
    ///
    /// `Infeasible` if a demanded timeslot has no covering pattern.
    fn solve(&self, model: &CoverageModel, scope: &SearchScope<'_>) -> Result<SolveOutcome>;
}

/// Shared preamble of every strategy.
///
/// Returns `Ok(None)` once a warm start is in the scope, or the finished
/// outcome when there is nothing to search. An incumbent installed by the
/// caller is kept and the construction heuristic is skipped.
pub(crate) fn warm_start(
    model: &CoverageModel,
    scope: &SearchScope<'_>,
    strategy: StrategyKind,
) -> Result<Option<SolveOutcome>> {
    model.check_feasible()?;
    if model.demand().is_zero() {
        return Ok(Some(SolveOutcome {
            status: SolveStatus::Optimal,
            strategy,
            assignment: Assignment::empty(model.horizon()),
            stats: SolverStats::default(),
        }));
    }

    if scope.incumbent().upper_bound() == u64::MAX {
        let counts = construct(model)?;
        scope.offer(CONSTRUCTION_RANK, model.assignment(&counts)?);
    }
    Ok(None)
}

/// Reads the incumbent back out of the scope.
pub(crate) fn finish(
    model: &CoverageModel,
    scope: &SearchScope<'_>,
    strategy: StrategyKind,
    complete: bool,
    mut stats: SolverStats,
) -> Result<SolveOutcome> {
    let assignment = match scope.incumbent().snapshot() {
        Some(best) => best.assignment,
        None => model.assignment(&construct(model)?)?,
    };
    stats.elapsed = scope.elapsed();
    Ok(SolveOutcome {
        status: if complete {
            SolveStatus::Optimal
        } else {
            SolveStatus::TimedOut
        },
        strategy,
        assignment,
        stats,
    })
}

#[cfg(test)]
mod tests;
