//! Outcome of a solve.

use std::fmt;

use shiftplan_core::{expand, Assignment, Solution};

use crate::stats::SolverStats;

/// Whether the returned assignment is proven optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The search space was exhausted; no cheaper assignment exists.
    Optimal,
    /// The deadline expired; the assignment is the best one found.
    TimedOut,
}

/// Strategy that produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Exhaustive,
    BranchAndBound,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Exhaustive => f.write_str("exhaustive"),
            StrategyKind::BranchAndBound => f.write_str("branch_and_bound"),
        }
    }
}

/// Feasible assignment plus how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub strategy: StrategyKind,
    pub assignment: Assignment,
    pub stats: SolverStats,
}

impl SolveOutcome {
    /// Total driver hours.
    #[inline]
    pub fn objective(&self) -> u64 {
        self.assignment.objective()
    }

    #[inline]
    pub fn driver_count(&self) -> u64 {
        self.assignment.driver_count()
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    #[inline]
    pub fn is_timed_out(&self) -> bool {
        self.status == SolveStatus::TimedOut
    }

    /// One row per driver.
    pub fn solution(&self) -> Solution {
        expand(&self.assignment)
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.status {
            SolveStatus::Optimal => "optimal",
            SolveStatus::TimedOut => "timed out",
        };
        write!(
            f,
            "{} ({}): {} hours over {} drivers",
            status,
            self.strategy,
            self.objective(),
            self.driver_count()
        )
    }
}
