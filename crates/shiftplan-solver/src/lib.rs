//! Shiftplan solver engine.
//!
//! This crate turns a demand vector and a pattern set into a covering
//! integer program and solves it:
//! - Coverage model (`model`)
//! - Construction heuristic, exhaustive search and parallel branch and
//!   bound (`strategy`)
//! - Termination conditions and the shared search scope
//! - The [`Solver`] entry point wiring configuration, termination and
//!   logging together

pub mod incumbent;
pub mod model;
pub mod result;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod strategy;
pub mod termination;

pub use incumbent::{Candidate, SharedIncumbent, CONSTRUCTION_RANK};
pub use model::{build_model, CoverageConstraint, CoverageModel};
pub use result::{SolveOutcome, SolveStatus, StrategyKind};
pub use scope::{NodeTicker, SearchScope, POLL_INTERVAL};
pub use solver::{solve, Solver};
pub use stats::SolverStats;
pub use strategy::{
    construct, estimate_search_space, multiset_count, BranchAndBound, CoverageSolver,
    ExhaustiveSearch,
};
pub use termination::{
    NoTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};
