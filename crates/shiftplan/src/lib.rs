//! Shiftplan - driver shift coverage planning in Rust
//!
//! Turns an hourly driver demand forecast into the set of contiguous
//! shifts with the fewest total driver hours that covers it.
//!
//! # Example
//!
//! ```rust
//! use shiftplan::prelude::*;
//!
//! let input = PlanningInput::new(4, 10, 5.0, vec![0, 1, 1, 1, 1, 5, 5, 5, 5, 5, 5, 1]);
//! let output = plan(&input, &SolverConfig::default()).unwrap();
//!
//! assert_eq!(output.report.allocated_hours, 35);
//! assert_eq!(output.report.oversupply, 0);
//! assert!(output.record.solution.shifts.iter().all(|row| row.len() == 12));
//! ```

pub mod planner;
pub mod record;

pub use planner::{plan, plan_with_improvements, OversupplyReport, PlanningOutput};

// Data model
pub use shiftplan_core::{
    expand, generate_patterns, generate_patterns_with_policy, Assignment, Demand,
    MaxHoursPolicy, PatternSet, Result, ShiftPattern, ShiftPlanError, Solution,
};

// Configuration
pub use shiftplan_config::{SearchStrategy, SolverConfig, ThreadCount};

// Solver
pub use shiftplan_solver::{
    build_model, solve, CoverageModel, SolveOutcome, SolveStatus, Solver, SolverStats,
    StrategyKind,
};

#[cfg(feature = "console")]
pub use shiftplan_console::init as init_console;

pub mod prelude {
    pub use super::record::{PlanningInput, SolutionRecord, TimeslotLabel};
    pub use super::{plan, OversupplyReport, PlanningOutput};
    pub use super::{Demand, ShiftPattern, ShiftPlanError, Solution};
    pub use super::{SearchStrategy, SolveStatus, Solver, SolverConfig};
}
