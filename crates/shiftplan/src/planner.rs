//! Runs a planning record through the solver.

use std::fmt;
use std::time::Duration;

use shiftplan_config::SolverConfig;
use shiftplan_core::{generate_patterns_with_policy, Assignment, Demand, Result, ShiftPlanError};
use shiftplan_solver::{build_model, SolveOutcome, Solver};
use tokio::sync::mpsc;
use tracing::info;

use crate::record::{PlanningInput, SolutionRecord};

/// Solved record plus the solver outcome and its oversupply report.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningOutput {
    /// The input record with `solution.shifts` filled in.
    pub record: PlanningInput,
    pub outcome: SolveOutcome,
    pub report: OversupplyReport,
}

/// Hours demanded against hours scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OversupplyReport {
    pub total_demand: u64,
    pub allocated_hours: u64,
    /// `allocated_hours - total_demand`.
    pub oversupply: u64,
    /// Scheduled drivers per timeslot.
    pub coverage: Vec<u32>,
    pub demand: Vec<u32>,
}

impl OversupplyReport {
    fn new(outcome: &SolveOutcome, demand: &Demand) -> Self {
        Self {
            total_demand: demand.total(),
            allocated_hours: outcome.objective(),
            oversupply: outcome.assignment.oversupply(demand),
            coverage: outcome.assignment.coverage(),
            demand: demand.to_vec(),
        }
    }
}

impl fmt::Display for OversupplyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total demand hours: {}", self.total_demand)?;
        writeln!(f, "Allocated driver hours: {}", self.allocated_hours)?;
        writeln!(f, "Drivers per timeslot: {:?}", self.coverage)?;
        writeln!(f, "Forecasted demand:    {:?}", self.demand)?;
        write!(
            f,
            "Oversupply hours: {} - {} = {}",
            self.allocated_hours, self.total_demand, self.oversupply
        )
    }
}

/// Solves one planning record.
///
/// The record's shift bounds and `timeout_sec` override those of `config`;
/// the remaining settings (strategy, threads, node limit, max-hours policy)
/// come from `config`.
///
/// # Errors
///
/// `InvalidConfiguration` for a malformed record or shift bounds that do
/// not fit the horizon, `Infeasible` if some demand cannot be covered.
pub fn plan(input: &PlanningInput, config: &SolverConfig) -> Result<PlanningOutput> {
    plan_inner(input, config, None)
}

/// Same as [`plan`], streaming every improving assignment through `sender`
/// with its total hours.
pub fn plan_with_improvements(
    input: &PlanningInput,
    config: &SolverConfig,
    sender: mpsc::UnboundedSender<(u64, Assignment)>,
) -> Result<PlanningOutput> {
    plan_inner(input, config, Some(sender))
}

fn plan_inner(
    input: &PlanningInput,
    config: &SolverConfig,
    sender: Option<mpsc::UnboundedSender<(u64, Assignment)>>,
) -> Result<PlanningOutput> {
    #[cfg(feature = "console")]
    shiftplan_console::init();

    if input.timeslots.len() != input.demand.len() {
        return Err(ShiftPlanError::InvalidConfiguration(format!(
            "{} timeslots but {} demand values",
            input.timeslots.len(),
            input.demand.len()
        )));
    }
    let timeout = input.config.timeout_sec;
    if !(timeout.is_finite() && timeout > 0.0) {
        return Err(ShiftPlanError::InvalidConfiguration(format!(
            "timeout_sec must be a positive number, got {timeout}"
        )));
    }
    let demand = Demand::try_from_signed(&input.demand)?;

    let config = config
        .clone()
        .with_shift_hours(input.config.min_shift_hours, input.config.max_shift_hours);
    let patterns = generate_patterns_with_policy(
        demand.len(),
        config.shift.min_hours,
        config.shift.max_hours,
        config.shift.max_hours_policy.into(),
    )?;
    let model = build_model(&patterns, &demand)?;

    let mut solver = Solver::new(config);
    if let Some(sender) = sender {
        solver = solver.with_improvement_sender(sender);
    }
    // Timeouts beyond what a Duration holds mean no practical limit.
    let deadline = Duration::try_from_secs_f64(timeout).unwrap_or(Duration::MAX);
    let outcome = solver.solve_with_deadline(&model, deadline)?;
    let report = OversupplyReport::new(&outcome, &demand);
    info!(
        event = "plan",
        total_demand = report.total_demand,
        allocated_hours = report.allocated_hours,
        oversupply = report.oversupply,
    );

    let mut record = input.clone();
    record.solution = SolutionRecord {
        shifts: outcome.solution().to_rows(),
    };
    Ok(PlanningOutput {
        record,
        outcome,
        report,
    })
}
