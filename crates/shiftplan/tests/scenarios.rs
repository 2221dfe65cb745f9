//! End-to-end planning scenarios.

use shiftplan::prelude::*;
use shiftplan::{MaxHoursPolicy, StrategyKind, ThreadCount};
use shiftplan_config::MaxHoursPolicyConfig;
use shiftplan_test::Scenario;

fn input_for(scenario: &Scenario, timeout_sec: f64) -> PlanningInput {
    PlanningInput::new(
        scenario.min_hours,
        scenario.max_hours,
        timeout_sec,
        scenario.demand.iter().map(|&d| i64::from(d)).collect(),
    )
}

/// Each row is one contiguous run with length in `[min, max]`.
fn assert_valid_rows(rows: &[Vec<u8>], horizon: usize, min: usize, max: usize) {
    for row in rows {
        assert_eq!(row.len(), horizon);
        let pattern = ShiftPattern::from_bits(row).unwrap();
        assert!((min..=max).contains(&pattern.hours()), "{row:?}");
    }
}

fn column_sums(rows: &[Vec<u8>], horizon: usize) -> Vec<u32> {
    let mut sums = vec![0u32; horizon];
    for row in rows {
        for (t, &bit) in row.iter().enumerate() {
            sums[t] += u32::from(bit);
        }
    }
    sums
}

#[test]
fn test_peak_period_from_json() {
    let json = r#"{
        "config": {"min_shift_hours": 4, "max_shift_hours": 10, "timeout_sec": 15},
        "timeslots": ["06:00", "07:00", "08:00", "09:00", "10:00", "11:00",
                      "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"],
        "demand": [0, 1, 1, 1, 1, 5, 5, 5, 5, 5, 5, 1],
        "solution": {"shifts": []}
    }"#;
    let input: PlanningInput = serde_json::from_str(json).unwrap();
    let output = plan(&input, &SolverConfig::default()).unwrap();

    assert_eq!(output.outcome.status, SolveStatus::Optimal);
    assert_eq!(output.report.allocated_hours, 35);
    assert_eq!(output.report.total_demand, 35);
    assert_eq!(output.report.oversupply, 0);

    let rows = &output.record.solution.shifts;
    assert_valid_rows(rows, 12, 4, 10);
    assert_eq!(column_sums(rows, 12), output.report.coverage);
    assert_eq!(output.report.coverage, output.report.demand);

    let value = serde_json::to_value(&output.record).unwrap();
    assert_eq!(value["timeslots"][0], "06:00");
    assert_eq!(value["solution"]["shifts"].as_array().unwrap().len(), rows.len());
}

#[test]
fn test_zero_demand_schedules_nobody() {
    let output = plan(&input_for(&Scenario::idle_day(), 1.0), &SolverConfig::default()).unwrap();
    assert!(output.record.solution.shifts.is_empty());
    assert_eq!(output.report.allocated_hours, 0);
    assert!(output.outcome.is_optimal());
}

#[test]
fn test_single_long_shift() {
    let output = plan(
        &input_for(&Scenario::single_long_shift(), 1.0),
        &SolverConfig::default(),
    )
    .unwrap();
    assert_eq!(output.record.solution.shifts, vec![vec![1, 1, 1, 1, 1]]);
    assert_eq!(output.report.allocated_hours, 5);
}

#[test]
fn test_known_optima_for_every_strategy() {
    for strategy in [
        SearchStrategy::Auto,
        SearchStrategy::Exhaustive,
        SearchStrategy::BranchAndBound,
    ] {
        let config = SolverConfig::default().with_strategy(strategy);
        for scenario in Scenario::small() {
            let output = plan(&input_for(&scenario, 10.0), &config).unwrap();
            let rows = &output.record.solution.shifts;
            assert_valid_rows(rows, scenario.horizon(), scenario.min_hours, scenario.max_hours);
            assert!(output
                .report
                .coverage
                .iter()
                .zip(scenario.demand.iter())
                .all(|(c, d)| c >= d));
            if let Some(optimum) = scenario.optimum {
                assert_eq!(output.report.allocated_hours, optimum, "{}", scenario.name);
            }
        }
    }
}

#[test]
fn test_more_demand_never_costs_less() {
    let base = Scenario::twin_peaks();
    let config = SolverConfig::default();
    let base_hours = plan(&input_for(&base, 10.0), &config)
        .unwrap()
        .report
        .allocated_hours;

    for t in 0..base.horizon() {
        let mut input = input_for(&base, 10.0);
        input.demand[t] += 1;
        let hours = plan(&input, &config).unwrap().report.allocated_hours;
        assert!(hours >= base_hours, "timeslot {t}: {hours} < {base_hours}");
    }
}

#[test]
fn test_repeated_solves_are_identical() {
    let input = input_for(&Scenario::irregular(), 10.0);
    let config = SolverConfig::default().with_strategy(SearchStrategy::BranchAndBound);
    let first = plan(&input, &config).unwrap();
    for threads in [ThreadCount::None, ThreadCount::Count(3), ThreadCount::Auto] {
        let again = plan(&input, &config.clone().with_thread_count(threads)).unwrap();
        assert_eq!(again.record.solution, first.record.solution);
    }
}

#[test]
fn test_repeated_exhaustive_solves_are_identical() {
    let config = SolverConfig::default().with_strategy(SearchStrategy::Exhaustive);
    for scenario in [Scenario::irregular(), Scenario::twin_peaks(), Scenario::valley()] {
        let input = input_for(&scenario, 10.0);
        let first = plan(&input, &config).unwrap();
        let again = plan(&input, &config).unwrap();

        assert!(first.outcome.is_optimal(), "{}", scenario.name);
        assert_eq!(again.outcome.strategy, StrategyKind::Exhaustive);
        assert_eq!(again.outcome.objective(), first.outcome.objective());
        assert_eq!(again.record.solution, first.record.solution, "{}", scenario.name);
    }
}

#[test]
fn test_huge_demand_respects_timeout() {
    let input = PlanningInput::new(4, 10, 0.2, vec![3_000_000; 12]);
    let started = std::time::Instant::now();
    let output = plan(&input, &SolverConfig::default()).unwrap();

    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert!(output.report.allocated_hours >= output.report.total_demand);
    assert!(output
        .report
        .coverage
        .iter()
        .zip(&output.report.demand)
        .all(|(c, d)| c >= d));
}

#[test]
fn test_max_hours_beyond_horizon() {
    let input = PlanningInput::new(4, 10, 1.0, vec![1; 5]);

    let clamped = plan(&input, &SolverConfig::default()).unwrap();
    assert_eq!(clamped.report.allocated_hours, 5);

    let mut config = SolverConfig::default();
    config.shift.max_hours_policy = MaxHoursPolicyConfig::Reject;
    assert_eq!(
        MaxHoursPolicy::from(config.shift.max_hours_policy),
        MaxHoursPolicy::Reject
    );
    let err = plan(&input, &config).unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn test_invalid_records_rejected() {
    let config = SolverConfig::default();

    // Minimum shift longer than the horizon.
    let err = plan(&PlanningInput::new(4, 10, 1.0, vec![1; 3]), &config).unwrap_err();
    assert!(err.is_invalid_configuration());

    // Minimum above maximum.
    let err = plan(&PlanningInput::new(6, 5, 1.0, vec![1; 8]), &config).unwrap_err();
    assert!(err.is_invalid_configuration());

    // Negative demand.
    let err = plan(&PlanningInput::new(2, 4, 1.0, vec![1, -1, 1]), &config).unwrap_err();
    assert!(err.is_invalid_configuration());

    // Label count differs from demand length.
    let mut input = PlanningInput::new(2, 4, 1.0, vec![1; 4]);
    input.timeslots.pop();
    let err = plan(&input, &config).unwrap_err();
    assert!(err.is_invalid_configuration());

    // Empty horizon.
    let err = plan(&PlanningInput::new(1, 1, 1.0, vec![]), &config).unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn test_missing_solution_field_defaults_to_empty() {
    let json = r#"{
        "config": {"min_shift_hours": 2, "max_shift_hours": 3, "timeout_sec": 0.5},
        "timeslots": [0, 1, 2],
        "demand": [0, 2, 2]
    }"#;
    let input: PlanningInput = serde_json::from_str(json).unwrap();
    assert!(input.solution.shifts.is_empty());

    let output = plan(&input, &SolverConfig::default()).unwrap();
    assert_eq!(output.record.solution.shifts, vec![vec![0, 1, 1], vec![0, 1, 1]]);
}
