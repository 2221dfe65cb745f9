//! Cross-checks between the strategies and the brute-force optimum.

use shiftplan_core::{Demand, PatternSet, ShiftPattern};
use shiftplan_test::{brute_force_optimum, Scenario};

use super::*;
use crate::model::build_model;
use crate::termination::NoTermination;

fn model_for(scenario: &Scenario) -> CoverageModel {
    build_model(&scenario.patterns(), &scenario.demand).unwrap()
}

fn strategies() -> [Box<dyn CoverageSolver>; 2] {
    [Box::new(ExhaustiveSearch), Box::new(BranchAndBound)]
}

#[test]
fn test_strategies_match_brute_force() {
    for scenario in Scenario::small() {
        let model = model_for(&scenario);
        let expected = brute_force_optimum(&scenario.patterns(), &scenario.demand).unwrap();
        if let Some(optimum) = scenario.optimum {
            assert_eq!(expected, optimum, "{}", scenario.name);
        }

        for solver in strategies() {
            let scope = SearchScope::new(NoTermination).with_thread_count(2);
            let outcome = solver.solve(&model, &scope).unwrap();
            assert!(outcome.is_optimal(), "{} {}", scenario.name, solver.strategy());
            assert_eq!(outcome.strategy, solver.strategy());
            assert_eq!(outcome.objective(), expected, "{} {}", scenario.name, solver.strategy());
            assert!(outcome.assignment.covers(&scenario.demand));
        }
    }
}

#[test]
fn test_strategies_agree_on_irregular_demand() {
    let scenario = Scenario::irregular();
    let model = model_for(&scenario);
    let objectives: Vec<u64> = strategies()
        .iter()
        .map(|solver| {
            let scope = SearchScope::new(NoTermination);
            solver.solve(&model, &scope).unwrap().objective()
        })
        .collect();
    assert_eq!(objectives[0], objectives[1]);
    assert!(objectives[0] >= scenario.demand.total());
}

#[test]
fn test_construction_never_beats_search() {
    for scenario in Scenario::small() {
        let model = model_for(&scenario);
        let greedy = model.objective(&construct(&model).unwrap());
        let scope = SearchScope::new(NoTermination);
        let outcome = BranchAndBound.solve(&model, &scope).unwrap();
        assert!(outcome.objective() <= greedy, "{}", scenario.name);
    }
}

#[test]
fn test_uncoverable_demand_is_infeasible() {
    let patterns = PatternSet::from_patterns(5, [ShiftPattern::new(5, 0, 2).unwrap()]).unwrap();
    let model = build_model(&patterns, &Demand::new(vec![0, 0, 1, 0, 0])).unwrap();
    for solver in strategies() {
        let scope = SearchScope::new(NoTermination);
        let err = solver.solve(&model, &scope).unwrap_err();
        assert!(err.is_infeasible());
    }
}

#[test]
fn test_streamed_improvements_never_increase() {
    let scenario = Scenario::peak_period();
    let model = model_for(&scenario);
    let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
    let scope = SearchScope::new(NoTermination)
        .with_thread_count(1)
        .with_improvement_sender(sender);

    let outcome = BranchAndBound.solve(&model, &scope).unwrap();
    let mut objectives = Vec::new();
    while let Ok((objective, assignment)) = receiver.try_recv() {
        assert_eq!(assignment.objective(), objective);
        objectives.push(objective);
    }

    assert!(!objectives.is_empty());
    assert!(objectives.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(objectives.last(), Some(&outcome.objective()));
    assert_eq!(outcome.objective(), 35);
}
