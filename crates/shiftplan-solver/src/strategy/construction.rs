//! Greedy construction heuristic.
//!
//! Sweeps the timeslots left to right. While a timeslot is short of
//! drivers, adds the covering pattern with the best ratio of still-needed
//! timeslots to hours. A second pass drops drivers whose removal keeps
//! every timeslot covered, longest shifts first.
//!
//! Both passes move whole batches of drivers: the greedy choice can only
//! change once a timeslot's residual reaches zero, so the work per solve
//! is bounded by the horizon and pattern count rather than the demand.

use std::cmp::Ordering;

use shiftplan_core::Result;
use tracing::debug;

use crate::model::CoverageModel;

/// Builds per-pattern driver counts covering the model's demand.
///
/// # Errors
///
/// `Infeasible` if a demanded timeslot has no covering pattern.
///
/// # Examples
///
/// ```
/// use shiftplan_core::{generate_patterns, Demand};
/// use shiftplan_solver::model::build_model;
/// use shiftplan_solver::strategy::construct;
///
/// let patterns = generate_patterns(5, 4, 10).unwrap();
/// let model = build_model(&patterns, &Demand::new(vec![1; 5])).unwrap();
///
/// let counts = construct(&model).unwrap();
/// assert!(model.is_feasible(&counts));
/// assert_eq!(model.objective(&counts), 5);
/// ```
pub fn construct(model: &CoverageModel) -> Result<Vec<u32>> {
    model.check_feasible()?;

    let mut counts = vec![0u32; model.variable_count()];
    let mut residual: Vec<u32> = model.demand().to_vec();

    for timeslot in 0..model.horizon() {
        while residual[timeslot] > 0 {
            let Some(variable) = best_ratio(model, &residual, timeslot) else {
                break;
            };
            let slots = model.pattern(variable).timeslots();
            // Adding drivers one at a time would pick `variable` again until
            // its smallest positive residual is used up.
            let batch = residual[slots.clone()]
                .iter()
                .copied()
                .filter(|&r| r > 0)
                .min()
                .unwrap_or(1);
            counts[variable] = counts[variable].saturating_add(batch);
            for slot in &mut residual[slots] {
                *slot = slot.saturating_sub(batch);
            }
        }
    }

    let removed = drop_redundant(model, &mut counts);
    debug!(
        event = "construction",
        objective = model.objective(&counts),
        removed,
    );
    Ok(counts)
}

/// Covering pattern with the highest gain per hour; ties go to the larger
/// gain, then the lower index.
fn best_ratio(model: &CoverageModel, residual: &[u32], timeslot: usize) -> Option<usize> {
    let gain = |variable: usize| -> u64 {
        residual[model.pattern(variable).timeslots()]
            .iter()
            .filter(|&&r| r > 0)
            .count() as u64
    };

    let mut best: Option<(usize, u64, u64)> = None;
    for &variable in model.coverers(timeslot) {
        let g = gain(variable);
        let h = model.objective_weight(variable);
        let better = match best {
            None => true,
            Some((_, best_g, best_h)) => match (g * best_h).cmp(&(best_g * h)) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => g > best_g,
            },
        };
        if better {
            best = Some((variable, g, h));
        }
    }
    best.map(|(variable, _, _)| variable)
}

/// Removes drivers not needed for coverage. Returns how many were removed.
fn drop_redundant(model: &CoverageModel, counts: &mut [u32]) -> u64 {
    let demand = model.demand();
    let mut coverage = model.coverage(counts);

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by_key(|&v| std::cmp::Reverse(model.pattern(v).hours()));

    let mut removed = 0u64;
    for variable in order {
        let slots = model.pattern(variable).timeslots();
        let surplus = slots
            .clone()
            .map(|t| coverage[t].saturating_sub(demand[t]))
            .min()
            .unwrap_or(0);
        let drop = surplus.min(counts[variable]);
        if drop > 0 {
            counts[variable] -= drop;
            for slot in &mut coverage[slots] {
                *slot -= drop;
            }
            removed += u64::from(drop);
        }
    }
    removed
}
