//! Exhaustive search over driver multisets.
//!
//! For each driver count `k`, starting at the peak demand, enumerates the
//! multisets of `k` patterns as non-decreasing index sequences, depth first.
//! Each level of the search fixes how many copies of one pattern the
//! multiset holds, so the recursion is never deeper than the pattern count.
//! The number of multisets grows as C(n+k-1, k), so this strategy is only
//! chosen for small instances.

use shiftplan_core::Result;
use tracing::{debug, trace};

use super::{finish, warm_start, CoverageSolver};
use crate::model::CoverageModel;
use crate::result::{SolveOutcome, StrategyKind};
use crate::scope::{NodeTicker, SearchScope};
use crate::stats::SolverStats;

/// C(m, r), saturating at `u128::MAX`.
fn binomial(m: u128, r: u128) -> u128 {
    if r > m {
        return 0;
    }
    let r = r.min(m - r);
    let mut count: u128 = 1;
    for i in 1..=r {
        // count == C(m-r+i-1, i-1) here; the division is exact.
        count = match count.checked_mul(m - r + i) {
            Some(product) => product / i,
            None => return u128::MAX,
        };
    }
    count
}

/// Number of multisets of size `k` drawn from `n` items, C(n+k-1, k).
///
/// Saturates at `u128::MAX`.
///
/// # Examples
///
/// ```
/// use shiftplan_solver::strategy::multiset_count;
///
/// assert_eq!(multiset_count(3, 2), 6);
/// assert_eq!(multiset_count(63, 5), 9_657_648);
/// assert_eq!(multiset_count(0, 0), 1);
/// ```
pub fn multiset_count(n: usize, k: usize) -> u128 {
    if n == 0 {
        return u128::from(k == 0);
    }
    binomial(n as u128 - 1 + k as u128, k as u128)
}

/// Multisets the exhaustive search may visit with at most `driver_cap`
/// drivers.
///
/// Sums [`multiset_count`] over driver counts from the peak demand up to
/// `driver_cap`, saturating at `u128::MAX`. The sum telescopes to
/// C(n+cap, n) - C(n+peak-1, n).
pub fn estimate_search_space(model: &CoverageModel, driver_cap: u64) -> u128 {
    if model.demand().is_zero() {
        return 1;
    }
    let peak = u64::from(model.demand().peak());
    if driver_cap < peak {
        return 0;
    }
    let n = model.variable_count() as u128;
    let upto_cap = binomial(n + u128::from(driver_cap), n);
    if upto_cap == u128::MAX {
        return u128::MAX;
    }
    upto_cap - binomial(n + u128::from(peak) - 1, n)
}

/// Exact search over multisets of increasing size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSearch;

impl ExhaustiveSearch {
    pub fn new() -> Self {
        Self
    }
}

impl CoverageSolver for ExhaustiveSearch {
    fn strategy(&self) -> StrategyKind {
        StrategyKind::Exhaustive
    }

    fn solve(&self, model: &CoverageModel, scope: &SearchScope<'_>) -> Result<SolveOutcome> {
        if let Some(outcome) = warm_start(model, scope, StrategyKind::Exhaustive)? {
            return Ok(outcome);
        }

        let min_hours = model.min_hours().unwrap_or(1);
        let mut search = MultisetSearch {
            model,
            scope,
            ticker: NodeTicker::new(scope),
            counts: vec![0; model.variable_count()],
            residual: model.demand().iter().map(|&d| i64::from(d)).collect(),
            best: scope.incumbent().upper_bound(),
            min_hours,
            stats: SolverStats::default(),
        };

        let peak = u64::from(model.demand().peak());
        let total = model.demand().total();
        let mut complete = true;
        for drivers in peak..=total {
            if drivers.saturating_mul(min_hours) >= search.best {
                break;
            }
            debug!(event = "driver_count", drivers, best = search.best);
            search.descend(0, drivers, 0)?;
            if search.ticker.is_stopped() {
                complete = false;
                break;
            }
        }

        search.ticker.flush();
        let stats = search.stats;
        finish(model, scope, StrategyKind::Exhaustive, complete, stats)
    }
}

struct MultisetSearch<'m, 's, 'a> {
    model: &'m CoverageModel,
    scope: &'s SearchScope<'a>,
    ticker: NodeTicker<'s, 'a>,
    counts: Vec<u32>,
    residual: Vec<i64>,
    best: u64,
    min_hours: u64,
    stats: SolverStats,
}

impl MultisetSearch<'_, '_, '_> {
    /// Completes the multiset with `remaining` more patterns, all with index
    /// at least `from`.
    fn descend(&mut self, from: usize, remaining: u64, hours: u64) -> Result<()> {
        if self.ticker.tick() {
            return Ok(());
        }
        self.stats.record_node();
        if remaining == 0 {
            self.stats.record_candidate();
        }

        if hours.saturating_add(remaining.saturating_mul(self.min_hours)) >= self.best {
            self.stats.record_prune();
            return Ok(());
        }
        let max_deficit = self.residual.iter().copied().max().unwrap_or(0);
        if max_deficit > remaining as i64 {
            self.stats.record_prune();
            return Ok(());
        }

        if remaining == 0 {
            // No deficit left and strictly cheaper than the incumbent.
            self.best = hours;
            trace!(event = "leaf", hours);
            if self.scope.offer(0, self.model.assignment(&self.counts)?) {
                self.stats.record_incumbent();
            }
            return Ok(());
        }

        for variable in from..self.model.variable_count() {
            // More copies sort first: [v, v, ..] precedes [v, w, ..] for w > v.
            let most = self.most_copies(variable, remaining, hours);
            for copies in (1..=most).rev() {
                self.descend_with(variable, copies, remaining, hours)?;
                if self.ticker.is_stopped() {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn descend_with(
        &mut self,
        variable: usize,
        copies: u64,
        remaining: u64,
        hours: u64,
    ) -> Result<()> {
        let slots = self.model.pattern(variable).timeslots();
        let delta = copies as i64;
        self.counts[variable] += copies as u32;
        for slot in &mut self.residual[slots.clone()] {
            *slot -= delta;
        }

        let result = self.descend(
            variable + 1,
            remaining - copies,
            hours + copies * self.model.objective_weight(variable),
        );

        self.counts[variable] -= copies as u32;
        for slot in &mut self.residual[slots] {
            *slot += delta;
        }
        result
    }

    /// Largest number of copies of `variable` whose node survives both
    /// prunes. Both prunes only tighten as copies are added.
    fn most_copies(&self, variable: usize, remaining: u64, hours: u64) -> u64 {
        let slots = self.model.pattern(variable).timeslots();
        // Timeslots outside the pattern keep their deficit.
        let outside = self
            .residual
            .iter()
            .enumerate()
            .filter(|(t, _)| !slots.contains(t))
            .map(|(_, &r)| r)
            .max()
            .unwrap_or(0)
            .max(0) as u64;
        let mut most = remaining.saturating_sub(outside);

        let extra = self.model.objective_weight(variable) - self.min_hours;
        if extra > 0 {
            let slack = self
                .best
                .saturating_sub(hours.saturating_add(remaining.saturating_mul(self.min_hours)));
            most = most.min(slack.saturating_sub(1) / extra);
        }
        most
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_model;
    use crate::termination::{NoTermination, NodeCountTermination, TimeTermination};
    use shiftplan_core::{generate_patterns, Demand};
    use std::time::{Duration, Instant};

    fn model(horizon: usize, demand: Vec<u32>) -> CoverageModel {
        let patterns = generate_patterns(horizon, 4, 10).unwrap();
        build_model(&patterns, &Demand::new(demand)).unwrap()
    }

    #[test]
    fn test_multiset_count() {
        assert_eq!(multiset_count(1, 7), 1);
        assert_eq!(multiset_count(5, 0), 1);
        assert_eq!(multiset_count(0, 3), 0);
        assert_eq!(multiset_count(4, 3), 20);
        assert_eq!(multiset_count(usize::MAX / 2, 64), u128::MAX);
    }

    #[test]
    fn test_search_space_estimate() {
        // 3 patterns; k = 1 and k = 2.
        let m = model(5, vec![1; 5]);
        assert_eq!(estimate_search_space(&m, 2), 3 + 6);
        assert_eq!(estimate_search_space(&m, 0), 0);
        assert_eq!(estimate_search_space(&model(5, vec![0; 5]), 10), 1);
    }

    #[test]
    fn test_single_long_shift() {
        let m = model(5, vec![1; 5]);
        let scope = SearchScope::new(NoTermination);
        let outcome = ExhaustiveSearch.solve(&m, &scope).unwrap();

        assert!(outcome.is_optimal());
        assert_eq!(outcome.strategy, StrategyKind::Exhaustive);
        assert_eq!(outcome.objective(), 5);
        assert_eq!(outcome.driver_count(), 1);
    }

    #[test]
    fn test_both_ends_need_their_own_shifts() {
        // Only [1,1,1,1,0,0] covers the first timeslot and only
        // [0,0,1,1,1,1] the last.
        let patterns = generate_patterns(6, 4, 4).unwrap();
        let m = build_model(&patterns, &Demand::new(vec![2, 0, 0, 0, 0, 2])).unwrap();
        let scope = SearchScope::new(NoTermination);
        let outcome = ExhaustiveSearch.solve(&m, &scope).unwrap();

        assert!(outcome.is_optimal());
        assert_eq!(outcome.objective(), 16);
        assert!(outcome.assignment.covers(m.demand()));
    }

    #[test]
    fn test_zero_demand_is_empty() {
        let m = model(6, vec![0; 6]);
        let scope = SearchScope::new(NoTermination);
        let outcome = ExhaustiveSearch.solve(&m, &scope).unwrap();
        assert!(outcome.is_optimal());
        assert!(outcome.assignment.is_empty());
    }

    #[test]
    fn test_search_space_estimate_for_large_demand() {
        // 3 patterns, peak 2_000_000, cap 2_000_001.
        let m = model(5, vec![2_000_000; 5]);
        let expected = multiset_count(3, 2_000_000) + multiset_count(3, 2_000_001);
        assert_eq!(estimate_search_space(&m, 2_000_001), expected);
        assert_eq!(multiset_count(3, 2_000_000), 2_000_001 * 2_000_002 / 2);
    }

    #[test]
    fn test_many_copies_of_one_pattern_within_deadline() {
        // Only the full-length pattern covers both ends, so a search that
        // recursed once per driver would nest a million frames deep here.
        let m = model(5, vec![1_000_000; 5]);
        let scope = SearchScope::new(TimeTermination::new(Duration::from_millis(100)));
        let started = Instant::now();
        let outcome = ExhaustiveSearch.solve(&m, &scope).unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(outcome.assignment.covers(m.demand()));
        assert_eq!(outcome.objective(), 5_000_000);
    }

    #[test]
    fn test_node_limit_returns_feasible_best() {
        let m = model(12, vec![0, 1, 1, 1, 1, 5, 5, 5, 5, 5, 5, 1]);
        let scope = SearchScope::new(NodeCountTermination::new(1));
        scope.record_nodes(1);
        assert!(scope.should_terminate());
        let outcome = ExhaustiveSearch.solve(&m, &scope).unwrap();

        assert!(outcome.is_timed_out());
        assert!(outcome.assignment.covers(m.demand()));
    }
}
