//! Brute-force reference optimum.
//!
//! Enumerates every count vector with counts up to the peak demand. Only
//! usable for a handful of patterns, which is all the tests need.

use shiftplan_core::{Demand, PatternSet};

/// Cheapest total hours covering `demand`, or `None` if no pattern
/// combination covers it.
pub fn brute_force_optimum(patterns: &PatternSet, demand: &Demand) -> Option<u64> {
    // Index of the last pattern covering each timeslot.
    let last_cover: Vec<Option<usize>> = (0..demand.len())
        .map(|t| patterns.iter().rposition(|p| p.covers(t)))
        .collect();
    let mut search = Enumeration {
        patterns,
        demand,
        last_cover,
        coverage: vec![0; demand.len()],
        best: None,
    };
    search.enumerate(0, 0);
    search.best
}

struct Enumeration<'a> {
    patterns: &'a PatternSet,
    demand: &'a Demand,
    last_cover: Vec<Option<usize>>,
    coverage: Vec<u32>,
    best: Option<u64>,
}

impl Enumeration<'_> {
    fn enumerate(&mut self, index: usize, hours: u64) {
        let mut missing = 0u64;
        for (t, (&c, &d)) in self.coverage.iter().zip(self.demand.iter()).enumerate() {
            if c < d {
                if self.last_cover[t].map_or(true, |last| last < index) {
                    return;
                }
                missing += u64::from(d - c);
            }
        }
        if self.best.is_some_and(|b| hours + missing >= b) {
            return;
        }
        if index == self.patterns.len() {
            self.best = Some(hours);
            return;
        }

        let pattern = self.patterns[index];
        let peak = self.demand.peak();
        for t in pattern.timeslots() {
            self.coverage[t] += peak;
        }
        for count in (0..=peak).rev() {
            self.enumerate(index + 1, hours + u64::from(count) * pattern.hours() as u64);
            if count > 0 {
                for t in pattern.timeslots() {
                    self.coverage[t] -= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scenario;
    use shiftplan_core::ShiftPattern;

    #[test]
    fn test_known_optima() {
        for scenario in [
            Scenario::idle_day(),
            Scenario::single_long_shift(),
            Scenario::split_ends(),
        ] {
            assert_eq!(
                brute_force_optimum(&scenario.patterns(), &scenario.demand),
                scenario.optimum,
                "{}",
                scenario.name
            );
        }
    }

    #[test]
    fn test_coverage_restored_between_patterns() {
        // The first pattern starts on an uncovered timeslot, so every count
        // of it must leave the coverage of later branches untouched.
        let patterns = PatternSet::from_patterns(
            4,
            [
                ShiftPattern::new(4, 0, 2).unwrap(),
                ShiftPattern::new(4, 2, 2).unwrap(),
                ShiftPattern::new(4, 0, 4).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(brute_force_optimum(&patterns, &Demand::new(vec![2, 2, 1, 1])), Some(6));
        assert_eq!(brute_force_optimum(&patterns, &Demand::new(vec![1, 0, 0, 1])), Some(4));
        assert_eq!(brute_force_optimum(&patterns, &Demand::new(vec![3, 0, 0, 0])), Some(6));
    }

    #[test]
    fn test_uncoverable_demand() {
        let patterns = PatternSet::from_patterns(3, [ShiftPattern::new(3, 0, 1).unwrap()]).unwrap();
        assert_eq!(brute_force_optimum(&patterns, &Demand::new(vec![0, 1, 0])), None);
    }
}
