//! Assignments: how many drivers work each shift pattern.

use std::fmt;

use crate::demand::Demand;
use crate::error::{Result, ShiftPlanError};
use crate::pattern::ShiftPattern;

/// A multiset of shift patterns.
///
/// Entries hold non-zero counts only, in the order of the pattern set the
/// assignment was built from. Assignments are produced once by a solver and
/// not mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Assignment {
    horizon: usize,
    entries: Vec<(ShiftPattern, u32)>,
}

impl Assignment {
    /// The assignment with no drivers.
    pub fn empty(horizon: usize) -> Self {
        Self {
            horizon,
            entries: Vec::new(),
        }
    }

    /// Pairs `patterns[i]` with `counts[i]`, dropping zero counts.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the slices differ in length or a pattern
    /// does not span `horizon`.
    pub fn from_counts(horizon: usize, patterns: &[ShiftPattern], counts: &[u32]) -> Result<Self> {
        if patterns.len() != counts.len() {
            return Err(ShiftPlanError::InvalidConfiguration(format!(
                "{} counts given for {} patterns",
                counts.len(),
                patterns.len()
            )));
        }
        let mut entries = Vec::new();
        for (pattern, &count) in patterns.iter().zip(counts) {
            if pattern.horizon() != horizon {
                return Err(ShiftPlanError::InvalidConfiguration(format!(
                    "pattern {pattern:?} does not span {horizon} timeslots"
                )));
            }
            if count > 0 {
                entries.push((*pattern, count));
            }
        }
        Ok(Self { horizon, entries })
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Non-zero `(pattern, count)` entries.
    pub fn iter(&self) -> impl Iterator<Item = &(ShiftPattern, u32)> + '_ {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of drivers using `pattern`.
    pub fn count_of(&self, pattern: &ShiftPattern) -> u32 {
        self.entries
            .iter()
            .find(|(p, _)| p == pattern)
            .map_or(0, |&(_, c)| c)
    }

    /// Total number of drivers.
    pub fn driver_count(&self) -> u64 {
        self.entries.iter().map(|&(_, c)| u64::from(c)).sum()
    }

    /// Total worked hours, oversupply included.
    pub fn objective(&self) -> u64 {
        self.entries
            .iter()
            .map(|&(p, c)| u64::from(c) * p.hours() as u64)
            .sum()
    }

    /// Drivers on duty per timeslot, saturating at `u32::MAX`. A saturated
    /// timeslot still meets any demand.
    pub fn coverage(&self) -> Vec<u32> {
        let mut coverage = vec![0u32; self.horizon];
        for &(pattern, count) in &self.entries {
            for slot in &mut coverage[pattern.timeslots()] {
                *slot = slot.saturating_add(count);
            }
        }
        coverage
    }

    /// Returns true if coverage meets demand at every timeslot.
    pub fn covers(&self, demand: &Demand) -> bool {
        demand.len() == self.horizon
            && self
                .coverage()
                .iter()
                .zip(demand.iter())
                .all(|(c, d)| c >= d)
    }

    /// Allocated hours in excess of demand.
    pub fn oversupply(&self, demand: &Demand) -> u64 {
        self.objective().saturating_sub(demand.total())
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assignment")
            .field("horizon", &self.horizon)
            .field("drivers", &self.driver_count())
            .field("objective", &self.objective())
            .field("entries", &self.entries)
            .finish()
    }
}
