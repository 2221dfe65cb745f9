//! Coverage model: the integer program behind shift planning.
//!
//! One decision variable per shift pattern (how many drivers work it), one
//! covering constraint per demanded timeslot, and a linear objective that
//! weighs every pattern by its hours. Patterns are the sets of a weighted
//! multi-cover problem; the timeslots are its elements.

use shiftplan_core::{Assignment, Demand, PatternSet, Result, ShiftPattern, ShiftPlanError};

/// `coverage[timeslot] >= demand` over the listed pattern variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageConstraint<'a> {
    pub timeslot: usize,
    pub demand: u32,
    /// Variables (pattern indices) whose pattern covers the timeslot.
    pub patterns: &'a [usize],
}

/// Immutable covering problem for one planning instance.
#[derive(Debug, Clone)]
pub struct CoverageModel {
    demand: Demand,
    patterns: PatternSet,
    coverers: Vec<Vec<usize>>,
}

/// Builds the covering model for `demand` over `patterns`.
///
/// # Errors
///
/// `InvalidConfiguration` if the pattern horizon differs from the demand
/// length.
///
/// # Examples
///
/// ```
/// use shiftplan_core::{generate_patterns, Demand};
/// use shiftplan_solver::model::build_model;
///
/// let patterns = generate_patterns(5, 4, 10).unwrap();
/// let model = build_model(&patterns, &Demand::new(vec![1, 1, 1, 1, 1])).unwrap();
///
/// assert_eq!(model.variable_count(), 3);
/// assert_eq!(model.variable_upper_bound(0), 1);
/// assert_eq!(model.constraints().count(), 5);
/// ```
pub fn build_model(patterns: &PatternSet, demand: &Demand) -> Result<CoverageModel> {
    if patterns.horizon() != demand.len() {
        return Err(ShiftPlanError::InvalidConfiguration(format!(
            "demand has {} timeslots but patterns span {}",
            demand.len(),
            patterns.horizon()
        )));
    }

    let mut coverers = vec![Vec::new(); demand.len()];
    for (index, pattern) in patterns.iter().enumerate() {
        for timeslot in pattern.timeslots() {
            coverers[timeslot].push(index);
        }
    }

    Ok(CoverageModel {
        demand: demand.clone(),
        patterns: patterns.clone(),
        coverers,
    })
}

impl CoverageModel {
    /// Number of timeslots.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.demand.len()
    }

    #[inline]
    pub fn demand(&self) -> &Demand {
        &self.demand
    }

    #[inline]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    #[inline]
    pub fn pattern(&self, variable: usize) -> &ShiftPattern {
        &self.patterns[variable]
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.patterns.len()
    }

    /// Upper bound on any single variable: no timeslot needs more than the
    /// peak demand, and every pattern covers at least one timeslot.
    #[inline]
    pub fn variable_upper_bound(&self, _variable: usize) -> u32 {
        self.demand.peak()
    }

    /// Hours contributed to the objective per driver on `variable`.
    #[inline]
    pub fn objective_weight(&self, variable: usize) -> u64 {
        self.patterns[variable].hours() as u64
    }

    /// Pattern indices covering `timeslot`, in canonical order.
    #[inline]
    pub fn coverers(&self, timeslot: usize) -> &[usize] {
        &self.coverers[timeslot]
    }

    /// Shortest pattern length, `None` for an empty pattern set.
    pub fn min_hours(&self) -> Option<u64> {
        self.patterns.min_hours().map(|h| h as u64)
    }

    /// Covering constraints; timeslots without demand impose none.
    pub fn constraints(&self) -> impl Iterator<Item = CoverageConstraint<'_>> + '_ {
        self.demand
            .iter()
            .enumerate()
            .filter(|&(_, &demand)| demand > 0)
            .map(|(timeslot, &demand)| CoverageConstraint {
                timeslot,
                demand,
                patterns: &self.coverers[timeslot],
            })
    }

    /// Fails with `Infeasible` when a demanded timeslot has no covering
    /// pattern. Otherwise some multiple of the covering patterns always
    /// satisfies the model.
    pub fn check_feasible(&self) -> Result<()> {
        match self.constraints().find(|c| c.patterns.is_empty()) {
            Some(c) => Err(ShiftPlanError::Infeasible(format!(
                "no shift pattern covers timeslot {} (demand {})",
                c.timeslot, c.demand
            ))),
            None => Ok(()),
        }
    }

    /// Coverage per timeslot for per-variable counts, saturating at
    /// `u32::MAX`.
    pub fn coverage(&self, counts: &[u32]) -> Vec<u32> {
        let mut coverage = vec![0u32; self.horizon()];
        for (pattern, &count) in self.patterns.iter().zip(counts) {
            if count > 0 {
                for slot in &mut coverage[pattern.timeslots()] {
                    *slot = slot.saturating_add(count);
                }
            }
        }
        coverage
    }

    /// Objective value (total hours) for per-variable counts.
    pub fn objective(&self, counts: &[u32]) -> u64 {
        counts
            .iter()
            .enumerate()
            .map(|(variable, &count)| u64::from(count) * self.objective_weight(variable))
            .sum()
    }

    /// Returns true if the counts satisfy every covering constraint.
    pub fn is_feasible(&self, counts: &[u32]) -> bool {
        counts.len() == self.variable_count()
            && self
                .coverage(counts)
                .iter()
                .zip(self.demand.iter())
                .all(|(c, d)| c >= d)
    }

    /// Converts per-variable counts into an [`Assignment`].
    pub fn assignment(&self, counts: &[u32]) -> Result<Assignment> {
        Assignment::from_counts(self.horizon(), &self.patterns, counts)
    }
}
