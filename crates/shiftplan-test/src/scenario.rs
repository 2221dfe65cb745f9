//! Named planning instances.

use shiftplan_core::{generate_patterns, Demand, PatternSet};

/// Demand plus shift length bounds, with the optimum when known.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub demand: Demand,
    pub min_hours: usize,
    pub max_hours: usize,
    pub optimum: Option<u64>,
}

impl Scenario {
    pub fn new(name: &'static str, demand: Vec<u32>, min_hours: usize, max_hours: usize) -> Self {
        Self {
            name,
            demand: Demand::new(demand),
            min_hours,
            max_hours,
            optimum: None,
        }
    }

    pub fn with_optimum(mut self, optimum: u64) -> Self {
        self.optimum = Some(optimum);
        self
    }

    pub fn horizon(&self) -> usize {
        self.demand.len()
    }

    /// Patterns for this scenario's bounds, clamped to the horizon.
    ///
    /// # Panics
    ///
    /// If the bounds are invalid for the horizon.
    pub fn patterns(&self) -> PatternSet {
        generate_patterns(self.horizon(), self.min_hours, self.max_hours)
            .unwrap_or_else(|err| panic!("scenario {}: {err}", self.name))
    }

    /// Twelve hours with a six-hour peak of five drivers.
    ///
    /// The demand sums to 35 hours, and `[0,1,1,1,1,1,1,1,1,1,1,0]`,
    /// `[0,0,0,0,0,1,1,1,1,1,1,1]` and three times
    /// `[0,0,0,0,0,1,1,1,1,1,1,0]` cover it exactly.
    pub fn peak_period() -> Self {
        Self::new("peak_period", vec![0, 1, 1, 1, 1, 5, 5, 5, 5, 5, 5, 1], 4, 10)
            .with_optimum(35)
    }

    /// All-zero demand over eight hours.
    pub fn idle_day() -> Self {
        Self::new("idle_day", vec![0; 8], 4, 10).with_optimum(0)
    }

    /// Five hours of demand one; a single five-hour shift covers it.
    pub fn single_long_shift() -> Self {
        Self::new("single_long_shift", vec![1; 5], 4, 10).with_optimum(5)
    }

    /// Demand at both ends of a six-hour horizon with four-hour shifts.
    pub fn split_ends() -> Self {
        Self::new("split_ends", vec![2, 0, 0, 0, 0, 2], 4, 4).with_optimum(16)
    }

    /// Two short busy periods that one shift cannot span cheaply.
    pub fn twin_peaks() -> Self {
        Self::new("twin_peaks", vec![1, 2, 2, 0, 0, 2, 2, 1], 3, 4)
    }

    /// Irregular demand with a deep trough.
    pub fn irregular() -> Self {
        Self::new("irregular", vec![2, 3, 1, 4, 4, 0, 2, 3], 3, 5)
    }

    /// Demand high at both ends with an empty middle hour.
    pub fn valley() -> Self {
        Self::new("valley", vec![3, 1, 0, 1, 3], 2, 5)
    }

    /// Small instances every strategy can solve to optimality quickly.
    pub fn small() -> Vec<Self> {
        vec![
            Self::idle_day(),
            Self::single_long_shift(),
            Self::split_ends(),
            Self::twin_peaks(),
            Self::new("ramp", vec![1, 1, 2, 2, 3, 3], 2, 3),
            Self::new("valley", vec![3, 1, 0, 1, 3], 2, 5),
        ]
    }
}
