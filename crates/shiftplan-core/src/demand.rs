//! Hourly demand forecast.

use std::ops::Deref;

use crate::error::{Result, ShiftPlanError};

/// Minimum number of drivers required at each timeslot.
///
/// # Examples
///
/// ```
/// use shiftplan_core::Demand;
///
/// let demand = Demand::new(vec![0, 1, 5, 5, 1]);
/// assert_eq!(demand.peak(), 5);
/// assert_eq!(demand.total(), 12);
/// assert_eq!(demand.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Demand(Vec<u32>);

impl Demand {
    pub fn new(values: Vec<u32>) -> Self {
        Self(values)
    }

    /// Builds a demand vector from signed input, rejecting negatives.
    pub fn try_from_signed(values: &[i64]) -> Result<Self> {
        values
            .iter()
            .enumerate()
            .map(|(t, &v)| {
                u32::try_from(v).map_err(|_| {
                    ShiftPlanError::InvalidConfiguration(format!(
                        "demand at timeslot {t} must be a non-negative integer, got {v}"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Highest demand over the horizon.
    pub fn peak(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Total demanded driver hours.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&d| u64::from(d)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&d| d == 0)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Deref for Demand {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for Demand {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}
