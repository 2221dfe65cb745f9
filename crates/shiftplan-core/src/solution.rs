//! Expansion of an assignment into per-driver shift rows.

use std::ops::Deref;

use crate::assignment::Assignment;
use crate::pattern::ShiftPattern;

/// One shift pattern per scheduled driver.
///
/// Rows are grouped by pattern in the order of the assignment's entries,
/// which is the canonical pattern order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    shifts: Vec<ShiftPattern>,
}

impl Solution {
    /// Binary rows, one per driver.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.shifts.iter().map(ShiftPattern::bits).collect()
    }

    pub fn into_shifts(self) -> Vec<ShiftPattern> {
        self.shifts
    }
}

impl Deref for Solution {
    type Target = [ShiftPattern];

    fn deref(&self) -> &[ShiftPattern] {
        &self.shifts
    }
}

/// Emits `count` copies of each pattern of the assignment.
///
/// # Examples
///
/// ```
/// use shiftplan_core::{expand, Assignment, ShiftPattern};
///
/// let patterns = [
///     ShiftPattern::new(4, 0, 2).unwrap(),
///     ShiftPattern::new(4, 2, 2).unwrap(),
/// ];
/// let assignment = Assignment::from_counts(4, &patterns, &[2, 1]).unwrap();
/// let solution = expand(&assignment);
///
/// assert_eq!(
///     solution.to_rows(),
///     vec![vec![1, 1, 0, 0], vec![1, 1, 0, 0], vec![0, 0, 1, 1]]
/// );
/// ```
pub fn expand(assignment: &Assignment) -> Solution {
    let shifts = assignment
        .iter()
        .flat_map(|&(pattern, count)| std::iter::repeat(pattern).take(count as usize))
        .collect();
    Solution { shifts }
}
