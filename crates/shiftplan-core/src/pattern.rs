//! Shift patterns and the pattern generator.
//!
//! A shift pattern is one contiguous block of worked timeslots inside the
//! planning horizon. The generator enumerates every feasible pattern for a
//! horizon and a pair of shift length bounds by direct arithmetic over
//! (run length, start) pairs.

use std::fmt;
use std::ops::{Deref, Range};
use std::sync::Arc;

use crate::error::{Result, ShiftPlanError};

/// A single shift: `len` consecutive timeslots starting at `start`.
///
/// Invariant: `len >= 1` and `start + len <= horizon`.
///
/// # Examples
///
/// ```
/// use shiftplan_core::ShiftPattern;
///
/// let shift = ShiftPattern::new(5, 1, 3).unwrap();
/// assert_eq!(shift.bits(), vec![0, 1, 1, 1, 0]);
/// assert_eq!(shift.hours(), 3);
/// assert!(shift.covers(3));
/// assert!(!shift.covers(4));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShiftPattern {
    horizon: usize,
    start: usize,
    len: usize,
}

impl ShiftPattern {
    /// Creates a pattern, rejecting empty runs and runs past the horizon.
    pub fn new(horizon: usize, start: usize, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(ShiftPlanError::invalid("shift length must be positive"));
        }
        if start + len > horizon {
            return Err(ShiftPlanError::invalid(format!(
                "shift [{start}, {}) exceeds horizon of {horizon} timeslots",
                start + len
            )));
        }
        Ok(Self {
            horizon,
            start,
            len,
        })
    }

    /// Parses a binary row. The row must contain exactly one run of 1s.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        let mut run: Option<(usize, usize)> = None;
        let mut closed = false;
        for (t, &bit) in bits.iter().enumerate() {
            match bit {
                0 => {
                    if run.is_some() {
                        closed = true;
                    }
                }
                1 => {
                    if closed {
                        return Err(ShiftPlanError::invalid("split shifts are not supported"));
                    }
                    run = Some(match run {
                        Some((start, len)) => (start, len + 1),
                        None => (t, 1),
                    });
                }
                other => {
                    return Err(ShiftPlanError::invalid(format!(
                        "shift rows are binary, found {other} at timeslot {t}"
                    )))
                }
            }
        }
        let (start, len) = run.ok_or_else(|| ShiftPlanError::invalid("empty shift row"))?;
        Self::new(bits.len(), start, len)
    }

    /// Number of timeslots in the planning horizon.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// First worked timeslot.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last worked timeslot.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Worked hours, i.e. the number of 1s in the row.
    #[inline]
    pub fn hours(&self) -> usize {
        self.len
    }

    /// Worked timeslots.
    #[inline]
    pub fn timeslots(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[inline]
    pub fn covers(&self, timeslot: usize) -> bool {
        timeslot >= self.start && timeslot < self.end()
    }

    /// Binary row of length `horizon`.
    pub fn bits(&self) -> Vec<u8> {
        (0..self.horizon).map(|t| u8::from(self.covers(t))).collect()
    }
}

impl fmt::Debug for ShiftPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShiftPattern([{}, {}) of {})", self.start, self.end(), self.horizon)
    }
}

impl fmt::Display for ShiftPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// What to do when the maximum shift length exceeds the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaxHoursPolicy {
    /// Cap the maximum shift length at the horizon.
    #[default]
    Clamp,
    /// Reject the configuration.
    Reject,
}

/// The deduplicated set of feasible patterns in canonical order
/// (ascending run length, then ascending start).
///
/// Cloning is cheap; the patterns are shared read-only.
#[derive(Clone, PartialEq, Eq)]
pub struct PatternSet {
    horizon: usize,
    patterns: Arc<[ShiftPattern]>,
}

impl PatternSet {
    /// Builds a set from arbitrary patterns, keeping the first occurrence of
    /// duplicates. All patterns must share `horizon`.
    pub fn from_patterns(
        horizon: usize,
        patterns: impl IntoIterator<Item = ShiftPattern>,
    ) -> Result<Self> {
        let mut kept: Vec<ShiftPattern> = Vec::new();
        for pattern in patterns {
            if pattern.horizon() != horizon {
                return Err(ShiftPlanError::invalid(format!(
                    "pattern {pattern:?} does not span {horizon} timeslots"
                )));
            }
            if !kept.contains(&pattern) {
                kept.push(pattern);
            }
        }
        Ok(Self {
            horizon,
            patterns: kept.into(),
        })
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Position of `pattern` in canonical order.
    pub fn index_of(&self, pattern: &ShiftPattern) -> Option<usize> {
        self.patterns.iter().position(|p| p == pattern)
    }

    /// Shortest shift length in the set.
    pub fn min_hours(&self) -> Option<usize> {
        self.patterns.iter().map(ShiftPattern::hours).min()
    }
}

impl Deref for PatternSet {
    type Target = [ShiftPattern];

    fn deref(&self) -> &[ShiftPattern] {
        &self.patterns
    }
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSet")
            .field("horizon", &self.horizon)
            .field("len", &self.patterns.len())
            .finish()
    }
}

/// Number of patterns the generator produces for the (already validated)
/// bounds: `sum over L in [min, max] of (T - L + 1)`.
pub fn pattern_count(horizon: usize, min_hours: usize, max_hours: usize) -> usize {
    let max_hours = max_hours.min(horizon);
    if min_hours == 0 || min_hours > max_hours {
        return 0;
    }
    (min_hours..=max_hours).map(|len| horizon - len + 1).sum()
}

/// Enumerates every single-run shift with length in `[min_hours, max_hours]`,
/// clamping `max_hours` to the horizon.
///
/// # Errors
///
/// `InvalidConfiguration` when `horizon == 0`, `min_hours == 0`,
/// `min_hours > max_hours` or `min_hours > horizon`.
///
/// # Examples
///
/// ```
/// use shiftplan_core::generate_patterns;
///
/// let patterns = generate_patterns(12, 4, 10).unwrap();
/// assert_eq!(patterns.len(), 42);
/// assert_eq!(patterns[0].bits(), vec![1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
/// ```
pub fn generate_patterns(horizon: usize, min_hours: usize, max_hours: usize) -> Result<PatternSet> {
    generate_patterns_with_policy(horizon, min_hours, max_hours, MaxHoursPolicy::Clamp)
}

/// Same as [`generate_patterns`] with an explicit policy for
/// `max_hours > horizon`.
pub fn generate_patterns_with_policy(
    horizon: usize,
    min_hours: usize,
    max_hours: usize,
    policy: MaxHoursPolicy,
) -> Result<PatternSet> {
    if horizon == 0 {
        return Err(ShiftPlanError::invalid("planning horizon has no timeslots"));
    }
    if min_hours == 0 {
        return Err(ShiftPlanError::invalid("minimum shift length must be positive"));
    }
    if min_hours > max_hours {
        return Err(ShiftPlanError::invalid(format!(
            "minimum shift length {min_hours} exceeds maximum {max_hours}"
        )));
    }
    if min_hours > horizon {
        return Err(ShiftPlanError::invalid(format!(
            "minimum shift length {min_hours} exceeds horizon of {horizon} timeslots"
        )));
    }
    let max_hours = match policy {
        MaxHoursPolicy::Clamp => max_hours.min(horizon),
        MaxHoursPolicy::Reject if max_hours > horizon => {
            return Err(ShiftPlanError::invalid(format!(
                "maximum shift length {max_hours} exceeds horizon of {horizon} timeslots"
            )))
        }
        MaxHoursPolicy::Reject => max_hours,
    };

    let mut patterns = Vec::with_capacity(pattern_count(horizon, min_hours, max_hours));
    for len in min_hours..=max_hours {
        for start in 0..=horizon - len {
            patterns.push(ShiftPattern {
                horizon,
                start,
                len,
            });
        }
    }
    Ok(PatternSet {
        horizon,
        patterns: patterns.into(),
    })
}
