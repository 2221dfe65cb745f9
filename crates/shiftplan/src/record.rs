//! Planning record: the serialized shape of one planning instance.
//!
//! Field names follow the exchange format (`config.min_shift_hours`,
//! `config.max_shift_hours`, `config.timeout_sec`, `timeslots`, `demand`,
//! `solution.shifts`). Reading and writing the record is left to callers.

use serde::{Deserialize, Serialize};

/// One planning instance, as exchanged with callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningInput {
    pub config: ShiftConfig,
    pub timeslots: Vec<TimeslotLabel>,
    pub demand: Vec<i64>,
    #[serde(default)]
    pub solution: SolutionRecord,
}

impl PlanningInput {
    /// Builds a record with numbered timeslots and an empty solution.
    pub fn new(
        min_shift_hours: usize,
        max_shift_hours: usize,
        timeout_sec: f64,
        demand: Vec<i64>,
    ) -> Self {
        Self {
            config: ShiftConfig {
                min_shift_hours,
                max_shift_hours,
                timeout_sec,
            },
            timeslots: (0..demand.len() as i64).map(TimeslotLabel::Index).collect(),
            demand,
            solution: SolutionRecord::default(),
        }
    }
}

/// Per-instance shift bounds and deadline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    pub min_shift_hours: usize,
    pub max_shift_hours: usize,
    pub timeout_sec: f64,
}

/// Opaque timeslot label; only the number of labels matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeslotLabel {
    Index(i64),
    Text(String),
}

/// Binary shift rows, one per scheduled driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionRecord {
    #[serde(default)]
    pub shifts: Vec<Vec<u8>>,
}
