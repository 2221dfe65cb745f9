//! Shiftplan Core - Data model for driver shift coverage planning
//!
//! This crate provides the fundamental building blocks shared by the solver:
//! - Shift patterns and the pattern generator
//! - Demand vectors
//! - Assignments (pattern multisets) and their coverage
//! - Expansion of an assignment into per-driver shift rows

pub mod assignment;
pub mod demand;
pub mod error;
pub mod pattern;
pub mod solution;

pub use assignment::Assignment;
pub use demand::Demand;
pub use error::{Result, ShiftPlanError};
pub use pattern::{
    generate_patterns, generate_patterns_with_policy, pattern_count, MaxHoursPolicy, PatternSet,
    ShiftPattern,
};
pub use solution::{expand, Solution};
