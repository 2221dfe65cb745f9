//! Shared test fixtures for shiftplan crates.
//!
//! This crate provides demand scenarios and a reference optimum for testing.
//! It depends on `shiftplan-core` only, so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`scenario`] - Named planning instances with known optima
//! - [`oracle`] - Brute-force optimum for tiny instances
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! shiftplan-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use shiftplan_test::{brute_force_optimum, Scenario};
//!
//! let scenario = Scenario::single_long_shift();
//! let patterns = scenario.patterns();
//! assert_eq!(brute_force_optimum(&patterns, &scenario.demand), Some(5));
//! ```

pub mod oracle;
pub mod scenario;

pub use oracle::brute_force_optimum;
pub use scenario::Scenario;
