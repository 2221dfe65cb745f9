//! Search statistics.
//!
//! Plain counters reported alongside every solve outcome.

use std::time::Duration;

/// Counters for one solve run.
///
/// # Example
///
/// ```
/// use shiftplan_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.record_node();
/// stats.record_node();
/// stats.record_prune();
/// stats.record_incumbent();
///
/// assert_eq!(stats.nodes_explored, 2);
/// assert_eq!(stats.nodes_pruned, 1);
/// assert_eq!(stats.incumbent_updates, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Search nodes visited.
    pub nodes_explored: u64,
    /// Nodes cut off by a bound.
    pub nodes_pruned: u64,
    /// Complete candidate assignments checked against demand.
    pub candidates_examined: u64,
    /// Times a better assignment replaced the incumbent.
    pub incumbent_updates: u64,
    /// Independent subtrees handed to workers.
    pub subtrees: u64,
    /// Estimated candidates in the exhaustive search space.
    pub search_space: Option<u128>,
    /// Wall-clock time of the solve.
    pub elapsed: Duration,
}

impl SolverStats {
    #[inline]
    pub fn record_node(&mut self) {
        self.nodes_explored += 1;
    }

    #[inline]
    pub fn record_prune(&mut self) {
        self.nodes_pruned += 1;
    }

    #[inline]
    pub fn record_candidate(&mut self) {
        self.candidates_examined += 1;
    }

    #[inline]
    pub fn record_incumbent(&mut self) {
        self.incumbent_updates += 1;
    }

    /// Adds the counters of a worker. Elapsed time and search space are kept.
    pub fn merge(&mut self, other: &SolverStats) {
        self.nodes_explored += other.nodes_explored;
        self.nodes_pruned += other.nodes_pruned;
        self.candidates_examined += other.candidates_examined;
        self.incumbent_updates += other.incumbent_updates;
        self.subtrees += other.subtrees;
    }

    /// Returns the node exploration rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes_explored as f64 / secs
        } else {
            0.0
        }
    }
}
