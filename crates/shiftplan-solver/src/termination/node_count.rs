//! Node count termination.

use std::fmt::Debug;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of explored search nodes.
///
/// Workers report nodes in batches, so the limit may be overshot by one
/// batch per worker.
///
/// # Example
///
/// ```
/// use shiftplan_solver::termination::NodeCountTermination;
///
/// // Terminate after a million nodes
/// let term = NodeCountTermination::new(1_000_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        scope.node_count() >= self.limit
    }
}
