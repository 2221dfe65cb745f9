//! Termination conditions for the search strategies.
//!
//! Strategies poll [`SearchScope::should_terminate`] between node
//! expansions; the scope consults its termination and latches the result so
//! every worker stops on the same signal.

mod composite;
mod node_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if searching should stop.
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool;
}

/// Never terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &SearchScope<'_>) -> bool {
        false
    }
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        (**self).is_terminated(scope)
    }
}
