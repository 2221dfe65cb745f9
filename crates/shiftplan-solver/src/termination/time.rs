//! Time-based termination.

use std::fmt::Debug;
use std::time::Duration;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the wall-clock deadline has elapsed.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shiftplan_solver::termination::TimeTermination;
///
/// // Terminate after 15 seconds
/// let term = TimeTermination::new(Duration::from_secs(15));
///
/// // Or use convenience constructors
/// let term = TimeTermination::seconds(15);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &SearchScope<'_>) -> bool {
        scope.elapsed() >= self.limit
    }
}
