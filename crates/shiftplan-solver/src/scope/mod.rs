//! Search scope shared by every worker of one solve.
//!
//! Holds the wall-clock start, the termination condition, the explored
//! node counter and the shared incumbent. Workers report progress through a
//! [`NodeTicker`], which batches node counts and polls termination every
//! [`POLL_INTERVAL`] nodes.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use shiftplan_core::Assignment;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::incumbent::{Candidate, SharedIncumbent};
use crate::termination::Termination;

/// Nodes a worker explores between two termination polls.
pub const POLL_INTERVAL: u64 = 256;

/// Top-level scope for one solve.
pub struct SearchScope<'a> {
    start_time: Instant,
    termination: Box<dyn Termination + 'a>,
    terminated: AtomicBool,
    nodes: AtomicU64,
    incumbent: SharedIncumbent,
    thread_count: usize,
}

impl fmt::Debug for SearchScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchScope")
            .field("termination", &self.termination)
            .field("terminated", &self.is_terminated())
            .field("nodes", &self.node_count())
            .field("incumbent", &self.incumbent.upper_bound())
            .field("thread_count", &self.thread_count)
            .finish()
    }
}

impl<'a> SearchScope<'a> {
    /// Starts the clock.
    pub fn new(termination: impl Termination + 'a) -> Self {
        Self {
            start_time: Instant::now(),
            termination: Box::new(termination),
            terminated: AtomicBool::new(false),
            nodes: AtomicU64::new(0),
            incumbent: SharedIncumbent::new(),
            thread_count: 1,
        }
    }

    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count.max(1);
        self
    }

    pub fn with_improvement_sender(
        mut self,
        sender: mpsc::UnboundedSender<(u64, Assignment)>,
    ) -> Self {
        self.incumbent = self.incumbent.with_sender(sender);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn node_count(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn record_nodes(&self, count: u64) {
        self.nodes.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    #[inline]
    pub fn incumbent(&self) -> &SharedIncumbent {
        &self.incumbent
    }

    pub fn into_incumbent(self) -> SharedIncumbent {
        self.incumbent
    }

    /// Returns true once termination has been signalled, without polling.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Relaxed)
    }

    /// Polls the termination condition. Once it fires, every later call
    /// returns true.
    pub fn should_terminate(&self) -> bool {
        if self.is_terminated() {
            return true;
        }
        if self.termination.is_terminated(self) {
            self.terminated.store(true, Ordering::Relaxed);
            debug!(
                event = "terminated",
                nodes = self.node_count(),
                elapsed_ms = self.elapsed().as_millis() as u64,
            );
            return true;
        }
        false
    }

    /// Offers a feasible assignment to the shared incumbent.
    pub fn offer(&self, rank: usize, assignment: Assignment) -> bool {
        let drivers = assignment.driver_count();
        let candidate = Candidate::new(rank, assignment);
        let objective = candidate.objective;
        let installed = self.incumbent.try_install(candidate);
        if installed {
            info!(
                event = "incumbent",
                objective,
                drivers,
                rank,
                elapsed_ms = self.elapsed().as_millis() as u64,
            );
        }
        installed
    }
}

/// Per-worker node counter that flushes into the scope in batches.
pub struct NodeTicker<'s, 'a> {
    scope: &'s SearchScope<'a>,
    pending: u64,
    stopped: bool,
}

impl<'s, 'a> NodeTicker<'s, 'a> {
    pub fn new(scope: &'s SearchScope<'a>) -> Self {
        Self {
            scope,
            pending: 0,
            stopped: scope.is_terminated(),
        }
    }

    /// Counts one node. Returns true if the worker must stop.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        self.pending += 1;
        if self.pending >= POLL_INTERVAL {
            self.flush();
            self.stopped = self.scope.should_terminate();
        }
        self.stopped
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn flush(&mut self) {
        if self.pending > 0 {
            self.scope.record_nodes(self.pending);
            self.pending = 0;
        }
    }
}

impl Drop for NodeTicker<'_, '_> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests;
