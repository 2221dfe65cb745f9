//! Shared incumbent (best assignment found so far).
//!
//! Search workers publish improving assignments here. The authoritative
//! incumbent lives behind a `Mutex`; an atomic upper bound on its objective
//! lets workers prune without locking.
//!
//! Candidates are ordered by `(objective, rank)`. Workers use their subtree
//! index as rank, so among equal objectives the leftmost subtree wins no
//! matter which thread reports first.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use shiftplan_core::Assignment;
use tokio::sync::mpsc;

/// Rank of the construction heuristic's assignment; loses every tie.
pub const CONSTRUCTION_RANK: usize = usize::MAX;

/// A feasible assignment offered to the incumbent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub objective: u64,
    pub rank: usize,
    pub assignment: Assignment,
}

impl Candidate {
    pub fn new(rank: usize, assignment: Assignment) -> Self {
        Self {
            objective: assignment.objective(),
            rank,
            assignment,
        }
    }

    fn key(&self) -> (u64, usize) {
        (self.objective, self.rank)
    }
}

/// Concurrent holder of the best candidate.
///
/// The upper bound starts at `u64::MAX`, meaning "no incumbent yet".
#[derive(Debug)]
pub struct SharedIncumbent {
    upper_bound: AtomicU64,
    best: Mutex<Option<Candidate>>,
    sender: Option<mpsc::UnboundedSender<(u64, Assignment)>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

impl SharedIncumbent {
    pub fn new() -> Self {
        Self {
            upper_bound: AtomicU64::new(u64::MAX),
            best: Mutex::new(None),
            sender: None,
        }
    }

    /// Streams every installed assignment with its objective.
    pub fn with_sender(mut self, sender: mpsc::UnboundedSender<(u64, Assignment)>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Objective of the incumbent, `u64::MAX` if none.
    #[inline]
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Option<Candidate> {
        self.best
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_best(self) -> Option<Candidate> {
        self.best.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs `candidate` if it orders strictly before the incumbent.
    pub fn try_install(&self, candidate: Candidate) -> bool {
        if candidate.objective > self.upper_bound() {
            return false;
        }

        let mut guard = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        // The hint may be stale; compare against the locked incumbent.
        if let Some(current) = guard.as_ref() {
            if candidate.key() >= current.key() {
                return false;
            }
        }

        self.upper_bound
            .store(candidate.objective, Ordering::Relaxed);
        if let Some(sender) = &self.sender {
            // A dropped receiver only means nobody is listening.
            let _ = sender.send((candidate.objective, candidate.assignment.clone()));
        }
        *guard = Some(candidate);
        true
    }
}
