//! Parallel branch and bound over per-pattern driver counts.
//!
//! Variables are visited in (start, hours) order. A timeslot is closed by
//! the last variable able to cover it, so that variable's count must at
//! least fill the timeslot's residual demand. A count never exceeds the
//! largest residual demand over its pattern's timeslots: one driver fewer
//! would still cover everything. Both bounds keep every optimal assignment
//! in the tree.
//!
//! The lower bound of a node is its hours plus the total residual demand,
//! since each further driver hour covers at most one missing unit. The
//! bound never decreases as a count grows, so the first pruned count ends
//! the loop over counts.
//!
//! The first levels are expanded breadth first into independent subtrees,
//! which rayon workers explore depth first. The subtree index ranks equal
//! objectives, so the result does not depend on thread timing.

use std::cmp::Ordering;

use rayon::prelude::*;
use shiftplan_core::Result;
use tracing::{debug, trace, warn};

use super::{finish, warm_start, CoverageSolver};
use crate::model::CoverageModel;
use crate::result::{SolveOutcome, StrategyKind};
use crate::scope::{NodeTicker, SearchScope};
use crate::stats::SolverStats;

/// Subtrees handed out per worker thread.
const SUBTREES_PER_WORKER: usize = 8;

/// Branch and bound over per-pattern driver counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl BranchAndBound {
    pub fn new() -> Self {
        Self
    }
}

impl CoverageSolver for BranchAndBound {
    fn strategy(&self) -> StrategyKind {
        StrategyKind::BranchAndBound
    }

    fn solve(&self, model: &CoverageModel, scope: &SearchScope<'_>) -> Result<SolveOutcome> {
        if let Some(outcome) = warm_start(model, scope, StrategyKind::BranchAndBound)? {
            return Ok(outcome);
        }

        let tree = SearchTree::new(model);
        let mut stats = SolverStats::default();
        let frontier = tree.frontier(scope, &mut stats);
        if scope.is_terminated() {
            return finish(model, scope, StrategyKind::BranchAndBound, false, stats);
        }
        debug!(
            event = "frontier",
            subtrees = frontier.len(),
            depth = frontier.first().map_or(0, |n| n.depth),
            threads = scope.thread_count(),
        );

        let explore = |(rank, node): (usize, &Node)| tree.explore(scope, rank, node.clone());
        let worker_stats: Vec<SolverStats> = match rayon::ThreadPoolBuilder::new()
            .num_threads(scope.thread_count())
            .thread_name(|i| format!("shiftplan-worker-{i}"))
            .build()
        {
            Ok(pool) => pool.install(|| {
                frontier
                    .par_iter()
                    .enumerate()
                    .map(explore)
                    .collect::<Result<Vec<_>>>()
            })?,
            Err(err) => {
                warn!(event = "thread_pool", error = %err, "falling back to a single worker");
                frontier
                    .iter()
                    .enumerate()
                    .map(explore)
                    .collect::<Result<Vec<_>>>()?
            }
        };
        for worker in &worker_stats {
            stats.merge(worker);
        }

        let complete = !scope.is_terminated();
        finish(model, scope, StrategyKind::BranchAndBound, complete, stats)
    }
}

/// Partial assignment: counts fixed for the first `depth` variables.
#[derive(Debug, Clone)]
struct Node {
    depth: usize,
    counts: Vec<u32>,
    residual: Vec<i64>,
    hours: u64,
}

impl Node {
    fn lower_bound(&self) -> u64 {
        self.hours
            + self
                .residual
                .iter()
                .filter(|&&r| r > 0)
                .map(|&r| r as u64)
                .sum::<u64>()
    }

    fn add(&mut self, model: &CoverageModel, variable: usize, drivers: i64) {
        self.counts[variable] = (i64::from(self.counts[variable]) + drivers) as u32;
        for slot in &mut self.residual[model.pattern(variable).timeslots()] {
            *slot -= drivers;
        }
        let hours = model.objective_weight(variable) * drivers.unsigned_abs();
        if drivers >= 0 {
            self.hours += hours;
        } else {
            self.hours -= hours;
        }
    }
}

struct SearchTree<'m> {
    model: &'m CoverageModel,
    /// Variables in branching order.
    order: Vec<usize>,
    /// `closes[i]`: timeslots whose last covering variable is `order[i]`.
    closes: Vec<Vec<usize>>,
}

impl<'m> SearchTree<'m> {
    fn new(model: &'m CoverageModel) -> Self {
        let mut order: Vec<usize> = (0..model.variable_count()).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (model.pattern(a), model.pattern(b));
            match pa.start().cmp(&pb.start()) {
                Ordering::Equal => pa.hours().cmp(&pb.hours()).then(a.cmp(&b)),
                other => other,
            }
        });

        let mut position = vec![0; order.len()];
        for (i, &variable) in order.iter().enumerate() {
            position[variable] = i;
        }
        let mut closes = vec![Vec::new(); order.len()];
        for timeslot in 0..model.horizon() {
            if let Some(last) = model.coverers(timeslot).iter().map(|&v| position[v]).max() {
                closes[last].push(timeslot);
            }
        }

        Self {
            model,
            order,
            closes,
        }
    }

    fn root(&self) -> Node {
        Node {
            depth: 0,
            counts: vec![0; self.model.variable_count()],
            residual: self.model.demand().iter().map(|&d| i64::from(d)).collect(),
            hours: 0,
        }
    }

    /// Admissible driver counts for the variable at `node.depth`.
    fn count_range(&self, node: &Node) -> (i64, i64) {
        let variable = self.order[node.depth];
        let lo = self.closes[node.depth]
            .iter()
            .map(|&t| node.residual[t])
            .max()
            .unwrap_or(0)
            .max(0);
        let hi = node.residual[self.model.pattern(variable).timeslots()]
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .clamp(0, i64::from(self.model.demand().peak()));
        (lo, hi)
    }

    /// Expands levels breadth first until there are enough subtrees.
    fn frontier(&self, scope: &SearchScope<'_>, stats: &mut SolverStats) -> Vec<Node> {
        let target = scope.thread_count() * SUBTREES_PER_WORKER;
        let depth_limit = self.order.len();
        let mut ticker = NodeTicker::new(scope);
        let mut frontier = vec![self.root()];

        while frontier.len() < target
            && frontier.first().is_some_and(|n| n.depth < depth_limit)
            && !scope.is_terminated()
        {
            let mut next = Vec::with_capacity(frontier.len() * 2);
            'level: for node in frontier {
                stats.record_node();
                let variable = self.order[node.depth];
                let (lo, hi) = self.count_range(&node);
                for drivers in lo..=hi {
                    // A single node may have as many children as the peak
                    // demand.
                    if ticker.tick() {
                        break 'level;
                    }
                    let mut child = node.clone();
                    child.add(self.model, variable, drivers);
                    child.depth += 1;
                    if child.lower_bound() > scope.incumbent().upper_bound() {
                        stats.record_prune();
                        break;
                    }
                    next.push(child);
                }
            }
            frontier = next;
        }
        frontier
    }

    /// Explores one subtree depth first.
    fn explore(&self, scope: &SearchScope<'_>, rank: usize, mut node: Node) -> Result<SolverStats> {
        // Small subtrees end before their ticker polls.
        if scope.should_terminate() {
            return Ok(SolverStats::default());
        }
        let mut worker = Worker {
            tree: self,
            scope,
            ticker: NodeTicker::new(scope),
            rank,
            local_best: u64::MAX,
            stats: SolverStats {
                subtrees: 1,
                ..SolverStats::default()
            },
        };
        worker.descend(&mut node)?;
        worker.ticker.flush();
        trace!(event = "subtree_done", rank, nodes = worker.stats.nodes_explored);
        Ok(worker.stats)
    }
}

struct Worker<'t, 'm, 's, 'a> {
    tree: &'t SearchTree<'m>,
    scope: &'s SearchScope<'a>,
    ticker: NodeTicker<'s, 'a>,
    rank: usize,
    local_best: u64,
    stats: SolverStats,
}

impl Worker<'_, '_, '_, '_> {
    fn descend(&mut self, node: &mut Node) -> Result<()> {
        if self.ticker.tick() {
            return Ok(());
        }
        self.stats.record_node();

        let model = self.tree.model;
        if node.depth == self.tree.order.len() {
            self.stats.record_candidate();
            self.local_best = node.hours;
            if self.scope.offer(self.rank, model.assignment(&node.counts)?) {
                self.stats.record_incumbent();
            }
            return Ok(());
        }

        let variable = self.tree.order[node.depth];
        let (lo, hi) = self.tree.count_range(node);
        if lo > hi {
            return Ok(());
        }

        node.add(model, variable, lo);
        let mut applied = lo;
        let mut result = Ok(());
        loop {
            let bound = node.lower_bound();
            if bound >= self.local_best || bound > self.scope.incumbent().upper_bound() {
                self.stats.record_prune();
                break;
            }

            node.depth += 1;
            result = self.descend(node);
            node.depth -= 1;
            if result.is_err() || self.ticker.is_stopped() || applied == hi {
                break;
            }
            node.add(model, variable, 1);
            applied += 1;
        }
        node.add(model, variable, -applied);
        result
    }
}
