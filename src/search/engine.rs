//! Bounded-depth parallel tree search.
//!
//! The engine knows nothing about mazes: it drives any [`Searchable`] state. Exploration is
//! depth-first on a dedicated rayon pool; sibling subtrees run in parallel. Goals are recorded
//! and not expanded further. The search stops once it has `result_limit` goals, the node budget
//! is spent, or the tree up to `max_depth` is exhausted.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use crate::search::resources::{ResourceCounts, ResourceLimits, ResourceTracker};

/// A node the engine can explore.
///
/// Implementations must be pure: the successors of a node depend only on the node itself, so
/// workers may expand nodes in any order.
pub trait Searchable: Sized + Send + Sync {
    /// Call `emit` once per successor.
    fn expand(&self, emit: &mut dyn FnMut(Self));
    fn is_goal(&self) -> bool;
    /// Higher is better when ranking goals.
    fn score(&self) -> i64;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every node up to the depth limit was visited.
    Exhausted,
    /// `result_limit` goals were collected.
    ResultLimit,
    /// The node budget ran out first.
    NodeBudget,
}

#[derive(Debug)]
pub struct SearchOutcome<S> {
    /// Discovered goals, best score first.
    pub found: Vec<S>,
    pub counts: ResourceCounts,
    pub stop: StopReason,
}

impl<S> SearchOutcome<S> {
    pub fn best(&self) -> Option<&S> {
        self.found.first()
    }

    pub fn is_solved(&self) -> bool {
        !self.found.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParallelSearch {
    pub workers: usize,
    pub max_depth: usize,
    pub result_limit: usize,
    pub limits: ResourceLimits,
}

impl ParallelSearch {
    pub fn new(workers: usize, max_depth: usize, result_limit: usize) -> Self {
        Self {
            workers,
            max_depth,
            result_limit,
            limits: ResourceLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.workers == 0 {
            return Err(SearchError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.result_limit == 0 {
            return Err(SearchError::InvalidConfig(
                "result_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Explore from `root` and return the collected goals.
    ///
    /// Finding nothing is a normal outcome (`found` is empty), not an error.
    pub fn run<S: Searchable>(&self, root: S) -> Result<SearchOutcome<S>, SearchError> {
        self.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("search-{i}"))
            .build()?;

        tracing::info!(
            workers = self.workers,
            max_depth = self.max_depth,
            result_limit = self.result_limit,
            max_nodes = self.limits.max_nodes,
            "search started"
        );

        let run = Run {
            tracker: ResourceTracker::new(self.limits),
            found: Mutex::new(Vec::new()),
            stopped: AtomicBool::new(false),
            limit_hit: AtomicBool::new(false),
            budget_hit: AtomicBool::new(false),
            result_limit: self.result_limit,
        };

        pool.install(|| self.explore(root, 0, &run));

        let stop = if run.limit_hit.load(Ordering::Acquire) {
            StopReason::ResultLimit
        } else if run.budget_hit.load(Ordering::Acquire) {
            StopReason::NodeBudget
        } else {
            StopReason::Exhausted
        };
        let counts = run.tracker.counts();
        let mut found = run.found.into_inner().unwrap_or_else(PoisonError::into_inner);
        found.sort_by_key(|s| Reverse(s.score()));

        tracing::info!(
            expanded = counts.expanded,
            generated = counts.generated,
            goals = counts.goals,
            found = found.len(),
            stop = ?stop,
            "search finished"
        );

        Ok(SearchOutcome {
            found,
            counts,
            stop,
        })
    }

    fn explore<S: Searchable>(&self, node: S, depth: usize, run: &Run<S>) {
        if run.stopped.load(Ordering::Relaxed) {
            return;
        }
        if node.is_goal() {
            run.record(node);
            return;
        }
        if depth >= self.max_depth {
            return;
        }
        if !run.tracker.try_expand() {
            if !run.budget_hit.swap(true, Ordering::AcqRel) {
                tracing::debug!(max_nodes = self.limits.max_nodes, "node budget exhausted");
            }
            run.stopped.store(true, Ordering::Release);
            return;
        }

        let mut children: Vec<S> = Vec::new();
        node.expand(&mut |c| children.push(c));
        run.tracker.bump_generated(children.len());
        drop(node);

        children
            .into_par_iter()
            .for_each(|c| self.explore(c, depth + 1, run));
    }
}

struct Run<S> {
    tracker: ResourceTracker,
    found: Mutex<Vec<S>>,
    stopped: AtomicBool,
    limit_hit: AtomicBool,
    budget_hit: AtomicBool,
    result_limit: usize,
}

impl<S: Searchable> Run<S> {
    fn record(&self, node: S) {
        self.tracker.bump_goals();
        let mut found = self.found.lock().unwrap_or_else(PoisonError::into_inner);
        if found.len() >= self.result_limit {
            return;
        }
        tracing::debug!(score = node.score(), found = found.len() + 1, "goal found");
        found.push(node);
        if found.len() >= self.result_limit {
            self.limit_hit.store(true, Ordering::Release);
            self.stopped.store(true, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A binary counter tree: goal when the path spells `target`.
    #[derive(Debug, Clone)]
    struct Bits {
        value: u32,
        len: u32,
        target: u32,
        target_len: u32,
    }

    impl Searchable for Bits {
        fn expand(&self, emit: &mut dyn FnMut(Self)) {
            for b in 0..2 {
                emit(Bits {
                    value: self.value << 1 | b,
                    len: self.len + 1,
                    ..self.clone()
                });
            }
        }

        fn is_goal(&self) -> bool {
            self.len == self.target_len && self.value == self.target
        }

        fn score(&self) -> i64 {
            -(self.len as i64)
        }
    }

    fn root(target: u32, target_len: u32) -> Bits {
        Bits {
            value: 0,
            len: 0,
            target,
            target_len,
        }
    }

    #[test]
    fn finds_single_leaf() {
        let out = ParallelSearch::new(4, 5, 8).run(root(0b10110, 5)).unwrap();
        assert_eq!(out.found.len(), 1);
        assert_eq!(out.stop, StopReason::Exhausted);
        assert_eq!(out.counts.expanded, 31);
    }

    #[test]
    fn depth_limit_hides_deeper_goal() {
        let out = ParallelSearch::new(2, 4, 8).run(root(0b10110, 5)).unwrap();
        assert!(!out.is_solved());
        assert_eq!(out.stop, StopReason::Exhausted);
    }

    #[test]
    fn node_budget_stops_search() {
        let out = ParallelSearch::new(1, 10, 8)
            .with_limits(ResourceLimits { max_nodes: 3 })
            .run(root(0, 10))
            .unwrap();
        assert_eq!(out.stop, StopReason::NodeBudget);
        assert_eq!(out.counts.expanded, 3);
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(
            ParallelSearch::new(0, 1, 1).run(root(0, 1)),
            Err(SearchError::InvalidConfig(_))
        ));
    }
}
