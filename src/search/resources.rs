//! Resource budgets and counters for the search engine.
//!
//! The tree explodes combinatorially with the turn budget, so the engine stops after a fixed
//! number of expanded nodes. Counters are atomics shared by every worker; budgets are checked
//! approximately (workers may overshoot by at most one node each).

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Search budgets.
pub struct ResourceLimits {
    /// Expanded nodes before the search gives up.
    pub max_nodes: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_nodes: 50_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Counter snapshot taken when a search finishes.
pub struct ResourceCounts {
    /// Nodes whose successors were generated.
    pub expanded: u64,
    /// Successors emitted by the move generator.
    pub generated: u64,
    /// Goal nodes encountered (including any beyond the result limit).
    pub goals: u64,
}

#[derive(Debug, Default)]
/// Shared counters for one search run.
pub struct ResourceTracker {
    limits: ResourceLimits,
    expanded: AtomicU64,
    generated: AtomicU64,
    goals: AtomicU64,
}

impl ResourceTracker {
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            limits,
            expanded: AtomicU64::new(0),
            generated: AtomicU64::new(0),
            goals: AtomicU64::new(0),
        }
    }

    /// Count one expansion; `false` once the node budget is spent.
    #[inline]
    pub fn try_expand(&self) -> bool {
        let observed = self.expanded.fetch_add(1, Ordering::Relaxed) + 1;
        observed <= self.limits.max_nodes
    }

    #[inline]
    pub fn bump_generated(&self, delta: usize) {
        self.generated.fetch_add(delta as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn bump_goals(&self) {
        self.goals.fetch_add(1, Ordering::Relaxed);
    }

    pub fn counts(&self) -> ResourceCounts {
        ResourceCounts {
            expanded: self
                .expanded
                .load(Ordering::Relaxed)
                .min(self.limits.max_nodes),
            generated: self.generated.load(Ordering::Relaxed),
            goals: self.goals.load(Ordering::Relaxed),
        }
    }
}
