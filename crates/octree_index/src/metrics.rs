//! Query metrics: how much of the tree box queries touch, and how long
//! they take.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use octree_index::metrics::{QueryMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let mut metrics = QueryMetrics::new();
//! let leaves = metrics.measure(&tree, &query, QueryConfig::default());
//! println!("avg {} us", metrics.avg_query_timing_us());
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::octree::QueryStats;
#[cfg(feature = "metrics")]
use crate::octree::{query_with_stats, Octree, QueryConfig};
#[cfg(feature = "metrics")]
use crate::types::QueryBox;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    /// Average of the stored values, 0 when empty.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Cumulative statistics over many box queries.
#[derive(Debug, Clone, Default)]
pub struct QueryMetrics {
    /// Queries recorded.
    pub queries: u64,
    /// Nodes handed to the visitor, summed over queries.
    pub nodes_visited: u64,
    /// Nodes pruned by the overlap test, summed over queries.
    pub nodes_pruned: u64,
    /// Leaves that matched, summed over queries.
    pub leaves_matched: u64,
    /// Rolling window of query times in microseconds.
    pub query_timings: RollingWindow<u64>,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything, including the timing window.
    pub fn reset(&mut self) {
        *self = Self {
            query_timings: RollingWindow::new(self.query_timings.capacity),
            ..Self::default()
        };
    }

    /// Fold the counters of one query in.
    pub fn record(&mut self, stats: &QueryStats) {
        if !is_enabled() {
            return;
        }
        self.queries += 1;
        self.nodes_visited += stats.nodes_visited as u64;
        self.nodes_pruned += stats.nodes_pruned as u64;
        self.leaves_matched += stats.leaves_matched as u64;
    }

    /// Record a query timing.
    pub fn record_query_timing(&mut self, timing_us: u64) {
        if is_enabled() {
            self.query_timings.push(timing_us);
        }
    }

    /// Share of visited nodes that were pruned, in 0..=1.
    pub fn prune_ratio(&self) -> f64 {
        if self.nodes_visited == 0 {
            0.0
        } else {
            self.nodes_pruned as f64 / self.nodes_visited as f64
        }
    }

    /// Get average query timing in microseconds.
    pub fn avg_query_timing_us(&self) -> f64 {
        self.query_timings.average()
    }

    /// Run a query, recording its counters and duration.
    #[cfg(feature = "metrics")]
    pub fn measure(&mut self, tree: &Octree, query: &QueryBox, config: QueryConfig) -> Vec<i64> {
        let start = web_time::Instant::now();
        let (results, stats) = query_with_stats(tree, query, config);
        let elapsed = start.elapsed().as_micros() as u64;

        self.record(&stats);
        self.record_query_timing(elapsed);
        results
    }
}
