//! Box-intersection queries built on [`traverse`].
//!
//! A node whose region misses the query box is pruned with its whole
//! subtree. Surviving leaves report indices in traversal order.
//!
//! # Leaf sampling
//!
//! By default a matching leaf reports only its **first** index: one
//! representative sample per cell. [`LeafSampling::All`] is a distinct mode
//! that reports every index of every matching leaf.

use rayon::prelude::*;

use super::traversal::{traverse, Visit};
use super::tree::Octree;
use super::OctreeNode;
use crate::types::QueryBox;

/// What a matching leaf contributes to the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeafSampling {
  /// First listed index only.
  #[default]
  First,
  /// Every index, in leaf order.
  All,
}

/// Query configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryConfig {
  pub sampling: LeafSampling,
}

impl QueryConfig {
  /// One representative index per matching leaf.
  pub const FIRST_INDEX: Self = Self {
    sampling: LeafSampling::First,
  };

  /// All indices of every matching leaf.
  pub const ALL_INDICES: Self = Self {
    sampling: LeafSampling::All,
  };
}

impl Default for QueryConfig {
  fn default() -> Self {
    Self::FIRST_INDEX
  }
}

/// Counters gathered during one query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryStats {
  /// Nodes handed to the visitor.
  pub nodes_visited: usize,
  /// Nodes whose region missed the box (subtree skipped).
  pub nodes_pruned: usize,
  /// Leaves whose region hit the box.
  pub leaves_matched: usize,
}

/// First index of every leaf intersecting `query`, in traversal order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::intersecting_leaf_indices"))]
pub fn intersecting_leaf_indices(tree: &Octree, query: &QueryBox) -> Vec<i64> {
  query_with(tree, query, QueryConfig::FIRST_INDEX)
}

/// Every index of every leaf intersecting `query`, in traversal order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::intersecting_leaf_indices_all"))]
pub fn intersecting_leaf_indices_all(tree: &Octree, query: &QueryBox) -> Vec<i64> {
  query_with(tree, query, QueryConfig::ALL_INDICES)
}

/// Run a query with an explicit configuration.
pub fn query_with(tree: &Octree, query: &QueryBox, config: QueryConfig) -> Vec<i64> {
  let mut results = Vec::new();
  collect_into(tree, query, config, &mut results);
  results
}

/// Append matches to `results` (not cleared), so one buffer can serve
/// many queries.
pub fn collect_into(tree: &Octree, query: &QueryBox, config: QueryConfig, results: &mut Vec<i64>) {
  let mut stats = QueryStats::default();
  run(tree, query, config, results, &mut stats);
}

/// Run a query and report how much of the tree it touched.
pub fn query_with_stats(tree: &Octree, query: &QueryBox, config: QueryConfig) -> (Vec<i64>, QueryStats) {
  let mut results = Vec::new();
  let mut stats = QueryStats::default();
  run(tree, query, config, &mut results, &mut stats);
  (results, stats)
}

/// Answer independent queries in parallel. Output order matches `queries`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::query_batch"))]
pub fn query_batch(tree: &Octree, queries: &[QueryBox], config: QueryConfig) -> Vec<Vec<i64>> {
  queries
    .par_iter()
    .map(|query| query_with(tree, query, config))
    .collect()
}

fn run(
  tree: &Octree,
  query: &QueryBox,
  config: QueryConfig,
  results: &mut Vec<i64>,
  stats: &mut QueryStats,
) {
  traverse(tree, |node, info| {
    stats.nodes_visited += 1;

    if !info.region.intersects(query) {
      stats.nodes_pruned += 1;
      return Visit::Prune;
    }

    match node {
      OctreeNode::Leaf(leaf) => {
        stats.leaves_matched += 1;
        match config.sampling {
          LeafSampling::First => results.extend(leaf.first_index()),
          LeafSampling::All => results.extend_from_slice(&leaf.indices),
        }
        Visit::Prune
      }
      OctreeNode::Internal(_) => Visit::Continue,
    }
  });
}

impl Octree {
  /// Method form of [`intersecting_leaf_indices`].
  pub fn intersecting_leaf_indices(&self, query: &QueryBox) -> Vec<i64> {
    intersecting_leaf_indices(self, query)
  }

  /// Method form of [`query_with`].
  pub fn query(&self, query: &QueryBox, config: QueryConfig) -> Vec<i64> {
    query_with(self, query, config)
  }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;
