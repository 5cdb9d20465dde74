//! Depth-first pre-order walk driven by a visitor.
//!
//! The visitor sees every reached node together with its [`NodeInfo`] and
//! decides whether the walk descends below it. Children are visited in
//! octant order 0..7, so a fixed tree always yields the same visit order.

use super::tree::{NodeInfo, Octree};
use super::OctreeNode;

/// Visitor decision at a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
  /// Descend into this node's children (no-op for leaves).
  Continue,
  /// Skip everything below this node.
  Prune,
}

/// Walk `tree` top-down, calling `visit` on every reached node.
///
/// An empty tree visits nothing. Leaves never descend, whatever the visitor
/// returns. Absent octants are skipped.
pub fn traverse<'a, F>(tree: &'a Octree, mut visit: F)
where
  F: FnMut(&'a OctreeNode, &NodeInfo) -> Visit,
{
  let Some(root) = tree.root() else {
    return;
  };
  walk(root, &tree.root_info(), &mut visit);
}

fn walk<'a, F>(node: &'a OctreeNode, info: &NodeInfo, visit: &mut F)
where
  F: FnMut(&'a OctreeNode, &NodeInfo) -> Visit,
{
  if visit(node, info) == Visit::Prune {
    return;
  }

  if let Some(children) = node.as_internal() {
    for (octant, slot) in children.iter().enumerate() {
      if let Some(child) = slot {
        walk(child, &info.child(octant as u8), visit);
      }
    }
  }
}

impl Octree {
  /// Method form of [`traverse`].
  pub fn traverse<'a, F>(&'a self, visit: F)
  where
    F: FnMut(&'a OctreeNode, &NodeInfo) -> Visit,
  {
    traverse(self, visit)
  }
}

#[cfg(test)]
#[path = "traversal_test.rs"]
mod traversal_test;
