//! Test utilities for octree tests.
//!
//! Fixture trees: the single-leaf example tree, complete trees of a given
//! depth and seeded random sparse trees.

use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{InternalNode, Octree, OctreeNode, PointColorLeaf};
use crate::types::QueryBox;

// =============================================================================
// Fixed fixtures
// =============================================================================

/// Root `origin=(0,0,0), size=8` with one leaf `[42]` in octant 7
/// (`origin=(4,4,4), size=4`).
pub fn single_leaf_tree() -> Octree {
  let root = OctreeNode::internal([(7, OctreeNode::leaf(vec![42]))]).unwrap();
  Octree::new(Some(root), DVec3::ZERO, 8.0, 1).unwrap()
}

/// Complete tree: every internal node has all 8 children down to `depth`.
///
/// Leaves are numbered in pre-order; leaf `n` holds indices
/// `[n * 10, n * 10 + 1]`.
pub fn full_tree(depth: u32, origin: DVec3, size: f64) -> Octree {
  let mut next_leaf = 0;
  let root = full_node(depth, &mut next_leaf);
  Octree::new(Some(root), origin, size, depth).unwrap()
}

fn full_node(remaining: u32, next_leaf: &mut i64) -> OctreeNode {
  if remaining == 0 {
    let id = *next_leaf;
    *next_leaf += 1;
    return OctreeNode::leaf(vec![id * 10, id * 10 + 1]);
  }

  let mut node = InternalNode::new();
  for octant in 0..8u8 {
    node.set_child(octant, full_node(remaining - 1, next_leaf)).unwrap();
  }
  OctreeNode::Internal(node)
}

// =============================================================================
// Random fixtures
// =============================================================================

/// Sparse random tree of at most `max_depth` levels below the root.
///
/// Each octant is filled with probability 0.6; filled octants become leaves
/// at `max_depth` or with probability 0.3 earlier. Leaf indices are unique
/// and increase in pre-order.
pub fn random_tree(seed: u64, max_depth: u32, origin: DVec3, size: f64) -> Octree {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut next_index = 0;
  let root = random_internal(&mut rng, max_depth.max(1) - 1, &mut next_index);
  Octree::new(Some(root), origin, size, max_depth.max(1)).unwrap()
}

fn random_internal(rng: &mut StdRng, remaining: u32, next_index: &mut i64) -> OctreeNode {
  let mut node = InternalNode::new();
  for octant in 0..8u8 {
    if !rng.random_bool(0.6) {
      continue;
    }
    let child = if remaining == 0 || rng.random_bool(0.3) {
      let count = rng.random_range(1..4);
      let indices = (0..count)
        .map(|_| {
          *next_index += 1;
          *next_index
        })
        .collect();
      OctreeNode::Leaf(PointColorLeaf::new(indices))
    } else {
      random_internal(rng, remaining - 1, next_index)
    };
    node.set_child(octant, child).unwrap();
  }
  OctreeNode::Internal(node)
}

/// Random query box inside `[lo, hi]^3`; occasionally degenerate.
pub fn random_box(rng: &mut StdRng, lo: f64, hi: f64) -> QueryBox {
  let a = DVec3::new(
    rng.random_range(lo..hi),
    rng.random_range(lo..hi),
    rng.random_range(lo..hi),
  );
  if rng.random_bool(0.1) {
    return QueryBox::point(a);
  }
  let b = DVec3::new(
    rng.random_range(lo..hi),
    rng.random_range(lo..hi),
    rng.random_range(lo..hi),
  );
  QueryBox::new(a.min(b), a.max(b))
}
