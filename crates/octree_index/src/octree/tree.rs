//! Octree - root aggregate handed to queries by an external loader.

use std::sync::Arc;

use glam::DVec3;

use super::region::Region;
use super::traversal::{traverse, Visit};
use super::{OctreeNode, PointColorLeaf};
use crate::error::OctreeError;

/// Per-node metadata computed while descending. Never stored on nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeInfo {
  /// Cube this node is responsible for.
  pub region: Region,
  /// Distance from the root (root = 0).
  pub depth: u32,
}

impl NodeInfo {
  /// Info for a root node covering `region`.
  pub fn root(region: Region) -> Self {
    Self { region, depth: 0 }
  }

  /// Info for the child in `octant`: half the size, one level deeper.
  #[inline]
  pub fn child(&self, octant: u8) -> Self {
    Self {
      region: self.region.child(octant),
      depth: self.depth + 1,
    }
  }
}

/// Region of the node described by `info`.
#[inline]
pub fn region_of(info: &NodeInfo) -> Region {
  info.region
}

/// Shared handle for trees queried from several threads at once.
pub type SharedOctree = Arc<Octree>;

/// Immutable octree.
///
/// Built once through [`Octree::new`], which checks the root geometry and
/// depth bound, then only read.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(try_from = "OctreeParts", into = "OctreeParts")
)]
pub struct Octree {
  root: Option<OctreeNode>,
  origin: DVec3,
  size: f64,
  max_depth: u32,
}

impl Octree {
  /// Assemble a tree, rejecting bad root geometry and over-deep nodes.
  ///
  /// `max_depth` is the subdivision bound the tree was built with; a node
  /// deeper than that means the input is not the tree it claims to be.
  pub fn new(
    root: Option<OctreeNode>,
    origin: DVec3,
    size: f64,
    max_depth: u32,
  ) -> Result<Self, OctreeError> {
    if !origin.is_finite() {
      return Err(OctreeError::InvalidOrigin);
    }
    if !size.is_finite() || size <= 0.0 {
      return Err(OctreeError::InvalidSize(size));
    }

    if let Some(depth) = root.as_ref().map(|node| deepest(node, 0)) {
      if depth > max_depth {
        #[cfg(feature = "tracing")]
        tracing::warn!(depth, max_depth, "rejecting octree deeper than its max depth");
        return Err(OctreeError::DepthExceeded { depth, max_depth });
      }
    }

    Ok(Self {
      root,
      origin,
      size,
      max_depth,
    })
  }

  /// Tree with no nodes. Every query over it is empty.
  pub fn empty(origin: DVec3, size: f64, max_depth: u32) -> Result<Self, OctreeError> {
    Self::new(None, origin, size, max_depth)
  }

  #[inline]
  pub fn root(&self) -> Option<&OctreeNode> {
    self.root.as_ref()
  }

  #[inline]
  pub fn origin(&self) -> DVec3 {
    self.origin
  }

  #[inline]
  pub fn size(&self) -> f64 {
    self.size
  }

  #[inline]
  pub fn max_depth(&self) -> u32 {
    self.max_depth
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.root.is_none()
  }

  /// Region covered by the root.
  #[inline]
  pub fn region(&self) -> Region {
    Region::new(self.origin, self.size)
  }

  /// Traversal info of the root node.
  #[inline]
  pub fn root_info(&self) -> NodeInfo {
    NodeInfo::root(self.region())
  }

  /// Depth of the deepest node, or `None` for an empty tree.
  pub fn depth(&self) -> Option<u32> {
    self.root.as_ref().map(|node| deepest(node, 0))
  }

  /// Every leaf with its traversal info, in pre-order.
  pub fn leaves(&self) -> Vec<(NodeInfo, &PointColorLeaf)> {
    let mut leaves = Vec::new();
    traverse(self, |node, info| {
      if let Some(leaf) = node.as_leaf() {
        leaves.push((*info, leaf));
      }
      Visit::Continue
    });
    leaves
  }

  /// Number of leaves in the tree.
  pub fn leaf_count(&self) -> usize {
    let mut count = 0;
    traverse(self, |node, _| {
      count += usize::from(node.is_leaf());
      Visit::Continue
    });
    count
  }

  /// Wrap in an [`Arc`] for concurrent read-only queries.
  pub fn into_shared(self) -> SharedOctree {
    Arc::new(self)
  }
}

fn deepest(node: &OctreeNode, depth: u32) -> u32 {
  match node {
    OctreeNode::Leaf(_) => depth,
    OctreeNode::Internal(internal) => internal
      .present_children()
      .map(|(_, child)| deepest(child, depth + 1))
      .max()
      .unwrap_or(depth),
  }
}

/// Unvalidated persisted form of [`Octree`]; deserialization goes through
/// [`Octree::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct OctreeParts {
  root: Option<OctreeNode>,
  origin: DVec3,
  size: f64,
  max_depth: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<OctreeParts> for Octree {
  type Error = OctreeError;

  fn try_from(parts: OctreeParts) -> Result<Self, Self::Error> {
    Self::new(parts.root, parts.origin, parts.size, parts.max_depth)
  }
}

#[cfg(feature = "serde")]
impl From<Octree> for OctreeParts {
  fn from(tree: Octree) -> Self {
    Self {
      root: tree.root,
      origin: tree.origin,
      size: tree.size,
      max_depth: tree.max_depth,
    }
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
