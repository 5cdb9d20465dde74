//! OctreeNode - closed set of node variants making up a persisted octree.
//!
//! Internal nodes own up to 8 children; leaves carry point indices into an
//! external point store. Geometry is not stored on nodes, it is derived
//! while walking (see [`NodeInfo`](super::NodeInfo)).

use glam::DVec3;

use crate::error::OctreeError;

/// Owned child reference.
pub type Child = Box<OctreeNode>;

/// Fixed child slots of an internal node, indexed by octant.
pub type Children = [Option<Child>; 8];

/// Octree node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OctreeNode {
  /// Subdivided node. Children are sparse: empty octants are `None`.
  Internal(InternalNode),
  /// Terminal node holding point indices.
  Leaf(PointColorLeaf),
}

impl OctreeNode {
  /// Leaf holding the given point indices.
  pub fn leaf(indices: Vec<i64>) -> Self {
    Self::Leaf(PointColorLeaf::new(indices))
  }

  /// Internal node from `(octant, child)` pairs.
  pub fn internal<I>(children: I) -> Result<Self, OctreeError>
  where
    I: IntoIterator<Item = (u8, OctreeNode)>,
  {
    InternalNode::from_octants(children).map(Self::Internal)
  }

  /// Leaf payload, or `None` for internal nodes.
  #[inline]
  pub fn as_leaf(&self) -> Option<&PointColorLeaf> {
    match self {
      Self::Leaf(leaf) => Some(leaf),
      Self::Internal(_) => None,
    }
  }

  /// Child slots, or `None` for leaves.
  #[inline]
  pub fn as_internal(&self) -> Option<&Children> {
    match self {
      Self::Internal(node) => Some(&node.children),
      Self::Leaf(_) => None,
    }
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self, Self::Leaf(_))
  }

  #[inline]
  pub fn is_internal(&self) -> bool {
    matches!(self, Self::Internal(_))
  }
}

impl From<PointColorLeaf> for OctreeNode {
  fn from(leaf: PointColorLeaf) -> Self {
    Self::Leaf(leaf)
  }
}

impl From<InternalNode> for OctreeNode {
  fn from(node: InternalNode) -> Self {
    Self::Internal(node)
  }
}

/// Internal node: 8 optional children, no payload.
///
/// Octant: 0-7 where bits represent +X, +Y, +Z offsets:
/// - bit 0: X offset (0 or 1)
/// - bit 1: Y offset (0 or 1)
/// - bit 2: Z offset (0 or 1)
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InternalNode {
  pub children: Children,
}

impl InternalNode {
  /// Internal node with all octants empty.
  pub fn new() -> Self {
    Self::default()
  }

  /// Build from `(octant, child)` pairs. Later pairs replace earlier ones.
  pub fn from_octants<I>(children: I) -> Result<Self, OctreeError>
  where
    I: IntoIterator<Item = (u8, OctreeNode)>,
  {
    let mut node = Self::new();
    for (octant, child) in children {
      node.set_child(octant, child)?;
    }
    Ok(node)
  }

  /// Place `child` in `octant`, returning the previous occupant.
  pub fn set_child(&mut self, octant: u8, child: OctreeNode) -> Result<Option<Child>, OctreeError> {
    let slot = self
      .children
      .get_mut(usize::from(octant))
      .ok_or(OctreeError::InvalidOctant(octant))?;
    Ok(slot.replace(Box::new(child)))
  }

  /// Child in `octant`, if present.
  pub fn child(&self, octant: u8) -> Option<&OctreeNode> {
    self
      .children
      .get(usize::from(octant))
      .and_then(|slot| slot.as_deref())
  }

  /// Present children in octant order.
  pub fn present_children(&self) -> impl Iterator<Item = (u8, &OctreeNode)> {
    self
      .children
      .iter()
      .enumerate()
      .filter_map(|(octant, slot)| slot.as_deref().map(|child| (octant as u8, child)))
  }

  /// Number of non-empty octants.
  pub fn child_count(&self) -> usize {
    self.children.iter().filter(|slot| slot.is_some()).count()
  }
}

/// Leaf carrying indices of the points folded into its cell.
///
/// The color is an opaque attribute carried through untouched; spatial
/// queries never read it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointColorLeaf {
  /// Indices into the external point store, in insertion order.
  pub indices: Vec<i64>,
  /// Opaque color attribute.
  #[cfg_attr(feature = "serde", serde(default))]
  pub color: DVec3,
}

impl PointColorLeaf {
  /// Leaf with the given indices and a zero color.
  pub fn new(indices: Vec<i64>) -> Self {
    Self {
      indices,
      color: DVec3::ZERO,
    }
  }

  /// Attach a color attribute.
  #[must_use]
  pub fn with_color(mut self, color: DVec3) -> Self {
    self.color = color;
    self
  }

  /// Representative index: the first one listed.
  #[inline]
  pub fn first_index(&self) -> Option<i64> {
    self.indices.first().copied()
  }

  /// Number of points folded into this leaf.
  #[inline]
  pub fn point_count(&self) -> usize {
    self.indices.len()
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
