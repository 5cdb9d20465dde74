//! Core value types shared by queries and the tree model.

use glam::DVec3;

/// Query box handed to the octree by a caller.
///
/// Corners are taken as given: an inverted box (`min > max` on some axis) is
/// not rejected, it simply intersects nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryBox {
  /// Minimum corner (inclusive).
  pub min: DVec3,
  /// Maximum corner (inclusive).
  pub max: DVec3,
}

impl QueryBox {
  /// Create a query box from min and max corners.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    Self { min, max }
  }

  /// Create a query box from raw coordinate triples.
  pub fn from_arrays(min: [f64; 3], max: [f64; 3]) -> Self {
    Self {
      min: DVec3::from_array(min),
      max: DVec3::from_array(max),
    }
  }

  /// View cube centered on a camera position.
  ///
  /// `size` is the full edge length, so each axis spans `center ± size / 2`.
  pub fn from_center_size(center: DVec3, size: f64) -> Self {
    let half = DVec3::splat(size * 0.5);
    Self {
      min: center - half,
      max: center + half,
    }
  }

  /// Degenerate box covering a single point.
  pub fn point(p: DVec3) -> Self {
    Self { min: p, max: p }
  }

  /// True if `min > max` on any axis.
  #[inline]
  pub fn is_inverted(&self) -> bool {
    self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
  }

  /// Get the center of the box.
  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }
}
