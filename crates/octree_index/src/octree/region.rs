//! Cubic node regions and the octant convention used by every tree walk.

use glam::DVec3;

use crate::types::QueryBox;

/// Axis-aligned cube covered by one octree node.
///
/// Stored as minimum corner plus edge length; the maximum corner is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
	/// Minimum corner (inclusive).
	pub origin: DVec3,
	/// Edge length, positive for well-formed trees.
	pub size: f64,
}

impl Region {
	/// Create a region from its minimum corner and edge length.
	pub fn new(origin: DVec3, size: f64) -> Self {
		Self { origin, size }
	}

	/// Maximum corner: `origin + (size, size, size)`.
	#[inline]
	pub fn max_corner(&self) -> DVec3 {
		self.origin + DVec3::splat(self.size)
	}

	/// Get the center of the region.
	#[inline]
	pub fn center(&self) -> DVec3 {
		self.origin + DVec3::splat(self.size * 0.5)
	}

	/// Volume of the cube.
	#[inline]
	pub fn volume(&self) -> f64 {
		self.size * self.size * self.size
	}

	/// Region of the child in `octant`. See [`child_region`].
	#[inline]
	pub fn child(&self, octant: u8) -> Region {
		child_region(self, octant)
	}

	/// Check if `other` lies fully inside this region (boundaries inclusive).
	pub fn contains_region(&self, other: &Region) -> bool {
		let (min, max) = (self.origin, self.max_corner());
		let (other_min, other_max) = (other.origin, other.max_corner());
		other_min.cmpge(min).all() && other_max.cmple(max).all()
	}

	/// Check if this region overlaps a query box.
	///
	/// Touching counts: a shared face, edge or corner is an intersection.
	#[inline]
	pub fn intersects(&self, query: &QueryBox) -> bool {
		boxes_overlap(self.origin, self.max_corner(), query.min, query.max)
	}
}

/// Maximum corner of `region`.
#[inline]
pub fn max_corner(region: &Region) -> DVec3 {
	region.max_corner()
}

/// Unit offset of an octant within its parent.
///
/// Bit 0 selects +X, bit 1 +Y, bit 2 +Z. Only the low three bits are read.
#[inline]
pub fn octant_offset(octant: u8) -> DVec3 {
	DVec3::new(
		(octant & 1) as f64,
		((octant >> 1) & 1) as f64,
		((octant >> 2) & 1) as f64,
	)
}

/// Region of the child in `octant`: half the edge, origin shifted by
/// `half * octant_offset(octant)`.
#[inline]
pub fn child_region(parent: &Region, octant: u8) -> Region {
	let half = parent.size * 0.5;
	Region {
		origin: parent.origin + octant_offset(octant) * half,
		size: half,
	}
}

/// Inclusive AABB overlap test.
///
/// Per axis `overlap = min(a_max, b_max) - max(a_min, b_min)`; the boxes
/// intersect iff the overlap is `>= 0` on all three axes. An inverted box
/// yields a negative overlap on its inverted axis.
#[inline]
pub fn boxes_overlap(a_min: DVec3, a_max: DVec3, b_min: DVec3, b_max: DVec3) -> bool {
	let overlap = a_max.min(b_max) - a_min.max(b_min);
	overlap.x >= 0.0 && overlap.y >= 0.0 && overlap.z >= 0.0
}
