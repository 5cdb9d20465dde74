//! Octree module: read-only spatial index over persisted point-cloud trees.
//!
//! The tree is an explicit, sparse octree: internal nodes own up to 8
//! children and leaves hold point indices. Node geometry is not stored; it
//! is recomputed while descending from the root region.
//!
//! # Octant Convention
//!
//! ```text
//! child.origin = parent.origin + (size / 2) * (bit0, bit1, bit2)
//! child.size   = parent.size / 2
//! ```
//!
//! bit 0 = +X, bit 1 = +Y, bit 2 = +Z. Loaders must place children by the
//! same convention or queries will look in the wrong cells.
//!
//! # Module Structure
//!
//! - [`region`]: `Region` cubes, octant math and the inclusive overlap test
//! - [`node`]: `OctreeNode` - internal / leaf variants
//! - [`tree`]: `Octree` root aggregate and per-node `NodeInfo`
//! - [`traversal`]: visitor-driven pre-order walk
//! - [`query`]: box-intersection queries on top of the walk

pub mod node;
pub mod query;
pub mod region;
pub mod traversal;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports
pub use node::{Child, Children, InternalNode, OctreeNode, PointColorLeaf};
pub use query::{
  collect_into, intersecting_leaf_indices, intersecting_leaf_indices_all, query_batch,
  query_with, query_with_stats, LeafSampling, QueryConfig, QueryStats,
};
pub use region::{boxes_overlap, child_region, max_corner, octant_offset, Region};
pub use traversal::{traverse, Visit};
pub use tree::{region_of, NodeInfo, Octree, SharedOctree};
