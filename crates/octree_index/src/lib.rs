//! octree_index - read-only octree spatial index for point-cloud queries
//!
//! This crate answers "which leaves of a persisted octree intersect this
//! box" without scanning every leaf. Trees are produced elsewhere (a builder
//! or a deserializer) and treated as immutable; queries walk them top-down
//! and prune every subtree whose cube misses the box.
//!
//! # Features
//!
//! - **Closed node model**: `OctreeNode::{Internal, Leaf}` with sparse
//!   8-way children and point-index leaves
//! - **Visitor traversal**: deterministic pre-order walk with explicit
//!   `Visit::{Continue, Prune}` decisions
//! - **Box queries**: inclusive-boundary AABB test, one representative
//!   index per leaf or every index on request
//! - **Batch queries**: independent boxes answered in parallel with rayon
//! - **LOD paging**: hand out a leaf's particles batch by batch across
//!   repeated requests
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use octree_index::{intersecting_leaf_indices, Octree, OctreeNode, QueryBox};
//!
//! // Root cube 0..8 with one leaf in octant 7 (4..8 on every axis).
//! let root = OctreeNode::internal([(7, OctreeNode::leaf(vec![42]))]).unwrap();
//! let tree = Octree::new(Some(root), DVec3::ZERO, 8.0, 1).unwrap();
//!
//! let hit = QueryBox::new(DVec3::splat(3.0), DVec3::splat(5.0));
//! assert_eq!(intersecting_leaf_indices(&tree, &hit), vec![42]);
//!
//! let miss = QueryBox::new(DVec3::ZERO, DVec3::splat(2.0));
//! assert!(intersecting_leaf_indices(&tree, &miss).is_empty());
//! ```

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::OctreeError;
pub use types::QueryBox;

// Octree model, traversal and box queries
pub mod octree;
pub use octree::{
  intersecting_leaf_indices, intersecting_leaf_indices_all, query_batch, traverse,
  InternalNode, LeafSampling, NodeInfo, Octree, OctreeNode, PointColorLeaf, QueryConfig, Region,
  SharedOctree, Visit,
};

// Progressive per-leaf particle paging
pub mod lod;
pub use lod::{LeafParticles, LevelOfDetail, LodBatch, LodConfig};

// Engine-agnostic query metrics
pub mod metrics;
