//! Construction-time errors.
//!
//! Queries and traversal never fail; everything here is raised while a tree
//! or a particle table is being assembled from external input.

use thiserror::Error;

/// Errors raised when building octree or LOD structures from external data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OctreeError {
  #[error("octree size must be finite and positive, got {0}")]
  InvalidSize(f64),

  #[error("octree origin must be finite")]
  InvalidOrigin,

  #[error("octant {0} is outside 0..8")]
  InvalidOctant(u8),

  #[error("node at depth {depth} exceeds max depth {max_depth}")]
  DepthExceeded { depth: u32, max_depth: u32 },

  #[error("leaf {leaf} is outside the particle table ({leaves} leaves)")]
  LeafOutOfRange { leaf: i64, leaves: usize },

  #[error("particle offsets must be non-decreasing and within 0..={len}")]
  InvalidOffsets { len: usize },

  #[error("LOD batch size must be positive, got {0}")]
  InvalidBatchSize(i64),
}
