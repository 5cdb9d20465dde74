//! Progressive level-of-detail paging over leaf particle groups.
//!
//! A viewer that keeps asking for the same region should receive new
//! particles each time instead of the same ones. Particles are stored grouped
//! by leaf; each request hands out the next `batch_size` particles of every
//! requested leaf and bumps that leaf's level for the client.
//!
//! ```text
//! particles = [1,2,3,4, 5,6,7, 8,9,10,11]
//! offsets   = [0,       4,     7        ]
//! leaf i spans offsets[i]..offsets[i + 1]   (last leaf: ..particles.len())
//! ```

use std::collections::HashMap;
use std::ops::Range;

use crate::error::OctreeError;

/// Per-client paging state: leaf index -> batches already delivered.
pub type LevelOfDetail = HashMap<i64, i64>;

/// Paging configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LodConfig {
  /// Particles handed out per leaf per request. Must be positive.
  pub batch_size: i64,
}

impl LodConfig {
  pub const DEFAULT: Self = Self { batch_size: 256 };
}

impl Default for LodConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Result of one paging request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LodBatch {
  /// Particle ids, grouped by leaf in request order.
  pub particles: Vec<i64>,
}

impl LodBatch {
  #[inline]
  pub fn n_particles(&self) -> usize {
    self.particles.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.particles.is_empty()
  }
}

/// Particle ids grouped by leaf, with the start offset of every group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafParticles {
  particles: Vec<i64>,
  offsets: Vec<i64>,
}

impl LeafParticles {
  /// Build a table; offsets must be non-decreasing and within the list.
  pub fn new(particles: Vec<i64>, offsets: Vec<i64>) -> Result<Self, OctreeError> {
    let len = particles.len();
    let in_bounds = offsets
      .iter()
      .all(|&offset| usize::try_from(offset).is_ok_and(|o| o <= len));
    let sorted = offsets.windows(2).all(|pair| pair[0] <= pair[1]);
    if !in_bounds || !sorted {
      return Err(OctreeError::InvalidOffsets { len });
    }
    Ok(Self { particles, offsets })
  }

  /// Number of leaves in the table.
  #[inline]
  pub fn leaf_count(&self) -> usize {
    self.offsets.len()
  }

  /// Total number of particles.
  #[inline]
  pub fn particle_count(&self) -> usize {
    self.particles.len()
  }

  /// Position of `leaf`'s group inside the particle list.
  pub fn leaf_range(&self, leaf: i64) -> Result<Range<usize>, OctreeError> {
    let out_of_range = || OctreeError::LeafOutOfRange {
      leaf,
      leaves: self.offsets.len(),
    };
    let i = usize::try_from(leaf).map_err(|_| out_of_range())?;
    let start = *self.offsets.get(i).ok_or_else(out_of_range)?;
    let end = self
      .offsets
      .get(i + 1)
      .copied()
      .unwrap_or(self.particles.len() as i64);
    // Offsets are validated as non-negative and in bounds.
    Ok(start as usize..end as usize)
  }

  /// All particles of `leaf`.
  pub fn leaf_particles(&self, leaf: i64) -> Result<&[i64], OctreeError> {
    self.leaf_range(leaf).map(|range| &self.particles[range])
  }

  /// Next batch for every leaf in `leaves`, advancing `state`.
  ///
  /// Unknown leaves start at level 0. Every requested leaf moves up one
  /// level, also when it had nothing left to give. The state is untouched
  /// if any leaf is outside the table.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "lod::next_batch"))]
  pub fn next_batch(
    &self,
    leaves: &[i64],
    state: &mut LevelOfDetail,
    config: LodConfig,
  ) -> Result<LodBatch, OctreeError> {
    if config.batch_size <= 0 {
      return Err(OctreeError::InvalidBatchSize(config.batch_size));
    }
    let ranges = leaves
      .iter()
      .map(|&leaf| self.leaf_range(leaf))
      .collect::<Result<Vec<_>, _>>()?;

    let batch = config.batch_size as usize;
    let mut particles = Vec::new();
    for (&leaf, range) in leaves.iter().zip(ranges) {
      let level = state.entry(leaf).or_insert(0);
      // Client-supplied levels below 0 restart the leaf.
      let level = usize::try_from(*level).unwrap_or(0);

      let start = range
        .start
        .saturating_add(level.saturating_mul(batch))
        .min(range.end);
      let end = start.saturating_add(batch).min(range.end);
      particles.extend_from_slice(&self.particles[start..end]);
    }

    for leaf in leaves {
      if let Some(level) = state.get_mut(leaf) {
        *level = level.saturating_add(1);
      }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
      leaves = leaves.len(),
      particles = particles.len(),
      "paged leaf particles"
    );

    Ok(LodBatch { particles })
  }
}

#[cfg(test)]
#[path = "lod_test.rs"]
mod lod_test;
