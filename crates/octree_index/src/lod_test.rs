use glam::DVec3;

use super::*;
use crate::octree::{intersecting_leaf_indices, Octree, OctreeNode};
use crate::types::QueryBox;

/// 21 particles over 5 leaves: sizes 4, 3, 4, 6, 4.
fn table() -> LeafParticles {
  LeafParticles::new((1..=21).collect(), vec![0, 4, 7, 11, 17]).unwrap()
}

// =========================================================================
// Table construction
// =========================================================================

#[test]
fn test_rejects_bad_offsets() {
  let decreasing = LeafParticles::new(vec![1, 2, 3], vec![0, 2, 1]);
  let past_end = LeafParticles::new(vec![1, 2, 3], vec![0, 4]);
  let negative = LeafParticles::new(vec![1, 2, 3], vec![-1, 2]);

  for result in [decreasing, past_end, negative] {
    assert_eq!(result.unwrap_err(), OctreeError::InvalidOffsets { len: 3 });
  }
}

#[test]
fn test_leaf_ranges() {
  let table = table();
  assert_eq!(table.leaf_count(), 5);
  assert_eq!(table.particle_count(), 21);
  assert_eq!(table.leaf_range(0).unwrap(), 0..4);
  assert_eq!(table.leaf_particles(2).unwrap(), &[8, 9, 10, 11]);
  // Last leaf runs to the end of the particle list.
  assert_eq!(table.leaf_particles(4).unwrap(), &[18, 19, 20, 21]);
}

#[test]
fn test_leaf_out_of_range() {
  let table = table();
  assert_eq!(
    table.leaf_range(5).unwrap_err(),
    OctreeError::LeafOutOfRange { leaf: 5, leaves: 5 }
  );
  assert!(table.leaf_range(-1).is_err());
}

// =========================================================================
// Paging
// =========================================================================

/// Mixed known and new leaves: known ones continue where they stopped.
#[test]
fn test_next_batch_mixed_levels() {
  let table = table();
  let mut state = LevelOfDetail::from([(0, 1), (1, 1), (3, 1)]);

  let batch = table
    .next_batch(&[1, 2, 3, 4], &mut state, LodConfig { batch_size: 2 })
    .unwrap();

  assert_eq!(batch.particles, vec![7, 8, 9, 14, 15, 18, 19]);
  assert_eq!(batch.n_particles(), 7);

  let mut keys: Vec<i64> = state.keys().copied().collect();
  keys.sort();
  assert_eq!(keys, vec![0, 1, 2, 3, 4]);
  assert_eq!(state[&0], 1, "Unrequested leaf keeps its level");
  assert_eq!(state[&1], 2);
  assert_eq!(state[&2], 1);
  assert_eq!(state[&3], 2);
  assert_eq!(state[&4], 1);
}

/// Repeated requests walk through a leaf and then run dry.
#[test]
fn test_repeated_requests_exhaust_leaf() {
  let table = table();
  let mut state = LevelOfDetail::new();
  let config = LodConfig { batch_size: 3 };

  let pages: Vec<Vec<i64>> = (0..4)
    .map(|_| table.next_batch(&[3], &mut state, config).unwrap().particles)
    .collect();

  assert_eq!(pages[0], vec![12, 13, 14]);
  assert_eq!(pages[1], vec![15, 16, 17]);
  assert!(pages[2].is_empty());
  assert!(pages[3].is_empty());
  assert_eq!(state[&3], 4, "Level still advances on empty pages");
}

#[test]
fn test_out_of_range_leaf_leaves_state_untouched() {
  let table = table();
  let mut state = LevelOfDetail::from([(0, 2)]);

  let err = table
    .next_batch(&[0, 1, 99], &mut state, LodConfig::DEFAULT)
    .unwrap_err();

  assert_eq!(err, OctreeError::LeafOutOfRange { leaf: 99, leaves: 5 });
  assert_eq!(state, LevelOfDetail::from([(0, 2)]));
}

#[test]
fn test_rejects_non_positive_batch_size() {
  let table = table();
  let mut state = LevelOfDetail::new();
  for batch_size in [0, -4] {
    assert_eq!(
      table
        .next_batch(&[0], &mut state, LodConfig { batch_size })
        .unwrap_err(),
      OctreeError::InvalidBatchSize(batch_size)
    );
  }
  assert!(state.is_empty());
}

#[test]
fn test_negative_level_restarts_leaf() {
  let table = table();
  let mut state = LevelOfDetail::from([(0, -3)]);
  let batch = table
    .next_batch(&[0], &mut state, LodConfig { batch_size: 2 })
    .unwrap();
  assert_eq!(batch.particles, vec![1, 2]);
  assert_eq!(state[&0], -2);
}

// =========================================================================
// Query -> paging
// =========================================================================

/// Leaves whose first index is their row in the particle table feed paging
/// straight from a box query.
#[test]
fn test_query_feeds_paging() {
  let root = OctreeNode::internal([
    (1, OctreeNode::leaf(vec![1])),
    (2, OctreeNode::leaf(vec![2])),
    (3, OctreeNode::leaf(vec![3])),
    (4, OctreeNode::leaf(vec![4])),
  ])
  .unwrap();
  let tree = Octree::new(Some(root), DVec3::ZERO, 2.0, 1).unwrap();

  let camera = QueryBox::from_center_size(DVec3::ONE, 2.0);
  let leaves = intersecting_leaf_indices(&tree, &camera);
  assert_eq!(leaves, vec![1, 2, 3, 4]);

  let mut state = LevelOfDetail::new();
  let batch = table()
    .next_batch(&leaves, &mut state, LodConfig { batch_size: 1 })
    .unwrap();
  assert_eq!(batch.particles, vec![5, 8, 12, 18]);
}
