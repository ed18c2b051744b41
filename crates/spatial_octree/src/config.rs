//! OctreeConfig - split policy for octree nodes.

use glam::DVec3;

use crate::error::{OctreeError, Result};

/// Split policy shared by every node of one tree.
///
/// Fixed when the tree is constructed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OctreeConfig {
  /// Soft occupancy threshold. A leaf that would reach this many entities
  /// tries to split.
  pub preferred_max_data_per_node: usize,

  /// Hard size floor, in the same units as the root bounds. A node smaller
  /// than this along any axis never splits, however full it gets.
  pub minimum_node_size: f64,
}

impl OctreeConfig {
  /// Default split threshold.
  pub const DEFAULT_PREFERRED_MAX_DATA_PER_NODE: usize = 50;
  /// Default size floor.
  pub const DEFAULT_MINIMUM_NODE_SIZE: f64 = 5.0;

  /// Config with the given threshold and floor.
  pub fn new(preferred_max_data_per_node: usize, minimum_node_size: f64) -> Self {
    Self {
      preferred_max_data_per_node,
      minimum_node_size,
    }
  }

  pub fn with_preferred_max_data_per_node(mut self, count: usize) -> Self {
    self.preferred_max_data_per_node = count;
    self
  }

  pub fn with_minimum_node_size(mut self, size: f64) -> Self {
    self.minimum_node_size = size;
    self
  }

  /// Whether a leaf holding `count_after_insert` entities has hit the
  /// split threshold.
  #[inline]
  pub fn should_split(&self, count_after_insert: usize) -> bool {
    count_after_insert >= self.preferred_max_data_per_node
  }

  /// Whether a node of `node_size` is still large enough to split.
  #[inline]
  pub fn can_split(&self, node_size: DVec3) -> bool {
    node_size.x >= self.minimum_node_size
      && node_size.y >= self.minimum_node_size
      && node_size.z >= self.minimum_node_size
  }

  /// Reject values that would split forever or never mean anything.
  ///
  /// A zero threshold would split on every insert and a non-positive floor
  /// would never stop halving, so recursion depth would be unbounded.
  pub fn validate(&self) -> Result<()> {
    if self.preferred_max_data_per_node == 0 {
      return Err(OctreeError::InvalidConfig(
        "preferred_max_data_per_node must be at least 1",
      ));
    }
    if !self.minimum_node_size.is_finite() || self.minimum_node_size <= 0.0 {
      return Err(OctreeError::InvalidConfig(
        "minimum_node_size must be finite and positive",
      ));
    }
    Ok(())
  }
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self {
      preferred_max_data_per_node: Self::DEFAULT_PREFERRED_MAX_DATA_PER_NODE,
      minimum_node_size: Self::DEFAULT_MINIMUM_NODE_SIZE,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
