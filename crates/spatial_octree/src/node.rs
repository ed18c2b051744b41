//! OctreeNode - one region of the tree, either a leaf or 8 octants.
//!
//! Leaves hold `u32` slots into the owning tree's entry arena rather than the
//! entities themselves. A leaf turns internal exactly once, when it splits;
//! nothing turns it back.

use glam::DVec3;
use smallvec::SmallVec;

use crate::bounds::DAabb3;
use crate::config::OctreeConfig;
use crate::error::{OctreeError, Result};
use crate::spatial::SpatialEntry;

/// Inline capacity of a leaf before its slot list spills to the heap.
const LEAF_INLINE_SLOTS: usize = 8;

type LeafSlots = SmallVec<[u32; LEAF_INLINE_SLOTS]>;

/// Observable state of a node.
///
/// `Empty -> Populated` on first insert, `Populated -> Internal` on split.
/// `Internal` is terminal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeState {
  /// Leaf with no data.
  Empty,
  /// Leaf holding at least one slot.
  Populated,
  /// Exactly 8 children, no direct data.
  Internal,
}

#[derive(Debug)]
enum NodeContent {
  Leaf(LeafSlots),
  Internal(Box<[OctreeNode; 8]>),
}

/// Octree node.
///
/// Children are ordered by octant index (see [`DAabb3::octant`]).
#[derive(Debug)]
pub struct OctreeNode {
  bounds: DAabb3,
  depth: u32,
  content: NodeContent,
}

impl OctreeNode {
  pub(crate) fn new(bounds: DAabb3, depth: u32) -> Self {
    Self {
      bounds,
      depth,
      content: NodeContent::Leaf(LeafSlots::new()),
    }
  }

  /// Region covered by this node.
  pub fn bounds(&self) -> &DAabb3 {
    &self.bounds
  }

  /// Distance from the root (root = 0).
  pub fn depth(&self) -> u32 {
    self.depth
  }

  pub fn is_leaf(&self) -> bool {
    matches!(self.content, NodeContent::Leaf(_))
  }

  pub fn state(&self) -> NodeState {
    match &self.content {
      NodeContent::Leaf(slots) if slots.is_empty() => NodeState::Empty,
      NodeContent::Leaf(_) => NodeState::Populated,
      NodeContent::Internal(_) => NodeState::Internal,
    }
  }

  /// The 8 children, or `None` for a leaf.
  pub fn children(&self) -> Option<&[OctreeNode; 8]> {
    match &self.content {
      NodeContent::Internal(children) => Some(children),
      NodeContent::Leaf(_) => None,
    }
  }

  /// Arena slots stored directly in this node. Always empty when internal.
  pub fn slots(&self) -> &[u32] {
    match &self.content {
      NodeContent::Leaf(slots) => slots,
      NodeContent::Internal(_) => &[],
    }
  }

  /// Number of slots stored directly in this node.
  pub fn data_len(&self) -> usize {
    self.slots().len()
  }

  /// Insert the entry at `slot`.
  ///
  /// A leaf that would reach the split threshold and is still at least
  /// `minimum_node_size` on every axis splits first, then forwards the entry
  /// like an internal node. A leaf at the size floor, or one too narrow for
  /// its center to land strictly inside it, just keeps growing.
  pub(crate) fn insert<H>(&mut self, slot: u32, entries: &[SpatialEntry<H>], config: &OctreeConfig) {
    if let NodeContent::Leaf(slots) = &mut self.content {
      let splittable = config.can_split(self.bounds.size()) && self.bounds.can_halve();
      if !(config.should_split(slots.len() + 1) && splittable) {
        slots.push(slot);
        return;
      }
      self.split(entries, config);
    }

    self.insert_into_children(slot, entries, config);
  }

  /// Replace this leaf with 8 octant children and move its data down.
  fn split<H>(&mut self, entries: &[SpatialEntry<H>], config: &OctreeConfig) {
    let child_depth = self.depth + 1;
    let bounds = self.bounds;
    let children = Box::new(std::array::from_fn(|octant| {
      OctreeNode::new(bounds.octant(octant as u8), child_depth)
    }));

    let NodeContent::Leaf(migrating) =
      std::mem::replace(&mut self.content, NodeContent::Internal(children))
    else {
      return;
    };

    tracing::debug!(
      depth = self.depth,
      center = ?self.bounds.center(),
      size = ?self.bounds.size(),
      migrating = migrating.len(),
      "octree node split"
    );

    for slot in migrating {
      self.insert_into_children(slot, entries, config);
    }
  }

  /// Forward `slot` to every child whose region overlaps the entry bounds.
  fn insert_into_children<H>(&mut self, slot: u32, entries: &[SpatialEntry<H>], config: &OctreeConfig) {
    let NodeContent::Internal(children) = &mut self.content else {
      return;
    };
    let entry_bounds = entries[slot as usize].bounds;
    for child in children.iter_mut() {
      if child.bounds.overlaps(&entry_bounds) {
        child.insert(slot, entries, config);
      }
    }
  }

  /// Gather slots from every leaf whose region overlaps `search`.
  ///
  /// Leaves contribute all of their slots without testing each entry, so the
  /// output over-approximates and may repeat slots reachable through several
  /// leaves.
  pub(crate) fn collect(&self, search: &DAabb3, found: &mut Vec<u32>) {
    match &self.content {
      NodeContent::Leaf(slots) => found.extend_from_slice(slots),
      NodeContent::Internal(children) => {
        for child in children.iter() {
          if child.bounds.overlaps(search) {
            child.collect(search, found);
          }
        }
      }
    }
  }

  /// Coarse range query rooted at this node.
  ///
  /// Searches the cube of edge `2 * radius` around `center`. Fails with
  /// [`OctreeError::NotRootNode`] when called on anything below the root.
  pub(crate) fn find_in_range(&self, center: DVec3, radius: f64, found: &mut Vec<u32>) -> Result<()> {
    if self.depth != 0 {
      return Err(OctreeError::NotRootNode { depth: self.depth });
    }
    self.collect(&DAabb3::cube(center, radius), found);
    Ok(())
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
