//! Structural statistics for an octree.

use crate::node::OctreeNode;

/// Snapshot of tree shape and occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OctreeStats {
	/// Total nodes, root included.
	pub node_count: usize,
	/// Nodes without children.
	pub leaf_count: usize,
	/// Nodes with exactly 8 children.
	pub internal_count: usize,
	/// Deepest node depth (root = 0).
	pub max_depth: u32,
	/// Slot references held by leaves. Exceeds `entry_count` when entities
	/// straddle octant boundaries.
	pub leaf_references: usize,
	/// Largest number of slots in a single leaf.
	pub max_leaf_occupancy: usize,
	/// Entities inserted since the last prepare.
	pub entry_count: usize,
	/// Inserted entities whose bounds miss the root region.
	pub outside_root: usize,
}

impl OctreeStats {
	/// Accumulate node statistics for the subtree under `root`.
	///
	/// Entry counters are left at zero; the tree fills them in.
	pub(crate) fn from_root(root: &OctreeNode) -> Self {
		let mut stats = Self::default();
		stats.visit(root);
		stats
	}

	fn visit(&mut self, node: &OctreeNode) {
		self.node_count += 1;
		self.max_depth = self.max_depth.max(node.depth());
		match node.children() {
			Some(children) => {
				self.internal_count += 1;
				for child in children.iter() {
					self.visit(child);
				}
			}
			None => {
				self.leaf_count += 1;
				self.leaf_references += node.data_len();
				self.max_leaf_occupancy = self.max_leaf_occupancy.max(node.data_len());
			}
		}
	}

	/// Average references per leaf.
	#[inline]
	pub fn average_leaf_occupancy(&self) -> f64 {
		if self.leaf_count == 0 {
			0.0
		} else {
			self.leaf_references as f64 / self.leaf_count as f64
		}
	}

	/// Leaf references per inserted entity (1.0 = no straddling).
	#[inline]
	pub fn duplication_factor(&self) -> f64 {
		if self.entry_count == 0 {
			0.0
		} else {
			self.leaf_references as f64 / self.entry_count as f64
		}
	}
}
