//! Octree - owns the root node, the split policy and the entry arena.
//!
//! Lifecycle: `prepare` a root volume, insert entities, run many queries,
//! then `prepare` again (or drop) for the next step. There is no removal or
//! per-entity update; moving entities are handled by rebuilding.
//!
//! ```text
//! prepare(bounds) ──► insert / insert_all ──► find_in_range* ──► prepare(...)
//!      │                     │                       │
//!      ▼                     ▼                       ▼
//!  root = leaf       entries.push(snapshot)    root.collect(cube)
//!  entries.clear()   root.insert(slot)         slots → HashSet<H>
//! ```
//!
//! Queries are coarse: every entity stored in a leaf that overlaps the
//! query volume is returned. The `_exact` variants add a per-entity filter
//! on top of the same traversal.

use std::collections::HashSet;

use glam::DVec3;
use rayon::prelude::*;

use crate::bounds::DAabb3;
use crate::config::OctreeConfig;
use crate::error::{OctreeError, Result};
use crate::node::OctreeNode;
use crate::spatial::{SpatialData3D, SpatialEntry, SpatialHandle};
use crate::stats::OctreeStats;

/// Dynamic octree over host-owned entities identified by handles of type `H`.
///
/// Mutation (`prepare`, `insert`) needs `&mut self`; queries take `&self`, so
/// a step is one exclusive write phase followed by any number of read-only
/// (and possibly parallel) query phases.
#[derive(Debug)]
pub struct Octree<H> {
  config: OctreeConfig,
  root: Option<OctreeNode>,
  entries: Vec<SpatialEntry<H>>,
  outside_root: usize,
}

impl<H: SpatialHandle> Octree<H> {
  /// Create an unprepared tree. Call [`prepare`](Self::prepare) before use.
  pub fn new(config: OctreeConfig) -> Self {
    Self {
      config,
      root: None,
      entries: Vec::new(),
      outside_root: 0,
    }
  }

  /// Create a tree and prepare it over `root_bounds` in one go.
  pub fn with_bounds(config: OctreeConfig, root_bounds: DAabb3) -> Result<Self> {
    let mut tree = Self::new(config);
    tree.prepare(root_bounds)?;
    Ok(tree)
  }

  /// Fix the root volume and drop everything inserted so far.
  pub fn prepare(&mut self, root_bounds: DAabb3) -> Result<()> {
    self.config.validate()?;
    if !root_bounds.is_valid() {
      return Err(OctreeError::InvalidBounds);
    }

    tracing::debug!(
      center = ?root_bounds.center(),
      size = ?root_bounds.size(),
      preferred_max = self.config.preferred_max_data_per_node,
      min_size = self.config.minimum_node_size,
      "octree prepared"
    );

    self.root = Some(OctreeNode::new(root_bounds, 0));
    self.entries.clear();
    self.outside_root = 0;
    Ok(())
  }

  /// Insert one entity.
  ///
  /// Its location, bounds and radius are read now and never again.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "octree::insert"))]
  pub fn insert<D: SpatialData3D + ?Sized>(&mut self, handle: H, data: &D) -> Result<()> {
    let Some(root) = self.root.as_mut() else {
      return Err(OctreeError::Uninitialized);
    };
    let slot = u32::try_from(self.entries.len())
      .map_err(|_| OctreeError::CapacityExceeded(self.entries.len()))?;

    let entry = SpatialEntry::capture(handle, data);
    if !root.bounds().overlaps(&entry.bounds) {
      self.outside_root += 1;
      tracing::debug!(?handle, bounds = ?entry.bounds, "entity bounds miss the octree root");
    }

    self.entries.push(entry);
    root.insert(slot, &self.entries, &self.config);
    Ok(())
  }

  /// Insert every `(handle, entity)` pair in order.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "octree::insert_all"))]
  pub fn insert_all<'a, D, I>(&mut self, items: I) -> Result<()>
  where
    D: SpatialData3D + ?Sized + 'a,
    I: IntoIterator<Item = (H, &'a D)>,
  {
    for (handle, data) in items {
      self.insert(handle, data)?;
    }
    Ok(())
  }

  /// Coarse proximity query.
  ///
  /// Searches the cube of edge `2 * radius` centered at `center` and returns
  /// every entity held by a leaf that overlaps it. Nothing whose bounds
  /// overlap the cube is missed; extras from the same leaves are expected.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "octree::find_in_range"))]
  pub fn find_in_range(&self, center: DVec3, radius: f64) -> Result<HashSet<H>> {
    let slots = self.range_slots(center, radius)?;
    Ok(self.resolve(&slots, |_| true))
  }

  /// [`find_in_range`](Self::find_in_range) with a per-entity filter: an
  /// entity is kept when its bounds overlap the search cube and its bounding
  /// sphere reaches within `radius` of `center`.
  pub fn find_in_range_exact(&self, center: DVec3, radius: f64) -> Result<HashSet<H>> {
    let slots = self.range_slots(center, radius)?;
    let cube = DAabb3::cube(center, radius);
    Ok(self.resolve(&slots, |entry| {
      entry.bounds.overlaps(&cube) && entry.within_range(center, radius)
    }))
  }

  /// Coarse box query: every entity held by a leaf overlapping `search`.
  pub fn find_in_box(&self, search: &DAabb3) -> Result<HashSet<H>> {
    let slots = self.box_slots(search)?;
    Ok(self.resolve(&slots, |_| true))
  }

  /// [`find_in_box`](Self::find_in_box) keeping only entities whose own
  /// bounds overlap `search`.
  pub fn find_in_box_exact(&self, search: &DAabb3) -> Result<HashSet<H>> {
    let slots = self.box_slots(search)?;
    Ok(self.resolve(&slots, |entry| entry.bounds.overlaps(search)))
  }

  /// Run many coarse range queries in parallel.
  ///
  /// Results keep the order of `queries`. Fails on the first invalid query.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "octree::find_in_range_batch"))]
  pub fn find_in_range_batch(&self, queries: &[(DVec3, f64)]) -> Result<Vec<HashSet<H>>>
  where
    H: Send + Sync,
  {
    if queries.is_empty() {
      return Ok(Vec::new());
    }

    queries
      .par_iter()
      .map(|&(center, radius)| self.find_in_range(center, radius))
      .collect()
  }

  /// Number of entities inserted since the last prepare.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// True once a root volume has been set.
  pub fn is_prepared(&self) -> bool {
    self.root.is_some()
  }

  /// Root node, for inspection.
  pub fn root(&self) -> Option<&OctreeNode> {
    self.root.as_ref()
  }

  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Snapshots taken at insertion, indexed by leaf slot.
  pub fn entries(&self) -> &[SpatialEntry<H>] {
    &self.entries
  }

  /// Shape and occupancy of the current tree.
  pub fn stats(&self) -> OctreeStats {
    let Some(root) = self.root.as_ref() else {
      return OctreeStats::default();
    };
    OctreeStats {
      entry_count: self.entries.len(),
      outside_root: self.outside_root,
      ..OctreeStats::from_root(root)
    }
  }

  fn root_node(&self) -> Result<&OctreeNode> {
    self.root.as_ref().ok_or(OctreeError::Uninitialized)
  }

  fn range_slots(&self, center: DVec3, radius: f64) -> Result<Vec<u32>> {
    if !radius.is_finite() || radius < 0.0 {
      return Err(OctreeError::InvalidRadius(radius));
    }
    let root = self.root_node()?;

    let _span = tracing::trace_span!("octree::range_query", ?center, radius).entered();
    let mut slots = Vec::new();
    root.find_in_range(center, radius, &mut slots)?;
    tracing::trace!(candidates = slots.len(), "range query collected");
    Ok(slots)
  }

  fn box_slots(&self, search: &DAabb3) -> Result<Vec<u32>> {
    if !search.is_valid() {
      return Err(OctreeError::InvalidBounds);
    }
    let root = self.root_node()?;

    let _span = tracing::trace_span!("octree::box_query", min = ?search.min, max = ?search.max).entered();
    let mut slots = Vec::new();
    root.collect(search, &mut slots);
    tracing::trace!(candidates = slots.len(), "box query collected");
    Ok(slots)
  }

  /// Map slots to handles, collapsing duplicates.
  fn resolve(&self, slots: &[u32], keep: impl Fn(&SpatialEntry<H>) -> bool) -> HashSet<H> {
    slots
      .iter()
      .map(|&slot| &self.entries[slot as usize])
      .filter(|entry| keep(entry))
      .map(|entry| entry.handle)
      .collect()
  }
}

impl<H: SpatialHandle> Default for Octree<H> {
  fn default() -> Self {
    Self::new(OctreeConfig::default())
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
