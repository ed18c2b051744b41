//! spatial_octree - Dynamic octree for coarse proximity queries
//!
//! This crate indexes arbitrary positioned/bounded objects in a recursive
//! octree and answers "what lies near this point" without rescanning every
//! object per query. Built for the broad phase of an interactive simulation:
//! insert once per step, then issue many range queries.
//!
//! # Features
//!
//! - **Lazy subdivision**: a leaf splits into 8 octants once it reaches the
//!   preferred occupancy, unless it is already at the minimum node size
//! - **Overlap assignment**: an entity straddling octant boundaries is
//!   referenced from every leaf it overlaps
//! - **Coarse queries**: range queries return whole leaves that overlap the
//!   query cube; exact refinement is an opt-in post pass
//! - **Parallel query phase**: read-only query batches run on rayon
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec3;
//! use spatial_octree::{DAabb3, Octree, OctreeConfig};
//!
//! let mut tree = Octree::new(OctreeConfig::default());
//! tree.prepare(DAabb3::cube(DVec3::ZERO, 50.0))?;
//!
//! let crate_box = DAabb3::cube(DVec3::new(1.0, 2.0, 3.0), 0.5);
//! tree.insert(7u32, &crate_box)?;
//!
//! let found = tree.find_in_range(DVec3::ZERO, 5.0)?;
//! assert!(found.contains(&7));
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod spatial;
pub mod stats;

// Node recursion and the tree that owns the root
pub mod node;
pub mod tree;

// Re-export commonly used items
pub use bounds::DAabb3;
pub use config::OctreeConfig;
pub use error::{OctreeError, Result};
pub use node::{NodeState, OctreeNode};
pub use spatial::{SpatialData3D, SpatialEntry, SpatialHandle};
pub use stats::OctreeStats;
pub use tree::Octree;
