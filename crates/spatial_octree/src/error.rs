//! Usage errors reported by the octree.
//!
//! Every variant is a precondition violation by the caller. Nothing here is
//! transient, so nothing is worth retrying.

use thiserror::Error;

/// Misuse of the octree API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OctreeError {
  /// `insert` or a query was issued before `prepare` set the root volume.
  #[error("octree has no root volume; call prepare() first")]
  Uninitialized,

  /// A range query was started from a node that is not the root.
  #[error("range queries can only start at the root node (got depth {depth})")]
  NotRootNode { depth: u32 },

  /// Query radius was negative, NaN or infinite.
  #[error("query radius must be finite and non-negative, got {0}")]
  InvalidRadius(f64),

  /// Root or search bounds were non-finite or had min > max on some axis.
  #[error("bounds must be finite with min <= max on every axis")]
  InvalidBounds,

  /// More entities than leaf slots can address.
  #[error("octree entry arena is full ({0} entries)")]
  CapacityExceeded(usize),

  /// Configuration values cannot produce a terminating tree.
  #[error("invalid octree config: {0}")]
  InvalidConfig(&'static str),
}

/// Result alias for octree operations.
pub type Result<T> = std::result::Result<T, OctreeError>;
