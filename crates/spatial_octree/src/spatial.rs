//! Capability contract for anything the octree can index.

use std::fmt::Debug;
use std::hash::Hash;

use glam::DVec3;

use crate::bounds::DAabb3;

/// Anything with a position, a bounding box and a bounding radius.
///
/// The octree reads these once, when the entity is inserted. Caching or
/// recomputing them when the entity moves is up to the implementor.
pub trait SpatialData3D {
  /// World-space position of the entity.
  fn location(&self) -> DVec3;

  /// World-space bounding box. Used for node assignment and box queries.
  fn bounds(&self) -> DAabb3;

  /// Radius of a sphere around [`location`](Self::location) enclosing the
  /// entity. Only the exact range refinement reads it.
  fn bounding_radius(&self) -> f64;
}

impl<T: SpatialData3D + ?Sized> SpatialData3D for &T {
  fn location(&self) -> DVec3 {
    (**self).location()
  }

  fn bounds(&self) -> DAabb3 {
    (**self).bounds()
  }

  fn bounding_radius(&self) -> f64 {
    (**self).bounding_radius()
  }
}

impl<T: SpatialData3D + ?Sized> SpatialData3D for Box<T> {
  fn location(&self) -> DVec3 {
    (**self).location()
  }

  fn bounds(&self) -> DAabb3 {
    (**self).bounds()
  }

  fn bounding_radius(&self) -> f64 {
    (**self).bounding_radius()
  }
}

/// A bare box is its own spatial data.
impl SpatialData3D for DAabb3 {
  fn location(&self) -> DVec3 {
    self.center()
  }

  fn bounds(&self) -> DAabb3 {
    *self
  }

  fn bounding_radius(&self) -> f64 {
    self.half_extents().length()
  }
}

/// Opaque reference to a host-owned entity.
///
/// Identity is by `Eq`/`Hash`: two inserts with the same handle collapse to
/// one result. Typical handles are indices, generational ids or ECS entities.
pub trait SpatialHandle: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> SpatialHandle for T {}

/// Handle plus the spatial data captured when it was inserted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialEntry<H> {
  /// Host handle.
  pub handle: H,
  /// Location at insertion time.
  pub location: DVec3,
  /// Bounds at insertion time.
  pub bounds: DAabb3,
  /// Bounding radius at insertion time.
  pub radius: f64,
}

impl<H: SpatialHandle> SpatialEntry<H> {
  /// Capture the current spatial data of `data` under `handle`.
  pub fn capture<D: SpatialData3D + ?Sized>(handle: H, data: &D) -> Self {
    Self {
      handle,
      location: data.location(),
      bounds: data.bounds(),
      radius: data.bounding_radius(),
    }
  }

  /// Sphere test used by exact range refinement.
  ///
  /// Passes when the entity's bounding sphere reaches within `radius` of
  /// `center`.
  #[inline]
  pub fn within_range(&self, center: DVec3, radius: f64) -> bool {
    let reach = radius + self.radius;
    self.location.distance_squared(center) <= reach * reach
  }
}
