//! Obstacle - a moving box that caches its spatial data lazily.

use std::cell::Cell;

use glam::DVec3;
use spatial_octree::{DAabb3, SpatialData3D};

/// Squared distance under which a move does not invalidate the cache.
const MOVE_EPSILON_SQ: f64 = 1e-12;

#[derive(Clone, Copy, Debug)]
struct CachedSpatial {
  position: DVec3,
  bounds: DAabb3,
  radius: f64,
}

/// Box-shaped obstacle moving through the scene.
///
/// Position, bounds and radius are recomputed on first read after a move,
/// not on every move.
#[derive(Debug)]
pub struct Obstacle {
  position: DVec3,
  half_extents: DVec3,
  velocity: DVec3,
  highlighted: bool,
  cache: Cell<Option<CachedSpatial>>,
}

impl Obstacle {
  pub fn new(position: DVec3, half_extents: DVec3, velocity: DVec3) -> Self {
    Self {
      position,
      half_extents,
      velocity,
      highlighted: false,
      cache: Cell::new(None),
    }
  }

  pub fn position(&self) -> DVec3 {
    self.position
  }

  /// Advance by `dt` seconds, bouncing off the walls of `world`.
  pub fn advance(&mut self, dt: f64, world: &DAabb3) {
    let mut next = self.position + self.velocity * dt;
    for axis in 0..3 {
      if next[axis] < world.min[axis] || next[axis] > world.max[axis] {
        self.velocity[axis] = -self.velocity[axis];
        next[axis] = next[axis].clamp(world.min[axis], world.max[axis]);
      }
    }
    self.position = next;
  }

  pub fn highlight(&mut self) {
    self.highlighted = true;
  }

  pub fn clear_highlight(&mut self) {
    self.highlighted = false;
  }

  pub fn is_highlighted(&self) -> bool {
    self.highlighted
  }

  /// True when the cache is missing or was taken at another position.
  fn is_cache_dirty(&self) -> bool {
    match self.cache.get() {
      Some(cached) => (self.position - cached.position).length_squared() > MOVE_EPSILON_SQ,
      None => true,
    }
  }

  fn cached(&self) -> CachedSpatial {
    if let (false, Some(cached)) = (self.is_cache_dirty(), self.cache.get()) {
      return cached;
    }
    let bounds = DAabb3::from_center_half_extents(self.position, self.half_extents);
    let fresh = CachedSpatial {
      position: self.position,
      bounds,
      radius: self.half_extents.length(),
    };
    self.cache.set(Some(fresh));
    fresh
  }
}

impl SpatialData3D for Obstacle {
  fn location(&self) -> DVec3 {
    self.cached().position
  }

  fn bounds(&self) -> DAabb3 {
    self.cached().bounds
  }

  fn bounding_radius(&self) -> f64 {
    self.cached().radius
  }
}
