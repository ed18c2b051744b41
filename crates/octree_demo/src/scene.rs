//! Scene - obstacles, probes and the per-step octree.
//!
//! Each step runs three phases:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────┐   ┌─────────────────────────────┐
//! │ Move         │──►│ Write phase (exclusive)  │──►│ Query phase (read-only)     │
//! │ advance(dt)  │   │ prepare + insert_all     │   │ find_in_range_batch (rayon) │
//! └──────────────┘   └──────────────────────────┘   │ refine + highlight          │
//!                                                   └─────────────────────────────┘
//! ```

use std::collections::HashSet;

use anyhow::{Context, Result};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial_octree::{DAabb3, Octree, OctreeStats, SpatialData3D};
use web_time::Instant;

use crate::config::DemoConfig;
use crate::obstacle::Obstacle;

/// Per-step summary.
#[derive(Clone, Debug)]
pub struct StepReport {
  pub step: usize,
  /// Microseconds spent rebuilding the tree.
  pub build_us: u64,
  /// Microseconds spent in the query phase.
  pub query_us: u64,
  /// Sum of coarse result sizes over all probes.
  pub coarse_hits: usize,
  /// Sum of refined result sizes (equals `coarse_hits` when not refining).
  pub refined_hits: usize,
  /// Obstacles highlighted after this step.
  pub highlighted: usize,
  pub stats: OctreeStats,
}

/// Host simulation state.
pub struct Scene {
  config: DemoConfig,
  world: DAabb3,
  obstacles: Vec<Obstacle>,
  tree: Octree<usize>,
  step: usize,
}

impl Scene {
  /// Scatter obstacles with random sizes and velocities.
  pub fn new(config: DemoConfig) -> Result<Self> {
    config.validate()?;

    let world = DAabb3::cube(DVec3::ZERO, config.world_half_extent);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let extent = config.world_half_extent;

    let obstacles = (0..config.obstacle_count)
      .map(|_| {
        let position = DVec3::new(
          rng.random_range(-extent..=extent),
          rng.random_range(-extent..=extent),
          rng.random_range(-extent..=extent),
        );
        let half_extents = DVec3::new(
          rng.random_range(config.min_obstacle_half_size..=config.max_obstacle_half_size),
          rng.random_range(config.min_obstacle_half_size..=config.max_obstacle_half_size),
          rng.random_range(config.min_obstacle_half_size..=config.max_obstacle_half_size),
        );
        let velocity = DVec3::new(
          rng.random_range(-1.0..=1.0),
          rng.random_range(-1.0..=1.0),
          rng.random_range(-1.0..=1.0),
        )
        .normalize_or_zero()
          * rng.random_range(0.0..=config.max_speed);
        Obstacle::new(position, half_extents, velocity)
      })
      .collect();

    log::info!(
      "Scene: {} obstacles in a {}-unit world, {} probes (radius {})",
      config.obstacle_count,
      extent * 2.0,
      config.probe_count,
      config.probe_radius
    );

    Ok(Self {
      tree: Octree::new(config.octree.clone()),
      config,
      world,
      obstacles,
      step: 0,
    })
  }

  pub fn obstacles(&self) -> &[Obstacle] {
    &self.obstacles
  }

  pub fn tree(&self) -> &Octree<usize> {
    &self.tree
  }

  /// Probe positions for the current step: a ring rotating around the Y axis.
  pub fn probe_positions(&self) -> Vec<DVec3> {
    let count = self.config.probe_count.max(1) as f64;
    let phase = self.step as f64 * self.config.time_step * 0.25;
    (0..self.config.probe_count)
      .map(|i| {
        let angle = phase + std::f64::consts::TAU * i as f64 / count;
        DVec3::new(angle.cos(), 0.0, angle.sin()) * self.config.probe_orbit
      })
      .collect()
  }

  /// Move, rebuild, query and highlight.
  pub fn step(&mut self) -> Result<StepReport> {
    let dt = self.config.time_step;
    for obstacle in &mut self.obstacles {
      obstacle.advance(dt, &self.world);
    }

    // Write phase
    let build_start = Instant::now();
    self.tree.prepare(self.world).context("Preparing octree")?;
    self
      .tree
      .insert_all(self.obstacles.iter().enumerate())
      .context("Inserting obstacles")?;
    let build_us = build_start.elapsed().as_micros() as u64;

    // Query phase
    let query_start = Instant::now();
    let radius = self.config.probe_radius;
    let queries: Vec<_> = self
      .probe_positions()
      .into_iter()
      .map(|center| (center, radius))
      .collect();
    let coarse = self
      .tree
      .find_in_range_batch(&queries)
      .context("Probe queries")?;
    let coarse_hits = coarse.iter().map(HashSet::len).sum();

    let mut found: HashSet<usize> = HashSet::new();
    let mut refined_hits = 0;
    for (hits, &(center, radius)) in coarse.iter().zip(&queries) {
      for &handle in hits {
        if !self.config.exact || reaches(&self.obstacles[handle], center, radius) {
          refined_hits += 1;
          found.insert(handle);
        }
      }
    }
    let query_us = query_start.elapsed().as_micros() as u64;

    for (handle, obstacle) in self.obstacles.iter_mut().enumerate() {
      if found.contains(&handle) {
        obstacle.highlight();
      } else {
        obstacle.clear_highlight();
      }
    }

    let report = StepReport {
      step: self.step,
      build_us,
      query_us,
      coarse_hits,
      refined_hits,
      highlighted: found.len(),
      stats: self.tree.stats(),
    };
    self.step += 1;
    Ok(report)
  }
}

/// Caller-side refinement: does the obstacle's bounding sphere reach the
/// query sphere?
fn reaches(obstacle: &Obstacle, center: DVec3, radius: f64) -> bool {
  let reach = radius + obstacle.bounding_radius();
  obstacle.location().distance_squared(center) <= reach * reach
}
