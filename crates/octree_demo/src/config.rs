//! Scene configuration for the demo loop.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use spatial_octree::OctreeConfig;
use std::path::Path;

/// Root configuration for a demo run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
	/// Half the edge length of the cubic world centered on the origin.
	pub world_half_extent: f64,
	/// Number of obstacles scattered in the world.
	pub obstacle_count: usize,
	/// Smallest obstacle half-size along any axis.
	pub min_obstacle_half_size: f64,
	/// Largest obstacle half-size along any axis.
	pub max_obstacle_half_size: f64,
	/// Largest obstacle speed, in world units per second.
	pub max_speed: f64,
	/// Number of probes issuing range queries each step.
	pub probe_count: usize,
	/// Query radius of each probe.
	pub probe_radius: f64,
	/// Distance of the probe ring from the origin.
	pub probe_orbit: f64,
	/// Simulation steps to run.
	pub steps: usize,
	/// Seconds per simulation step.
	pub time_step: f64,
	/// Seed for obstacle placement and velocities.
	pub seed: u64,
	/// Refine coarse query results with a bounding-sphere test.
	pub exact: bool,
	/// Split policy for the per-step octree.
	pub octree: OctreeConfig,
}

impl Default for DemoConfig {
	fn default() -> Self {
		Self {
			world_half_extent: 250.0,
			obstacle_count: 2000,
			min_obstacle_half_size: 0.5,
			max_obstacle_half_size: 3.0,
			max_speed: 8.0,
			probe_count: 16,
			probe_radius: 20.0,
			probe_orbit: 150.0,
			steps: 60,
			time_step: 1.0 / 60.0,
			seed: 1337,
			exact: false,
			octree: OctreeConfig::default(),
		}
	}
}

impl DemoConfig {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config: {}", path.display()))?;
		let config: DemoConfig = toml::from_str(&content)
			.with_context(|| format!("Failed to parse config: {}", path.display()))?;
		config.validate()?;
		Ok(config)
	}

	/// Check values the scene builder relies on.
	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.world_half_extent.is_finite() && self.world_half_extent > 0.0,
			"world_half_extent must be positive"
		);
		ensure!(
			self.min_obstacle_half_size > 0.0
				&& self.min_obstacle_half_size <= self.max_obstacle_half_size
				&& self.max_obstacle_half_size.is_finite(),
			"obstacle half sizes must be finite and satisfy 0 < min <= max"
		);
		ensure!(
			self.max_speed.is_finite() && self.max_speed >= 0.0,
			"max_speed must be finite and not negative"
		);
		ensure!(
			self.probe_radius.is_finite() && self.probe_radius >= 0.0,
			"probe_radius must be finite and not negative"
		);
		ensure!(self.probe_orbit.is_finite(), "probe_orbit must be finite");
		ensure!(
			self.time_step.is_finite() && self.time_step > 0.0,
			"time_step must be finite and positive"
		);
		self.octree.validate().context("Invalid [octree] table")?;
		Ok(())
	}
}
