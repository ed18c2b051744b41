//! octree_demo - headless host loop for spatial_octree
//!
//! Scatters moving obstacles, rebuilds an octree over them every step and
//! highlights whatever a ring of probes finds within range.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to also see the
//! octree's own prepare/split events.

mod config;
mod obstacle;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use config::DemoConfig;
use scene::{Scene, StepReport};

/// Headless octree proximity demo.
#[derive(Parser, Debug)]
#[command(name = "octree_demo")]
#[command(about = "Runs a simulated scene against a per-step octree")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Override the number of simulation steps.
	#[arg(long)]
	steps: Option<usize>,

	/// Override the number of obstacles.
	#[arg(long)]
	obstacles: Option<usize>,

	/// Override the number of probes.
	#[arg(long)]
	probes: Option<usize>,

	/// Override the probe query radius.
	#[arg(long)]
	radius: Option<f64>,

	/// Override the placement seed.
	#[arg(long)]
	seed: Option<u64>,

	/// Refine coarse results with a bounding-sphere test.
	#[arg(long)]
	exact: bool,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	let config = resolve_config(&args)?;

	let steps = config.steps;
	let mut scene = Scene::new(config).context("Building scene")?;

	let mut total_build_us = 0u64;
	let mut total_query_us = 0u64;
	for _ in 0..steps {
		let report = scene.step()?;
		total_build_us += report.build_us;
		total_query_us += report.query_us;
		log_step(&report);
	}

	if steps > 0 {
		log::info!(
			"Done: {} steps, avg build {:.1} us, avg query {:.1} us",
			steps,
			total_build_us as f64 / steps as f64,
			total_query_us as f64 / steps as f64
		);
	}
	Ok(())
}

/// Load the config file (or defaults) and apply CLI overrides.
fn resolve_config(args: &Args) -> Result<DemoConfig> {
	let mut config = match &args.config {
		Some(path) => {
			log::info!("Loading config from: {}", path.display());
			DemoConfig::load(path)?
		}
		None => DemoConfig::default(),
	};

	if let Some(steps) = args.steps {
		config.steps = steps;
	}
	if let Some(count) = args.obstacles {
		config.obstacle_count = count;
	}
	if let Some(count) = args.probes {
		config.probe_count = count;
	}
	if let Some(radius) = args.radius {
		config.probe_radius = radius;
	}
	if let Some(seed) = args.seed {
		config.seed = seed;
	}
	config.exact |= args.exact;

	config.validate()?;
	Ok(config)
}

fn log_step(report: &StepReport) {
	let stats = &report.stats;
	log::info!(
		"step {:>4}: build {:>6} us, query {:>5} us | hits {} coarse / {} refined, {} highlighted",
		report.step,
		report.build_us,
		report.query_us,
		report.coarse_hits,
		report.refined_hits,
		report.highlighted
	);
	log::debug!(
		"  tree: {} nodes ({} leaves), depth {}, {:.2} refs/entity, fullest leaf {}, {} outside root",
		stats.node_count,
		stats.leaf_count,
		stats.max_depth,
		stats.duplication_factor(),
		stats.max_leaf_occupancy,
		stats.outside_root
	);
}
