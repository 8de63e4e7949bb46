//! TOML configuration deserialisation for field grid jobs.

use anyhow::{bail, Context};
use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub grid: GridConfig,
    /// Point charges, stamped in order. Each stamp overwrites the last.
    #[serde(default)]
    pub charge: Vec<ChargeConfig>,
    /// Uniform current contributions, accumulated in order.
    #[serde(default)]
    pub current: Vec<CurrentConfig>,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Lattice extents and spacing.
#[derive(Debug, Deserialize)]
pub struct GridConfig {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

fn default_spacing() -> f64 {
    1.0
}

/// A point charge source.
#[derive(Debug, Deserialize)]
pub struct ChargeConfig {
    /// World position [x, y, z].
    pub position: [f64; 3],
    /// Charge (C).
    pub magnitude: f64,
}

/// A current source contribution.
#[derive(Debug, Deserialize)]
pub struct CurrentConfig {
    /// World position [x, y, z]. Recorded but does not affect the stamp.
    #[serde(default)]
    pub position: [f64; 3],
    pub strength: f64,
}

/// Time stepping parameters.
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Number of update steps to run after stamping (default: 1).
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Step size passed to each update (default: 0.005).
    #[serde(default = "default_dt")]
    pub dt: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            dt: default_dt(),
        }
    }
}

fn default_steps() -> usize {
    1
}
fn default_dt() -> f64 {
    0.005
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write per-cell samples as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_samples: bool,
    /// Whether to write a JSON summary (default: false).
    #[serde(default)]
    pub save_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_samples: true,
            save_summary: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid job file {}", path.display()))?;
    Ok(config)
}

/// Parse and validate a job configuration from TOML text.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject configurations that cannot produce a meaningful run.
pub fn validate_config(job: &JobConfig) -> anyhow::Result<()> {
    let g = &job.grid;
    if g.nx == 0 || g.ny == 0 || g.nz == 0 {
        bail!("Grid extents must be non-zero, got {}x{}x{}", g.nx, g.ny, g.nz);
    }
    if !(g.spacing.is_finite() && g.spacing > 0.0) {
        bail!("Grid spacing must be positive and finite, got {}", g.spacing);
    }

    for (n, c) in job.charge.iter().enumerate() {
        if !c.position.iter().all(|v| v.is_finite()) || !c.magnitude.is_finite() {
            bail!("Charge #{} has a non-finite position or magnitude", n + 1);
        }
    }
    for (n, c) in job.current.iter().enumerate() {
        if !c.position.iter().all(|v| v.is_finite()) || !c.strength.is_finite() {
            bail!("Current #{} has a non-finite position or strength", n + 1);
        }
    }

    let sim = &job.simulation;
    if !(sim.dt.is_finite() && sim.dt >= 0.0) {
        bail!("Simulation dt must be finite and non-negative, got {}", sim.dt);
    }

    Ok(())
}
