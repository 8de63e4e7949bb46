//! emviz command-line interface.
//!
//! Build field grids from TOML job files:
//! ```sh
//! emviz-cli run job.toml
//! emviz-cli validate job.toml
//! emviz-cli probe job.toml 51 50 50
//! ```

mod config;
mod runner;

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use emviz_core::FieldSummary;

#[derive(Parser)]
#[command(name = "emviz-cli")]
#[command(about = "emviz: electrostatic field grid builder")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and step a grid from a TOML job file, then export its samples.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without building the grid.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Print the field samples at one lattice cell.
    Probe {
        /// Path to the job configuration file.
        config: PathBuf,
        i: usize,
        j: usize,
        k: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("emviz field grid");
            println!("================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let grid = runner::run_job(&job)?;
            let samples = grid.samples();

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_samples {
                runner::write_samples_csv(&samples, &out_dir.join("samples.csv"), &job)?;
            }

            let summary = FieldSummary::from_samples(&samples);
            println!(
                "  |E| range: [{:.3e}, {:.3e}] V/m, mean {:.3e}; max |B| {:.3e}",
                summary.electric_min,
                summary.electric_max,
                summary.electric_mean,
                summary.magnetic_max
            );
            if job.output.save_summary {
                runner::write_summary_json(&summary, &out_dir.join("summary.json"))?;
            }

            println!("Run complete (t={}).", grid.elapsed());
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Probe { config, i, j, k } => {
            let job = config::load_config(&config)?;
            let grid = runner::run_job(&job)?;
            let samples = grid.samples();

            let Some((e, b)) = samples.get(i, j, k) else {
                let (nx, ny, nz) = samples.dims();
                bail!("Cell ({}, {}, {}) is outside the {}x{}x{} grid", i, j, k, nx, ny, nz);
            };

            println!("Cell ({}, {}, {}) at {}", i, j, k, samples.position_of(i, j, k));
            println!("  E = {}  |E| = {:.6e}", e, e.magnitude());
            println!("  B = {}  |B| = {:.6e}", b, b.magnitude());
            Ok(())
        }
    }
}
