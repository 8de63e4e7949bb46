//! Job runner: builds the grid, stamps sources, steps and exports.

use std::path::Path;

use anyhow::{Context, Result};

use emviz_core::{FieldGrid, FieldSamples, FieldSummary, Vector3};

use crate::config::JobConfig;

/// Build the grid described by `job` and stamp every configured source.
pub fn build_grid(job: &JobConfig) -> Result<FieldGrid> {
    let g = &job.grid;
    let mut grid = FieldGrid::new(g.nx, g.ny, g.nz, g.spacing)
        .context("Failed to allocate field grid")?;

    println!(
        "  Grid: {}x{}x{} cells, spacing {}",
        g.nx, g.ny, g.nz, g.spacing
    );

    if job.charge.len() > 1 {
        log::warn!(
            "{} charges configured; each stamp overwrites the previous one \
             except at a cell coinciding with the new charge",
            job.charge.len()
        );
    }
    for c in &job.charge {
        let position = Vector3::from(c.position);
        println!("  Charge: q={:.3e} C at {}", c.magnitude, position);
        grid.apply_point_charge_field(position, c.magnitude);
    }

    for c in &job.current {
        let position = Vector3::from(c.position);
        println!("  Current: strength={} at {}", c.strength, position);
        grid.apply_current_contribution(position, c.strength);
    }

    Ok(grid)
}

/// Build the grid and advance it by the configured number of steps.
pub fn run_job(job: &JobConfig) -> Result<FieldGrid> {
    let mut grid = build_grid(job)?;

    let sim = &job.simulation;
    for step in 0..sim.steps {
        grid.update(sim.dt);
        if (step + 1) % 100 == 0 || step + 1 == sim.steps {
            log::info!("step {}/{} (t={:.4})", step + 1, sim.steps, grid.elapsed());
        }
    }

    Ok(grid)
}

/// Write per-cell samples to a CSV file with a metadata header.
pub fn write_samples_csv(samples: &FieldSamples<'_>, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::{BufWriter, Write};

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let (nx, ny, nz) = samples.dims();
    writeln!(out, "# emviz field samples")?;
    writeln!(out, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "# Grid: {}x{}x{}, spacing {}", nx, ny, nz, samples.spacing())?;
    for c in &job.charge {
        writeln!(
            out,
            "# charge: position=[{}, {}, {}], magnitude={:e}",
            c.position[0], c.position[1], c.position[2], c.magnitude
        )?;
    }
    for c in &job.current {
        writeln!(out, "# current: strength={}", c.strength)?;
    }
    writeln!(
        out,
        "# steps: {}, dt: {}",
        job.simulation.steps, job.simulation.dt
    )?;
    writeln!(out, "#")?;
    writeln!(out, "i,j,k,x,y,z,ex,ey,ez,e_mag,bx,by,bz,b_mag")?;

    for ((i, j, k), e, b) in samples.cells() {
        let p = samples.position_of(i, j, k);
        writeln!(
            out,
            "{},{},{},{},{},{},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
            i,
            j,
            k,
            p.x,
            p.y,
            p.z,
            e.x,
            e.y,
            e.z,
            e.magnitude(),
            b.x,
            b.y,
            b.z,
            b.magnitude()
        )?;
    }
    out.flush()?;

    println!("Samples written to: {}", path.display());
    Ok(())
}

/// Write a field summary to a JSON file.
pub fn write_summary_json(summary: &FieldSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Summary (JSON) written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn small_job() -> JobConfig {
        parse_config(
            r#"
            [grid]
            nx = 3
            ny = 2
            nz = 2
            spacing = 0.5

            [[charge]]
            position = [0.0, 0.0, 0.0]
            magnitude = 1e-9

            [[current]]
            strength = 1.0

            [[current]]
            strength = 0.5

            [simulation]
            steps = 5
            "#,
        )
        .unwrap()
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("emviz-cli-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_run_job_stamps_and_steps() {
        let job = small_job();
        let grid = run_job(&job).unwrap();
        let samples = grid.samples();

        assert_eq!(samples.len(), 12);
        assert!((grid.elapsed() - 0.025).abs() < 1e-12);

        let (e_origin, b_origin) = samples.get(0, 0, 0).unwrap();
        assert_eq!(e_origin, Vector3::ZERO);
        assert_eq!(b_origin, Vector3::new(0.0, 0.0, 1.5));

        let (e, _) = samples.get(2, 0, 0).unwrap();
        assert!(e.x > 0.0);
    }

    #[test]
    fn test_last_charge_wins() {
        let mut job = small_job();
        job.charge[0].position = [0.1, 0.2, 0.3];
        let single = run_job(&job).unwrap();

        job.charge.insert(
            0,
            crate::config::ChargeConfig { position: [9.0, 9.0, 9.0], magnitude: -1.0 },
        );
        let both = run_job(&job).unwrap();

        assert_eq!(both.samples().electric(), single.samples().electric());
    }

    #[test]
    fn test_last_charge_on_lattice_keeps_earlier_value_at_its_cell() {
        let mut job = small_job();
        let single = run_job(&job).unwrap();

        job.charge.insert(
            0,
            crate::config::ChargeConfig { position: [9.0, 9.0, 9.0], magnitude: -1.0 },
        );
        let both = run_job(&job).unwrap();
        let (both_e, single_e) = (both.samples(), single.samples());

        // The last charge sits on cell (0, 0, 0): the first charge's field survives there.
        let (origin, _) = both_e.get(0, 0, 0).unwrap();
        assert_ne!(origin, Vector3::ZERO);
        assert!(origin.x > 0.0);
        assert_eq!(single_e.get(0, 0, 0).unwrap().0, Vector3::ZERO);

        assert_eq!(both_e.electric()[1..], single_e.electric()[1..]);
    }

    #[test]
    fn test_samples_csv_has_one_row_per_cell() {
        let job = small_job();
        let grid = run_job(&job).unwrap();
        let dir = scratch_dir("csv");
        let path = dir.join("samples.csv");

        write_samples_csv(&grid.samples(), &path, &job).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();

        assert_eq!(rows[0], "i,j,k,x,y,z,ex,ey,ez,e_mag,bx,by,bz,b_mag");
        assert_eq!(rows.len(), 1 + 12);
        assert!(rows[1].starts_with("0,0,0,0,0,0,"));
        assert!(rows[2].starts_with("1,0,0,0.5,0,0,"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_summary_json_written() {
        let job = small_job();
        let grid = run_job(&job).unwrap();
        let dir = scratch_dir("json");
        let path = dir.join("summary.json");

        let summary = FieldSummary::from_samples(&grid.samples());
        write_summary_json(&summary, &path).unwrap();

        let back: FieldSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.cells, 12);
        assert_eq!(back.magnetic_max, 1.5);

        std::fs::remove_dir_all(&dir).ok();
    }
}
