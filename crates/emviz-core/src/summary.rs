//! Aggregate statistics over a sample view.

use serde::{Deserialize, Serialize};

use crate::grid::FieldSamples;

/// Magnitude statistics for a grid, suitable for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Lattice extents `[nx, ny, nz]`.
    pub dims: [usize; 3],
    /// Lattice spacing.
    pub spacing: f64,
    /// Number of cells.
    pub cells: usize,
    /// Smallest |E| over all cells.
    pub electric_min: f64,
    /// Largest |E| over all cells.
    pub electric_max: f64,
    /// Mean |E| over all cells.
    pub electric_mean: f64,
    /// Largest |B| over all cells.
    pub magnetic_max: f64,
    /// Cells whose electric or magnetic sample has a NaN/inf component.
    pub non_finite: usize,
}

impl FieldSummary {
    pub fn from_samples(samples: &FieldSamples<'_>) -> Self {
        let (nx, ny, nz) = samples.dims();

        let mut e_min = f64::INFINITY;
        let mut e_max = 0.0_f64;
        let mut e_sum = 0.0_f64;
        let mut b_max = 0.0_f64;
        let mut non_finite = 0usize;

        for (_, e, b) in samples.cells() {
            if !(e.is_finite() && b.is_finite()) {
                non_finite += 1;
                continue;
            }
            let e_mag = e.magnitude();
            e_min = e_min.min(e_mag);
            e_max = e_max.max(e_mag);
            e_sum += e_mag;
            b_max = b_max.max(b.magnitude());
        }

        let finite = samples.len() - non_finite;
        Self {
            dims: [nx, ny, nz],
            spacing: samples.spacing(),
            cells: samples.len(),
            electric_min: if finite > 0 { e_min } else { 0.0 },
            electric_max: e_max,
            electric_mean: if finite > 0 { e_sum / finite as f64 } else { 0.0 },
            magnetic_max: b_max,
            non_finite,
        }
    }
}
