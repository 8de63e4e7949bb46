//! Regular 3D lattice of electric and magnetic field samples.
//!
//! Lattice point `(i, j, k)` sits at world position
//! `(i * spacing, j * spacing, k * spacing)`. Both sample sequences are stored
//! flat with `i` varying fastest; the flat index is private to this module and
//! callers address cells by their lattice coordinates only.
//!
//! Stamps visit every cell exactly once per call, so they run data-parallel
//! over the rayon pool and join before returning.

use std::f64::consts::PI;

use rayon::prelude::*;
use thiserror::Error;

use crate::constants::EPSILON_0;
use crate::vector::Vector3;

/// Errors raised when constructing a [`FieldGrid`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error(
        "Invalid grid dimensions {nx}x{ny}x{nz} with spacing {spacing}: \
         extents must be non-zero and spacing positive and finite"
    )]
    InvalidDimension {
        nx: usize,
        ny: usize,
        nz: usize,
        spacing: f64,
    },
}

/// A fixed-size lattice owning one electric and one magnetic sample per cell.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    /// World distance between adjacent lattice points.
    spacing: f64,
    electric: Vec<Vector3>,
    magnetic: Vec<Vector3>,
    /// Simulated time advanced by [`FieldGrid::update`].
    elapsed: f64,
}

impl FieldGrid {
    /// Allocate an `nx × ny × nz` lattice with every sample at zero.
    ///
    /// Fails with [`GridError::InvalidDimension`] if any extent is zero, the
    /// cell count overflows, or `spacing` is not a positive finite number.
    pub fn new(nx: usize, ny: usize, nz: usize, spacing: f64) -> Result<Self, GridError> {
        let invalid = GridError::InvalidDimension { nx, ny, nz, spacing };

        if nx == 0 || ny == 0 || nz == 0 || !(spacing.is_finite() && spacing > 0.0) {
            return Err(invalid);
        }
        let cells = nx
            .checked_mul(ny)
            .and_then(|n| n.checked_mul(nz))
            .ok_or(invalid)?;

        log::debug!("allocating {}x{}x{} field grid (spacing {})", nx, ny, nz, spacing);

        Ok(Self {
            nx,
            ny,
            nz,
            spacing,
            electric: vec![Vector3::ZERO; cells],
            magnetic: vec![Vector3::ZERO; cells],
            elapsed: 0.0,
        })
    }

    /// Lattice extents `(nx, ny, nz)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of cells, `nx * ny * nz`.
    pub fn len(&self) -> usize {
        self.electric.len()
    }

    /// Always false: construction rejects empty lattices.
    pub fn is_empty(&self) -> bool {
        self.electric.is_empty()
    }

    /// Total simulated time passed to [`FieldGrid::update`].
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn contains_cell(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.nx && j < self.ny && k < self.nz
    }

    /// World position of lattice point `(i, j, k)`.
    pub fn position_of(&self, i: usize, j: usize, k: usize) -> Vector3 {
        lattice_position(i, j, k, self.spacing)
    }

    /// Overwrite the electric field with the Coulomb field of a point charge.
    ///
    /// Each cell at displacement $\mathbf{r}$ from the charge receives
    /// $\mathbf{E} = \frac{q}{4\pi\epsilon_0 |\mathbf{r}|^2}\hat{\mathbf{r}}$.
    /// A cell coinciding exactly with the charge is left untouched. Previous
    /// contributions are discarded, not superposed.
    pub fn apply_point_charge_field(&mut self, position: Vector3, magnitude: f64) {
        let (nx, ny) = (self.nx, self.ny);
        let spacing = self.spacing;
        let denom = 4.0 * PI * EPSILON_0;

        log::debug!(
            "stamping point charge q={:e} C at {} onto {} cells",
            magnitude,
            position,
            self.electric.len()
        );

        self.electric
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, e)| {
                let (i, j, k) = unflatten(idx, nx, ny);
                let r = lattice_position(i, j, k, spacing) - position;
                let r_mag = r.magnitude();
                if r_mag > 0.0 {
                    let strength = magnitude / (denom * r_mag * r_mag);
                    *e = r * (strength / r_mag);
                }
            });
    }

    /// Add a uniform `(0, 0, strength)` to every magnetic sample.
    ///
    /// This is not a Biot–Savart field: `position` does not influence the
    /// result. Repeated calls accumulate.
    pub fn apply_current_contribution(&mut self, position: Vector3, strength: f64) {
        log::debug!(
            "stamping uniform current contribution {} (source at {} is ignored)",
            strength,
            position
        );

        let delta = Vector3::new(0.0, 0.0, strength);
        self.magnetic.par_iter_mut().for_each(|b| *b += delta);
    }

    /// Advance the simulation clock by `dt`.
    ///
    /// The samples are left exactly as they are; this is the hook where a
    /// curl-based time-stepping scheme would go.
    pub fn update(&mut self, dt: f64) {
        self.elapsed += dt;
        log::trace!("update dt={} (t={})", dt, self.elapsed);
    }

    /// Borrow the current samples for reading.
    pub fn samples(&self) -> FieldSamples<'_> {
        FieldSamples {
            nx: self.nx,
            ny: self.ny,
            nz: self.nz,
            spacing: self.spacing,
            electric: &self.electric,
            magnetic: &self.magnetic,
        }
    }
}

/// Read-only view of a grid's samples, valid while the grid is borrowed.
#[derive(Debug, Clone, Copy)]
pub struct FieldSamples<'a> {
    nx: usize,
    ny: usize,
    nz: usize,
    spacing: f64,
    electric: &'a [Vector3],
    magnetic: &'a [Vector3],
}

impl<'a> FieldSamples<'a> {
    /// Electric samples in grid index order (`i` fastest, then `j`, then `k`).
    pub fn electric(&self) -> &'a [Vector3] {
        self.electric
    }

    /// Magnetic samples in grid index order.
    pub fn magnetic(&self) -> &'a [Vector3] {
        self.magnetic
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.electric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.electric.is_empty()
    }

    /// `(electric, magnetic)` at lattice point `(i, j, k)`, or `None` out of range.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<(Vector3, Vector3)> {
        if i < self.nx && j < self.ny && k < self.nz {
            let idx = flatten(i, j, k, self.nx, self.ny);
            Some((self.electric[idx], self.magnetic[idx]))
        } else {
            None
        }
    }

    pub fn position_of(&self, i: usize, j: usize, k: usize) -> Vector3 {
        lattice_position(i, j, k, self.spacing)
    }

    /// Iterate all cells in grid index order as `((i, j, k), electric, magnetic)`.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize, usize), Vector3, Vector3)> + 'a {
        let (nx, ny) = (self.nx, self.ny);
        self.electric
            .iter()
            .zip(self.magnetic.iter())
            .enumerate()
            .map(move |(idx, (&e, &b))| (unflatten(idx, nx, ny), e, b))
    }
}

#[inline]
fn flatten(i: usize, j: usize, k: usize, nx: usize, ny: usize) -> usize {
    i + nx * (j + ny * k)
}

#[inline]
fn unflatten(idx: usize, nx: usize, ny: usize) -> (usize, usize, usize) {
    let i = idx % nx;
    let rest = idx / nx;
    (i, rest % ny, rest / ny)
}

#[inline]
fn lattice_position(i: usize, j: usize, k: usize, spacing: f64) -> Vector3 {
    Vector3::new(
        i as f64 * spacing,
        j as f64 * spacing,
        k as f64 * spacing,
    )
}
