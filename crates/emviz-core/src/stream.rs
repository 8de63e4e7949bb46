//! Flat attribute streams for renderers.
//!
//! Renderers upload per-point attributes as tightly packed `f32` arrays. A
//! [`VertexStreams`] holds one lattice position, one field vector and one
//! field magnitude per cell, all in grid index order so that attribute `n`
//! of every stream refers to the same cell.

use crate::grid::FieldSamples;

/// Which of the two sampled fields to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Electric,
    Magnetic,
}

/// Packed per-cell attributes ready for upload.
#[derive(Debug, Clone, Default)]
pub struct VertexStreams {
    /// World positions, three floats per cell.
    pub positions: Vec<f32>,
    /// Field vectors, three floats per cell.
    pub fields: Vec<f32>,
    /// Field magnitudes, one float per cell.
    pub magnitudes: Vec<f32>,
}

impl VertexStreams {
    /// Pack the chosen field of `samples` into attribute streams.
    pub fn from_samples(samples: &FieldSamples<'_>, kind: FieldKind) -> Self {
        let n = samples.len();
        let mut streams = Self {
            positions: Vec::with_capacity(n * 3),
            fields: Vec::with_capacity(n * 3),
            magnitudes: Vec::with_capacity(n),
        };

        for ((i, j, k), e, b) in samples.cells() {
            let p = samples.position_of(i, j, k);
            let f = match kind {
                FieldKind::Electric => e,
                FieldKind::Magnetic => b,
            };
            streams
                .positions
                .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            streams
                .fields
                .extend_from_slice(&[f.x as f32, f.y as f32, f.z as f32]);
            streams.magnitudes.push(f.magnitude() as f32);
        }

        streams
    }

    /// Number of points (cells) in the streams.
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Position of point `n` as `[x, y, z]`.
    ///
    /// # Panics
    ///
    /// Panics if `n >= self.len()`.
    pub fn position(&self, n: usize) -> [f32; 3] {
        let base = n * 3;
        [
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        ]
    }

    /// Largest finite magnitude in the stream, or 0 when there is none.
    pub fn max_magnitude(&self) -> f32 {
        self.magnitudes
            .iter()
            .copied()
            .filter(|m| m.is_finite())
            .fold(0.0_f32, f32::max)
    }
}
