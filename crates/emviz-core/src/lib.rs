//! # emviz Core
//!
//! The field model behind the emviz visualiser. This crate owns a regular 3D
//! lattice of electric and magnetic field samples and the analytic stamps
//! that write into it. It performs no I/O and knows nothing about windows,
//! cameras or GPUs; renderers and drivers borrow the samples once per frame.
//!
//! ## Modules
//!
//! - [`vector`] — Double-precision 3-vector used throughout the crate.
//! - [`grid`] — The [`FieldGrid`](grid::FieldGrid) lattice and its stamps.
//! - [`constants`] — Physical constants (SI).
//! - [`stream`] — Flat `f32` attribute streams for renderers.
//! - [`summary`] — Aggregate statistics over a sample view.
//!
//! # Example
//!
//! ```
//! use emviz_core::{FieldGrid, Vector3};
//!
//! let mut grid = FieldGrid::new(11, 11, 11, 1.0).unwrap();
//! grid.apply_point_charge_field(Vector3::new(5.0, 5.0, 5.0), 1e-9);
//! grid.update(0.005);
//!
//! let samples = grid.samples();
//! let (e, _b) = samples.get(6, 5, 5).unwrap();
//! assert!(e.x > 0.0);
//! ```

pub mod constants;
pub mod grid;
pub mod stream;
pub mod summary;
pub mod vector;

pub use grid::{FieldGrid, FieldSamples, GridError};
pub use stream::{FieldKind, VertexStreams};
pub use summary::FieldSummary;
pub use vector::Vector3;
