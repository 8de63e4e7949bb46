//! # emviz View
//!
//! Presentation helpers shared by emviz front ends. Nothing here owns a
//! window or reads input devices; callers pass input and frame timing in
//! explicitly and get matrices, screen positions and colours back.
//!
//! - [`camera`] — Free-fly camera with yaw/pitch mouse look and WASD motion.
//! - [`projection`] — World-to-screen projection with depth ordering.
//! - [`colour`] — Field-strength colour ramp.

pub mod camera;
pub mod colour;
pub mod projection;

pub use camera::{FlyCamera, Movement};
pub use projection::{project_point, project_streams, ScreenPoint, Viewport};
