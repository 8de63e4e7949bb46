//! GUI panels for the emviz viewer.

pub mod controls;
pub mod viewport;
