//! Physical constants (SI units).

/// Vacuum permittivity ε₀ (F/m).
pub const EPSILON_0: f64 = 8.854e-12;
