//! Field-strength colour ramp.
//!
//! Coulomb magnitudes span many orders of magnitude across a grid, so
//! strengths are first mapped logarithmically onto [0, 1] relative to the
//! strongest sample, then onto a blue → red ramp.

/// Map a magnitude onto [0, 1] on a log scale covering `decades` orders of
/// magnitude below `max`. Non-positive inputs map to 0.
pub fn normalised_strength(magnitude: f32, max: f32, decades: f32) -> f32 {
    if !(magnitude > 0.0 && max > 0.0 && decades > 0.0) {
        return 0.0;
    }
    (1.0 + (magnitude / max).log10() / decades).clamp(0.0, 1.0)
}

/// RGB colour `(t, 0, 1 - t)` for a normalised strength `t`.
pub fn field_colour(t: f32) -> [u8; 3] {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    [(t * 255.0).round() as u8, 0, ((1.0 - t) * 255.0).round() as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(field_colour(0.0), [0, 0, 255]);
        assert_eq!(field_colour(1.0), [255, 0, 0]);
        assert_eq!(field_colour(2.0), [255, 0, 0]);
        assert_eq!(field_colour(f32::NAN), [0, 0, 255]);
    }

    #[test]
    fn test_log_normalisation() {
        assert_relative_eq!(normalised_strength(100.0, 100.0, 4.0), 1.0);
        assert_relative_eq!(normalised_strength(1.0, 100.0, 4.0), 0.5, epsilon = 1e-6);
        assert_eq!(normalised_strength(1e-9, 100.0, 4.0), 0.0);
        assert_eq!(normalised_strength(0.0, 100.0, 4.0), 0.0);
        assert_eq!(normalised_strength(5.0, 0.0, 4.0), 0.0);
    }
}
