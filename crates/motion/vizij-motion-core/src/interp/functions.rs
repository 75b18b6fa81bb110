//! Interpolation helpers:
//! - ease_sine (fade ramps)
//! - lerp_f32 (curve segments)

use std::f32::consts::PI;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalized sine ease over [0, 1].
/// Inputs at or below 0 map to 0, at or above 1 map to 1.
#[inline]
pub fn ease_sine(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    0.5 - 0.5 * (x * PI).cos()
}
