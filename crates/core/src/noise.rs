//! Gaussian noise from uniform draws (Box-Muller).

use std::f64::consts::TAU;

use crate::rng::UniformDraw;

/// Sample from N(0, std²).
///
/// Both uniforms come from `(0, 1]`, so `ln(u1)` is always finite.  A
/// non-positive or non-finite `std` means "no noise" and returns exactly 0.
pub fn gaussian(draw: &mut UniformDraw, std: f64) -> f64 {
    if !std.is_finite() || std <= 0.0 {
        return 0.0;
    }
    let u1 = draw.unit_open_low();
    let u2 = draw.unit_open_low();
    std * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
