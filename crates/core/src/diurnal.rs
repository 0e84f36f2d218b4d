//! Day/night forcing as functions of simulated hour of day.

use std::f64::consts::{FRAC_PI_2, TAU};

pub const HOURS_PER_DAY: f64 = 24.0;

/// Symmetric daily cycle in `[-1, 1]`.  `phase` is in fractions of a day.
pub fn cycle(hour: f64, phase: f64) -> f64 {
    (TAU * (hour / HOURS_PER_DAY + phase)).sin()
}

/// Smooth daylight curve in `[0, peak]`: zero at midnight, `peak` at noon,
/// sunrise/sunset half-way at 06:00 and 18:00.
pub fn daylight(hour: f64, peak: f64) -> f64 {
    let angle = TAU * (hour / HOURS_PER_DAY) - FRAC_PI_2;
    peak * (angle.sin() + 1.0) * 0.5
}

/// Advance an hour-of-day by `hours`, wrapping into `[0, 24)`.
pub fn advance_hour(hour: f64, hours: f64) -> f64 {
    wrap_hour(hour + hours)
}

/// Wrap into `[0, 24)`.  Non-finite input maps to midnight.
pub fn wrap_hour(hour: f64) -> f64 {
    if !hour.is_finite() {
        return 0.0;
    }
    let h = hour.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if h >= HOURS_PER_DAY {
        0.0
    } else {
        h
    }
}
