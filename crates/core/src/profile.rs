//! Value bounds and the per-channel parameter bundle used in manual mode.

use thiserror::Error;

/// Closed interval a channel's value is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `x` into the bounds.
    ///
    /// Unlike `f64::clamp` this never panics: inverted bounds (`min > max`)
    /// pin every value to `min`.
    pub fn clamp(&self, x: f64) -> f64 {
        x.min(self.max).max(self.min)
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Both ends moved by `delta`.
    pub fn shifted(&self, delta: f64) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }
}

/// Every knob of a manually configured channel.
///
/// Rates are per second of wall-clock time; the noise and daily terms are
/// multiplied by `dt` on each update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelProfile {
    pub bounds: Bounds,
    /// Half-width of the uniform walk step per second.
    pub drift_rate_per_sec: f64,
    /// Gaussian noise standard deviation per second.
    pub noise_std_per_sec: f64,
    /// Amplitude of the symmetric daily cycle.  Zero disables it.
    pub daily_amplitude: f64,
    /// Phase shift of the daily cycle in fractions of a day.
    pub daily_phase: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("min bound ({min}) exceeds max bound ({max})")]
    InvertedBounds { min: f64, max: f64 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

impl ChannelProfile {
    pub fn new(bounds: Bounds, drift_rate_per_sec: f64, noise_std_per_sec: f64) -> Self {
        Self {
            bounds,
            drift_rate_per_sec,
            noise_std_per_sec,
            daily_amplitude: 0.0,
            daily_phase: 0.0,
        }
    }

    pub fn with_daily_cycle(mut self, amplitude: f64, phase: f64) -> Self {
        self.daily_amplitude = amplitude;
        self.daily_phase = phase;
        self
    }

    /// Report every violation, not just the first.
    ///
    /// The model itself tolerates all of these; this is for callers who want
    /// to reject bad configuration up front.
    pub fn validate(&self) -> Result<(), Vec<ProfileError>> {
        let mut errors = Vec::new();

        let fields = [
            ("min bound", self.bounds.min),
            ("max bound", self.bounds.max),
            ("drift rate", self.drift_rate_per_sec),
            ("noise std", self.noise_std_per_sec),
            ("daily amplitude", self.daily_amplitude),
            ("daily phase", self.daily_phase),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                errors.push(ProfileError::NotFinite { field, value });
            }
        }

        if self.bounds.min > self.bounds.max {
            errors.push(ProfileError::InvertedBounds {
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }

        let non_negative = [
            ("drift rate", self.drift_rate_per_sec),
            ("noise std", self.noise_std_per_sec),
            ("daily amplitude", self.daily_amplitude),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                errors.push(ProfileError::Negative { field, value });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Check a simulated-clock time scale (simulated hours per wall-clock second).
pub fn validate_time_scale(time_scale: f64) -> Result<(), ProfileError> {
    if !time_scale.is_finite() {
        Err(ProfileError::NotFinite {
            field: "time scale",
            value: time_scale,
        })
    } else if time_scale < 0.0 {
        Err(ProfileError::Negative {
            field: "time scale",
            value: time_scale,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ChannelProfile {
        ChannelProfile::new(Bounds::new(20.0, 30.0), 0.05, 0.01)
    }

    #[test]
    fn clamp_inside_outside() {
        let b = Bounds::new(1.0, 2.0);
        assert_eq!(b.clamp(1.5), 1.5);
        assert_eq!(b.clamp(0.0), 1.0);
        assert_eq!(b.clamp(9.0), 2.0);
    }

    #[test]
    fn inverted_bounds_pin_to_min() {
        let b = Bounds::new(5.0, 1.0);
        for x in [-10.0, 0.0, 1.0, 3.0, 5.0, 100.0] {
            assert_eq!(b.clamp(x), 5.0, "x={x}");
        }
    }

    #[test]
    fn shifted_moves_both_ends() {
        assert_eq!(Bounds::new(27.0, 32.0).shifted(0.4), Bounds::new(27.4, 32.4));
    }

    #[test]
    fn valid_profile_passes() {
        valid().validate().unwrap();
        valid().with_daily_cycle(2.0, 0.25).validate().unwrap();
    }

    #[test]
    fn reports_all_violations() {
        let p = ChannelProfile {
            bounds: Bounds::new(10.0, 0.0),
            drift_rate_per_sec: -1.0,
            noise_std_per_sec: -0.5,
            daily_amplitude: -2.0,
            daily_phase: 0.0,
        };
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.contains(&ProfileError::InvertedBounds { min: 10.0, max: 0.0 }));
    }

    #[test]
    fn rejects_non_finite() {
        let mut p = valid();
        p.daily_phase = f64::NAN;
        let errors = p.validate().unwrap_err();
        assert!(matches!(errors[0], ProfileError::NotFinite { field: "daily phase", .. }));
    }

    #[test]
    fn error_messages_are_readable() {
        let e = ProfileError::Negative {
            field: "noise std",
            value: -1.0,
        };
        assert_eq!(e.to_string(), "noise std must not be negative, got -1");
    }

    #[test]
    fn time_scale_checks() {
        validate_time_scale(0.0).unwrap();
        validate_time_scale(0.02).unwrap();
        assert!(validate_time_scale(-0.1).is_err());
        assert!(validate_time_scale(f64::INFINITY).is_err());
    }
}
