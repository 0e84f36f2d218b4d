//! Per-quantity channel state, the simulated day clock, and the per-tick
//! dynamics dispatch.

use crate::diurnal;
use crate::noise::gaussian;
use crate::profile::{Bounds, ChannelProfile};
use crate::rng::UniformDraw;
use crate::walk::bounded_random_walk;

// ---------------------------------------------------------------------------
// Simulated clock
// ---------------------------------------------------------------------------

/// Wall-clock bookkeeping plus simulated hour of day.
///
/// Shared by every channel of one sensor so their daily cycles stay in step.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    hour: f64,
    last_update_ms: u64,
    /// Simulated hours per wall-clock second.  Zero freezes the day.
    time_scale: f64,
}

impl SimClock {
    pub fn new(now_ms: u64, time_scale: f64) -> Self {
        Self {
            hour: 0.0,
            last_update_ms: now_ms,
            time_scale,
        }
    }

    /// Start the simulated day at `hour` instead of midnight.
    pub fn with_hour(mut self, hour: f64) -> Self {
        self.hour = diurnal::wrap_hour(hour);
        self
    }

    /// Consume the wall-clock delta up to `now_ms`.
    ///
    /// Returns the elapsed seconds, or `None` when the reading is not newer
    /// than the last one.  In that case nothing changes, so the next real
    /// delta is measured from the last accepted reading.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        if now_ms <= self.last_update_ms {
            return None;
        }
        let dt = (now_ms - self.last_update_ms) as f64 / 1000.0;
        // a non-finite time scale leaves the simulated day where it is
        let hours = dt * self.time_scale;
        if hours.is_finite() {
            self.hour = diurnal::advance_hour(self.hour, hours);
        }
        self.last_update_ms = now_ms;
        Some(dt)
    }

    pub fn hour(&self) -> f64 {
        self.hour
    }

    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }
}

// ---------------------------------------------------------------------------
// Dynamics
// ---------------------------------------------------------------------------

/// Hours of the day during which a schedule is active: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourWindow {
    pub start: f64,
    pub end: f64,
}

impl HourWindow {
    pub fn contains(&self, hour: f64) -> bool {
        hour >= self.start && hour < self.end
    }
}

/// How a channel's value evolves on each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamics {
    /// Plain bounded random walk.
    Walk { bounds: Bounds, rate: f64 },
    /// Random walk whose bounds rise and fall with the daily cycle by up to
    /// `swing` in either direction.
    DailySwing { bounds: Bounds, swing: f64, rate: f64 },
    /// Random walk with one set of bounds while `window` covers the hour and
    /// another outside it (e.g. office air conditioning).
    Scheduled {
        window: HourWindow,
        active: Bounds,
        idle: Bounds,
        rate: f64,
    },
    /// Value set directly from the daylight curve each tick, optionally scaled
    /// by a random cloud factor, plus noise with `noise_std * dt`.
    Daylight {
        peak: f64,
        bounds: Bounds,
        noise_std: f64,
        cloud_factor: Option<Bounds>,
    },
    /// Fully caller-specified walk, noise and daily cycle.
    Manual(ChannelProfile),
}

impl Dynamics {
    /// Bounds in force at simulated `hour`.
    pub fn active_bounds(&self, hour: f64) -> Bounds {
        match self {
            Self::Walk { bounds, .. } | Self::Daylight { bounds, .. } => *bounds,
            Self::DailySwing { bounds, swing, .. } => {
                bounds.shifted(swing * diurnal::cycle(hour, 0.0))
            }
            Self::Scheduled {
                window,
                active,
                idle,
                ..
            } => {
                if window.contains(hour) {
                    *active
                } else {
                    *idle
                }
            }
            Self::Manual(profile) => profile.bounds,
        }
    }

    fn step(&self, draw: &mut UniformDraw, current: f64, hour: f64, dt: f64) -> f64 {
        match self {
            Self::Walk { rate, .. }
            | Self::DailySwing { rate, .. }
            | Self::Scheduled { rate, .. } => {
                bounded_random_walk(draw, current, self.active_bounds(hour), *rate, dt)
            }
            Self::Daylight {
                peak,
                bounds,
                noise_std,
                cloud_factor,
            } => {
                let mut lux = diurnal::daylight(hour, *peak);
                if let Some(cloud) = cloud_factor {
                    lux *= draw.draw(cloud.min, cloud.max);
                }
                bounds.clamp(lux + gaussian(draw, noise_std * dt))
            }
            Self::Manual(p) => {
                let step = p.drift_rate_per_sec * dt;
                let mut v = current + draw.draw(-step, step);
                v += gaussian(draw, p.noise_std_per_sec * dt);
                if p.daily_amplitude > 0.0 {
                    // rate-like: amplitude per second, not an absolute offset
                    v += p.daily_amplitude * diurnal::cycle(hour, p.daily_phase) * dt;
                }
                p.bounds.clamp(v)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Initial value of a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    Fixed(f64),
    Uniform(Bounds),
}

impl Seed {
    fn resolve(self, draw: &mut UniformDraw) -> f64 {
        match self {
            Self::Fixed(v) => v,
            Self::Uniform(b) => draw.draw(b.min, b.max),
        }
    }
}

/// One physical quantity (temperature, humidity or illuminance).
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentChannel {
    value: f64,
    dynamics: Dynamics,
}

impl EnvironmentChannel {
    pub fn new(seed: Seed, dynamics: Dynamics, draw: &mut UniformDraw) -> Self {
        Self {
            value: seed.resolve(draw),
            dynamics,
        }
    }

    /// Evolve the value by `dt` seconds at simulated `hour`.  `dt <= 0` is
    /// ignored.
    pub fn advance(&mut self, draw: &mut UniformDraw, hour: f64, dt: f64) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.value = self.dynamics.step(draw, self.value, hour, dt);
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn dynamics(&self) -> &Dynamics {
        &self.dynamics
    }

    pub fn active_bounds(&self, hour: f64) -> Bounds {
        self.dynamics.active_bounds(hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office_ac() -> Dynamics {
        Dynamics::Scheduled {
            window: HourWindow {
                start: 9.0,
                end: 18.0,
            },
            active: Bounds::new(21.2, 22.0),
            idle: Bounds::new(22.8, 23.2),
            rate: 0.03,
        }
    }

    // -- SimClock -----------------------------------------------------------

    #[test]
    fn clock_reports_seconds() {
        let mut c = SimClock::new(1_000, 0.0);
        assert_eq!(c.tick(3_500), Some(2.5));
        assert_eq!(c.last_update_ms(), 3_500);
    }

    #[test]
    fn clock_ignores_same_or_older_reading() {
        let mut c = SimClock::new(5_000, 1.0).with_hour(10.0);
        assert_eq!(c.tick(5_000), None);
        assert_eq!(c.tick(4_000), None);
        assert_eq!(c.last_update_ms(), 5_000);
        assert_eq!(c.hour(), 10.0);

        // next delta is still measured from 5_000
        assert_eq!(c.tick(6_000), Some(1.0));
    }

    #[test]
    fn clock_hour_wraps() {
        // 1 simulated hour per second, 25 seconds later -> 01:00
        let mut c = SimClock::new(0, 1.0);
        c.tick(25_000);
        assert!((c.hour() - 1.0).abs() < 1e-9, "hour={}", c.hour());
    }

    #[test]
    fn non_finite_start_hour_or_time_scale_keeps_hour_in_range() {
        let mut c = SimClock::new(0, 1.0).with_hour(f64::NAN);
        assert_eq!(c.hour(), 0.0);
        c.tick(2_000);
        assert!((c.hour() - 2.0).abs() < 1e-9, "hour={}", c.hour());

        let mut c = SimClock::new(0, f64::INFINITY).with_hour(5.0);
        assert_eq!(c.tick(1_000), Some(1.0));
        assert_eq!(c.hour(), 5.0);
    }

    #[test]
    fn zero_time_scale_freezes_day() {
        let mut c = SimClock::new(0, 0.0).with_hour(13.0);
        assert_eq!(c.time_scale(), 0.0);
        c.tick(3_600_000);
        assert_eq!(c.hour(), 13.0);
    }

    // -- Dynamics -----------------------------------------------------------

    #[test]
    fn schedule_switches_exactly_at_window_start() {
        let d = office_ac();
        assert_eq!(d.active_bounds(9.0), Bounds::new(21.2, 22.0));
        assert_eq!(d.active_bounds(8.999), Bounds::new(22.8, 23.2));
        assert_eq!(d.active_bounds(17.999), Bounds::new(21.2, 22.0));
        assert_eq!(d.active_bounds(18.0), Bounds::new(22.8, 23.2));
    }

    #[test]
    fn daily_swing_follows_cycle() {
        let d = Dynamics::DailySwing {
            bounds: Bounds::new(27.0, 32.0),
            swing: 0.4,
            rate: 0.05,
        };
        let b = d.active_bounds(6.0);
        assert!((b.min - 27.4).abs() < 1e-9 && (b.max - 32.4).abs() < 1e-9);
        let b = d.active_bounds(18.0);
        assert!((b.min - 26.6).abs() < 1e-9 && (b.max - 31.6).abs() < 1e-9);
    }

    #[test]
    fn daylight_without_noise_tracks_curve() {
        let mut draw = UniformDraw::with_seed(1);
        let mut ch = EnvironmentChannel::new(
            Seed::Fixed(0.0),
            Dynamics::Daylight {
                peak: 1000.0,
                bounds: Bounds::new(0.0, 1000.0),
                noise_std: 0.0,
                cloud_factor: None,
            },
            &mut draw,
        );
        ch.advance(&mut draw, 12.0, 1.0);
        assert!((ch.value() - 1000.0).abs() < 1e-6);
        ch.advance(&mut draw, 0.0, 1.0);
        assert!(ch.value().abs() < 1e-6);
    }

    #[test]
    fn cloud_factor_dims_daylight() {
        let mut draw = UniformDraw::with_seed(2);
        let mut ch = EnvironmentChannel::new(
            Seed::Fixed(0.0),
            Dynamics::Daylight {
                peak: 25_000.0,
                bounds: Bounds::new(0.0, 25_000.0),
                noise_std: 0.0,
                cloud_factor: Some(Bounds::new(0.4, 0.8)),
            },
            &mut draw,
        );
        for _ in 0..200 {
            ch.advance(&mut draw, 12.0, 0.5);
            assert!(
                (10_000.0..=20_000.0).contains(&ch.value()),
                "cloudy noon out of range: {}",
                ch.value()
            );
        }
    }

    #[test]
    fn manual_without_noise_or_drift_follows_rate_like_cycle() {
        let mut draw = UniformDraw::with_seed(3);
        let profile =
            ChannelProfile::new(Bounds::new(0.0, 100.0), 0.0, 0.0).with_daily_cycle(2.0, 0.0);
        let mut ch = EnvironmentChannel::new(Seed::Fixed(50.0), Dynamics::Manual(profile), &mut draw);
        // cycle(6h) = 1, so the value moves by amplitude * dt
        ch.advance(&mut draw, 6.0, 0.5);
        assert!((ch.value() - 51.0).abs() < 1e-9, "value={}", ch.value());
    }

    #[test]
    fn manual_inverted_bounds_pin_to_min() {
        let mut draw = UniformDraw::with_seed(4);
        let profile = ChannelProfile::new(Bounds::new(10.0, 0.0), 1.0, 1.0);
        let mut ch = EnvironmentChannel::new(Seed::Uniform(profile.bounds), Dynamics::Manual(profile), &mut draw);
        for _ in 0..20 {
            ch.advance(&mut draw, 0.0, 1.0);
            assert_eq!(ch.value(), 10.0);
        }
    }

    #[test]
    fn advance_with_zero_dt_keeps_value() {
        let mut draw = UniformDraw::with_seed(5);
        let mut ch = EnvironmentChannel::new(
            Seed::Fixed(22.5),
            Dynamics::Walk {
                bounds: Bounds::new(22.4, 23.1),
                rate: 0.02,
            },
            &mut draw,
        );
        ch.advance(&mut draw, 3.0, 0.0);
        ch.advance(&mut draw, 3.0, -1.0);
        assert_eq!(ch.value(), 22.5);
        assert!(matches!(ch.dynamics(), Dynamics::Walk { rate, .. } if *rate == 0.02));
    }
}
