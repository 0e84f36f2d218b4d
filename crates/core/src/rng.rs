//! Uniform random draws backing every stochastic term in the model.

/// Seedable uniform float source.
///
/// Each sensor owns one of these, so two sensors built from the same seed and
/// driven with the same timestamps produce identical readings.
#[derive(Debug, Clone)]
pub struct UniformDraw {
    rng: fastrand::Rng,
}

impl UniformDraw {
    /// Deterministic source for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Uniform value in `[a, b)`.  Returns `a` when `a == b`.
    ///
    /// The result inherits the resolution of the underlying 53-bit draw; any
    /// bias toward an endpoint is below that quantization.
    pub fn draw(&mut self, a: f64, b: f64) -> f64 {
        if a == b {
            return a;
        }
        a + (b - a) * self.rng.f64()
    }

    /// Uniform value in `(0, 1]`.  Never exactly zero, so safe to feed to `ln`.
    pub fn unit_open_low(&mut self) -> f64 {
        1.0 - self.rng.f64()
    }
}

impl Default for UniformDraw {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_stays_in_half_open_range() {
        let mut d = UniformDraw::with_seed(7);
        for _ in 0..10_000 {
            let v = d.draw(-2.5, 4.0);
            assert!((-2.5..4.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn degenerate_range_returns_endpoint() {
        let mut d = UniformDraw::with_seed(1);
        assert_eq!(d.draw(3.25, 3.25), 3.25);
        assert_eq!(d.draw(0.0, 0.0), 0.0);
    }

    #[test]
    fn unit_open_low_never_zero() {
        let mut d = UniformDraw::with_seed(99);
        for _ in 0..10_000 {
            let u = d.unit_open_low();
            assert!(u > 0.0 && u <= 1.0, "unit sample out of (0,1]: {u}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = UniformDraw::with_seed(42);
        let mut b = UniformDraw::with_seed(42);
        for _ in 0..100 {
            assert_eq!(a.draw(0.0, 10.0), b.draw(0.0, 10.0));
        }
    }

    #[test]
    fn draw_is_not_stuck_at_one_end() {
        let mut d = UniformDraw::with_seed(5);
        let n = 5000;
        let mean = (0..n).map(|_| d.draw(0.0, 1.0)).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.03, "uniform mean drifted: {mean}");
    }
}
