//! dt-aware bounded random walk.

use crate::profile::Bounds;
use crate::rng::UniformDraw;

/// Move `current` by a uniform step in `±rate_per_sec * dt`, then clamp.
///
/// With `dt <= 0` nothing happens: no entropy is consumed and `current` is
/// returned as is, even when it lies outside `bounds`.
pub fn bounded_random_walk(
    draw: &mut UniformDraw,
    current: f64,
    bounds: Bounds,
    rate_per_sec: f64,
    dt: f64,
) -> f64 {
    if dt.is_nan() || dt <= 0.0 {
        return current;
    }
    let step = rate_per_sec * dt;
    bounds.clamp(current + draw.draw(-step, step))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_bounds() {
        let mut d = UniformDraw::with_seed(1);
        let b = Bounds::new(22.4, 23.1);
        let mut v = 22.7;
        for _ in 0..10_000 {
            v = bounded_random_walk(&mut d, v, b, 0.02, 5.0);
            assert!(b.contains(v), "escaped bounds: {v}");
        }
    }

    #[test]
    fn single_step_never_exceeds_rate_times_dt() {
        let mut d = UniformDraw::with_seed(2);
        let b = Bounds::new(-1e9, 1e9);
        let mut v = 0.0;
        for _ in 0..5_000 {
            let next = bounded_random_walk(&mut d, v, b, 0.5, 0.2);
            assert!((next - v).abs() <= 0.1 + 1e-12, "step too big: {}", next - v);
            v = next;
        }
    }

    #[test]
    fn non_positive_dt_is_a_no_op() {
        let mut d = UniformDraw::with_seed(3);
        let b = Bounds::new(0.0, 10.0);
        assert_eq!(bounded_random_walk(&mut d, 4.2, b, 1.0, 0.0), 4.2);
        assert_eq!(bounded_random_walk(&mut d, 4.2, b, 1.0, -3.0), 4.2);
        // out-of-bounds values are left alone too
        assert_eq!(bounded_random_walk(&mut d, 99.0, b, 1.0, 0.0), 99.0);
        assert_eq!(bounded_random_walk(&mut d, -5.0, b, 1.0, f64::NAN), -5.0);
    }

    #[test]
    fn out_of_bounds_start_is_pulled_in() {
        let mut d = UniformDraw::with_seed(4);
        let b = Bounds::new(21.2, 22.0);
        let v = bounded_random_walk(&mut d, 23.9, b, 0.03, 0.1);
        assert_eq!(v, 22.0);
    }

    #[test]
    fn walk_actually_moves() {
        let mut d = UniformDraw::with_seed(5);
        let b = Bounds::new(0.0, 100.0);
        let start = 50.0;
        let v = (0..100).fold(start, |v, _| bounded_random_walk(&mut d, v, b, 1.0, 1.0));
        assert_ne!(v, start);
    }
}
