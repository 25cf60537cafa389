//! Normalized sub-range of the timeline.
//!
//! Values are nominally in `[0, 1]` with `min <= max`, but nothing here enforces
//! it: dragging and malformed settings files may produce inverted or
//! out-of-bounds ranges, and those are stored as-is. Clamping happens only when
//! a range is turned into screen geometry.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A `[min, max]` pair in timeline-normalized units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRange {
    pub min: f64,
    pub max: f64,
}

impl NormalizedRange {
    /// Lower bound of the default `min` draw.
    pub const DEFAULT_MIN_LOW: f64 = 0.2;
    /// Upper bound of the default `min` draw.
    pub const DEFAULT_MIN_HIGH: f64 = 0.6;
    /// Range of the width draw, as a fraction of the space right of `min`.
    pub const DEFAULT_WIDTH_DRAW: (f64, f64) = (0.4, 0.8);

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The whole timeline, `[0, 1]`.
    pub fn full() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Random default placement for a freshly created loop.
    ///
    /// `min` is uniform in `[0.2, 0.6]`; a width draw `d` in `[0.4, 0.8]` sets
    /// `max = min + d * (1 - min)`, so the result always lies inside `[0, 1]`.
    pub fn random_default<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let min = rng.gen_range(Self::DEFAULT_MIN_LOW..=Self::DEFAULT_MIN_HIGH);
        let (lo, hi) = Self::DEFAULT_WIDTH_DRAW;
        let draw = rng.gen_range(lo..=hi);
        Self {
            min,
            max: min + draw * (1.0 - min),
        }
    }

    pub fn set_min(&mut self, min: f64) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    /// Signed width; negative when the range is inverted.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Range with both ends clamped into `[lo, hi]`. Ordering is not fixed up.
    pub fn clamped(&self, lo: f64, hi: f64) -> Self {
        Self {
            min: self.min.clamp(lo, hi),
            max: self.max.clamp(lo, hi),
        }
    }
}

impl Default for NormalizedRange {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn full_range_is_zero_to_one() {
        let r = NormalizedRange::full();
        assert_eq!(r.min, 0.0);
        assert_eq!(r.max, 1.0);
        assert_eq!(NormalizedRange::default(), r);
    }

    #[test]
    fn setters_do_not_reorder() {
        let mut r = NormalizedRange::new(0.2, 0.4);
        r.set_min(0.9);
        assert_eq!(r.min, 0.9);
        assert_eq!(r.max, 0.4);
        assert!(r.is_inverted());
        assert!(r.span() < 0.0);
    }

    #[test]
    fn setters_accept_out_of_bounds() {
        let mut r = NormalizedRange::full();
        r.set_min(-0.5);
        r.set_max(1.7);
        assert_eq!(r, NormalizedRange::new(-0.5, 1.7));
    }

    #[test]
    fn clamped_keeps_storage_untouched() {
        let r = NormalizedRange::new(-0.5, 1.7);
        let c = r.clamped(0.0, 1.0);
        assert_eq!(c, NormalizedRange::new(0.0, 1.0));
        assert_eq!(r.min, -0.5);
    }

    #[test]
    fn random_default_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let r = NormalizedRange::random_default(&mut rng);
            assert!((0.2..=0.6).contains(&r.min), "min {}", r.min);
            assert!(r.max > r.min);
            assert!(r.max <= 1.0);
        }
    }

    #[test]
    fn random_default_is_deterministic_per_seed() {
        let a = NormalizedRange::random_default(&mut StdRng::seed_from_u64(42));
        let b = NormalizedRange::random_default(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
