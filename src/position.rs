//! Random spawn placement.
//!
//! Positions are drawn uniformly inside the viewport minus a fixed margin on
//! every edge, so an insect never renders fully off-screen. Each draw is
//! independent; overlapping insects are allowed.

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng};

use crate::error::GameError;
use crate::state::{Point, Viewport};

/// Source of uniform floats in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Spawn randomness. Seeded from the OS (browser crypto on wasm) in play,
/// from a fixed seed in tests.
#[derive(Clone, Debug)]
pub struct SpawnRng {
    inner: SmallRng,
}

impl SpawnRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { inner: SmallRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Result<Self, GameError> {
        Ok(Self { inner: SmallRng::from_rng(OsRng)? })
    }
}

impl RandomSource for SpawnRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen_range(0.0..1.0)
    }
}

/// `x = r * (width - 2m) + m`, same for `y`. A viewport narrower than both
/// margins collapses the span to zero and pins the axis at `m`.
pub fn random_location<R: RandomSource + ?Sized>(viewport: Viewport, margin: f64, rng: &mut R) -> Point {
    let span_x = (viewport.width - 2.0 * margin).max(0.0);
    let span_y = (viewport.height - 2.0 * margin).max(0.0);
    // min/max guard float rounding at the far edge
    let x = (rng.next_f64() * span_x + margin).min(viewport.width - margin).max(margin);
    let y = (rng.next_f64() * span_y + margin).min(viewport.height - margin).max(margin);
    Point { x, y }
}

/// Cosmetic rotation in `[0, 360)` degrees.
pub fn random_rotation<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    rng.next_f64() * 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);
    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn extremes_stay_inside_margin() {
        let vp = Viewport { width: 800.0, height: 600.0 };
        let lo = random_location(vp, 100.0, &mut Fixed(0.0));
        assert_eq!(lo, Point { x: 100.0, y: 100.0 });
        let hi = random_location(vp, 100.0, &mut Fixed(0.999_999));
        assert!(hi.x <= 700.0 && hi.y <= 500.0);
    }

    #[test]
    fn tiny_viewport_pins_to_margin() {
        let vp = Viewport { width: 150.0, height: 50.0 };
        let p = random_location(vp, 100.0, &mut Fixed(0.7));
        assert_eq!(p, Point { x: 100.0, y: 100.0 });
    }

    #[test]
    fn spawn_rng_is_deterministic_and_in_range() {
        let mut a = SpawnRng::from_seed(42);
        let mut b = SpawnRng::from_seed(42);
        for _ in 0..1000 {
            let v = a.next_f64();
            assert_eq!(v, b.next_f64());
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn rotation_below_full_turn() {
        let mut rng = SpawnRng::from_seed(7);
        for _ in 0..200 {
            let r = random_rotation(&mut rng);
            assert!((0.0..360.0).contains(&r));
        }
    }
}
