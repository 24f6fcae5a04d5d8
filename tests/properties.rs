// Property tests for spawn placement and hit/miss bookkeeping.

#![cfg(not(target_arch = "wasm32"))]

mod common;

use common::*;
use insect_catch::position::random_location;
use insect_catch::{SpawnRng, Viewport};
use proptest::prelude::*;

proptest! {
    #[test]
    fn locations_stay_inside_margin(
        width in 200.0f64..4000.0,
        height in 200.0f64..4000.0,
        seed in any::<u64>(),
    ) {
        let mut rng = SpawnRng::from_seed(seed);
        let vp = Viewport { width, height };
        for _ in 0..16 {
            let p = random_location(vp, 100.0, &mut rng);
            prop_assert!(p.x >= 100.0 && p.x <= width - 100.0);
            prop_assert!(p.y >= 100.0 && p.y <= height - 100.0);
        }
    }

    #[test]
    fn score_and_attempts_track_clicks(
        clicks in proptest::collection::vec(any::<bool>(), 0..40),
        seed in any::<u64>(),
    ) {
        let mut s = playing(seed);
        let mut now = 1_000;
        let mut hits = 0u32;
        let mut misses = 0u32;
        for is_hit in clicks {
            s.advance(now);
            if is_hit {
                let id = first_uncaught(&s).unwrap();
                hit(&mut s, id, now);
                hits += 1;
            } else if misses < 4 {
                miss(&mut s, now);
                misses += 1;
            }
            now += 1_000;
        }
        prop_assert_eq!(s.state().score(), hits);
        prop_assert_eq!(s.state().attempts_remaining(), 5 - misses);
        prop_assert!(!s.state().is_over());
        prop_assert_eq!(s.surface().view.milestone_visible, hits >= 20);
        let dark = s.surface().view.indicators.iter().take_while(|a| !**a).count();
        prop_assert_eq!(dark as u32, misses);
    }
}
