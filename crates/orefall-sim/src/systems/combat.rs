//! Shared combat helpers: the crit roll and hit bookkeeping.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use orefall_core::components::{Burning, Health};
use orefall_core::enums::DamageCategory;
use orefall_core::events::{DamageEvent, FrameEvents};
use orefall_core::records::{CritConfig, DotParams};

/// Roll a crit against `crit.chance`. Returns the damage to apply and
/// whether it crit.
pub fn roll_crit(rng: &mut ChaCha8Rng, crit: &CritConfig, base: f32) -> (f32, bool) {
    let roll: f32 = rng.gen();
    if roll < crit.chance {
        (base * crit.multiplier, true)
    } else {
        (base, false)
    }
}

/// Apply one crit-rolled hit and emit its damage notification.
pub fn strike(
    health: &mut Health,
    position: Vec2,
    base: f32,
    category: DamageCategory,
    crit: &CritConfig,
    rng: &mut ChaCha8Rng,
    events: &mut FrameEvents,
) -> f32 {
    let (amount, critical) = roll_crit(rng, crit, base);
    health.apply_damage(amount);
    let category = if critical {
        DamageCategory::Critical
    } else {
        category
    };
    events.damage.push(DamageEvent::new(position, amount, category));
    amount
}

/// A fresh DoT from a skill's parameters. Re-applying replaces the old one,
/// which refreshes its duration.
pub fn burning_from(dot: &DotParams) -> Burning {
    Burning {
        damage_per_tick: dot.damage_per_tick,
        tick_interval: dot.tick_interval,
        remaining_duration: dot.duration,
        tick_accumulator: 0.0,
    }
}

/// Distance from `p` to the segment `a..b`, projecting onto the segment
/// rather than the infinite line.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!((distance_to_segment(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-6);
        // Beyond the end the nearest point is `b`, not the line.
        assert!((distance_to_segment(Vec2::new(14.0, 3.0), a, b) - 5.0).abs() < 1e-6);
        assert!((distance_to_segment(Vec2::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let d = distance_to_segment(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::ZERO);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn crit_chance_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let never = CritConfig {
            chance: 0.0,
            multiplier: 3.0,
        };
        let always = CritConfig {
            chance: 1.0,
            multiplier: 3.0,
        };
        for _ in 0..100 {
            assert_eq!(roll_crit(&mut rng, &never, 10.0), (10.0, false));
            assert_eq!(roll_crit(&mut rng, &always, 10.0), (30.0, true));
        }
    }
}
