//! Lightweight xorshift32 PRNG — deterministic for a given seed

use ember_core::Vec2;

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a unit vector within `spread_deg / 2` of `angle_deg`.
    ///
    /// Angles are in degrees, measured clockwise from +X in screen space.
    pub fn spread_direction(&mut self, angle_deg: f32, spread_deg: f32) -> Vec2 {
        let half = spread_deg.max(0.0) * 0.5;
        let angle = (angle_deg + self.range(-half, half)).to_radians();
        Vec2::new(angle.cos(), angle.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn zero_seed_still_advances() {
        let mut rng = ParticleRng::new(0);
        assert_ne!(rng.next_f32(), rng.next_f32());
    }

    #[test]
    fn zero_spread_keeps_direction() {
        let mut rng = ParticleRng::new(99);
        let dir = rng.spread_direction(-90.0, 0.0);
        assert!(dir.x.abs() < 1e-5);
        assert!((dir.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn spread_direction_unit_length() {
        let mut rng = ParticleRng::new(123);
        for _ in 0..100 {
            let d = rng.spread_direction(0.0, 360.0);
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }
}
