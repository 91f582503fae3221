//! Spawn configuration (parsed from TOML) and burst emission

use crate::particle::Particle;
use crate::pool::{InsertError, ParticlePool};
use crate::rand::ParticleRng;
use crate::validate::ParticleValidator;
use ember_core::{Color, SheetId, SheetRegistry, Vec2};
use serde::{Deserialize, Serialize};

/// Sprite-sheet animation applied to spawned particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    pub sheet: String,
    pub frames: u32,
    pub frame_time: f32,
}

/// Configuration for the `[particles]` table of a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Pool size, fixed for the pool's lifetime
    pub capacity: usize,
    /// Insert requests per frame while the spawn gesture is held
    pub burst: u32,
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Emission direction in degrees, clockwise from +X (screen space)
    pub direction: f32,
    /// Full cone angle in degrees around `direction`
    pub spread: f32,
    pub size: [f32; 2],
    pub color: Color,
    pub fade: bool,
    pub sprite: Option<SpriteConfig>,
    pub seed: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            capacity: 2048,
            burst: 128,
            lifetime_min: 0.4,
            lifetime_max: 1.2,
            speed_min: 30.0,
            speed_max: 180.0,
            direction: -90.0,
            spread: 360.0,
            size: [8.0, 8.0],
            color: Color::WHITE,
            fade: true,
            sprite: Some(SpriteConfig {
                sheet: "particles/spark".to_string(),
                frames: 4,
                frame_time: 0.05,
            }),
            seed: 0xDEAD_BEEF,
        }
    }
}

/// Outcome of one burst of insert requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub requested: u32,
    pub inserted: u32,
    pub invalid: u32,
    /// The pool reported `Full` and the burst was cut short
    pub stopped_full: bool,
}

/// Builds particles from a [`SpawnConfig`] and feeds them into a pool
pub struct ParticleSpawner {
    config: SpawnConfig,
    /// `config.sprite` resolved once, so spawning never touches the name
    sheet: Option<SheetId>,
    rng: ParticleRng,
}

impl ParticleSpawner {
    /// Registers the configured sprite sheet in `sheets`
    pub fn new(config: SpawnConfig, sheets: &mut SheetRegistry) -> Self {
        let rng = ParticleRng::new(config.seed);
        let sheet = config
            .sprite
            .as_ref()
            .map(|sprite| sheets.register(&sprite.sheet));
        Self { config, sheet, rng }
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Build one particle at `at` with randomized speed, direction and lifetime
    pub fn make_particle(&mut self, at: Vec2) -> Particle {
        let c = &self.config;
        let life = self.rng.range(c.lifetime_min, c.lifetime_max.max(c.lifetime_min));
        let speed = self.rng.range(c.speed_min, c.speed_max.max(c.speed_min));
        let velocity = self.rng.spread_direction(c.direction, c.spread) * speed;

        let particle = Particle::new(at, velocity, life)
            .with_size(Vec2::from_array(c.size))
            .with_color(c.color)
            .with_fade(c.fade);
        match (&c.sprite, self.sheet) {
            (Some(sprite), Some(sheet)) => particle.animated(sheet, sprite.frames, sprite.frame_time),
            _ => particle,
        }
    }

    /// Request `burst` inserts at `at`.
    ///
    /// Stops silently at the first `Full`; invalid particles are counted and
    /// skipped.
    pub fn spawn_burst<V: ParticleValidator>(
        &mut self,
        pool: &mut ParticlePool<V>,
        at: Vec2,
    ) -> SpawnReport {
        let mut report = SpawnReport {
            requested: self.config.burst,
            ..SpawnReport::default()
        };

        for _ in 0..self.config.burst {
            let particle = self.make_particle(at);
            match pool.insert(particle) {
                Ok(()) => report.inserted += 1,
                Err(InsertError::InvalidParticle) => report.invalid += 1,
                Err(InsertError::Full) => {
                    report.stopped_full = true;
                    break;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Appearance;

    fn spawner(config: SpawnConfig) -> ParticleSpawner {
        ParticleSpawner::new(config, &mut SheetRegistry::new())
    }

    #[test]
    fn default_config_is_sane() {
        let config = SpawnConfig::default();
        assert!(config.capacity > 0);
        assert!(config.burst > 0);
        assert!(config.lifetime_max >= config.lifetime_min);
        assert!(config.speed_max >= config.speed_min);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
capacity = 512
burst = 16
spread = 45.0
color = { r = 1.0, g = 0.5, b = 0.0, a = 1.0 }
sprite = { sheet = "fx/smoke", frames = 8, frame_time = 0.1 }
"#;
        let config: SpawnConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.capacity, 512);
        assert_eq!(config.burst, 16);
        assert!((config.spread - 45.0).abs() < 0.01);
        assert!((config.color.g - 0.5).abs() < 0.01);
        assert_eq!(config.sprite.unwrap().frames, 8);
        // Unspecified fields keep their defaults
        assert_eq!(config.lifetime_min, SpawnConfig::default().lifetime_min);
    }

    #[test]
    fn spawned_particles_pass_default_validation() {
        let mut spawner = spawner(SpawnConfig::default());
        let mut pool = ParticlePool::new(64);
        let report = spawner.spawn_burst(&mut pool, Vec2::new(100.0, 100.0));
        assert_eq!(report.inserted, 64);
        assert_eq!(report.invalid, 0);
        assert!(report.stopped_full);
    }

    #[test]
    fn burst_stops_at_capacity() {
        let config = SpawnConfig {
            burst: 10,
            ..SpawnConfig::default()
        };
        let mut spawner = spawner(config);
        let mut pool = ParticlePool::new(25);

        assert_eq!(spawner.spawn_burst(&mut pool, Vec2::ZERO).inserted, 10);
        assert_eq!(spawner.spawn_burst(&mut pool, Vec2::ZERO).inserted, 10);
        let third = spawner.spawn_burst(&mut pool, Vec2::ZERO);
        assert_eq!(third.inserted, 5);
        assert!(third.stopped_full);
        assert_eq!(pool.alive_count(), 25);

        let fourth = spawner.spawn_burst(&mut pool, Vec2::ZERO);
        assert_eq!(fourth.inserted, 0);
        assert!(fourth.stopped_full);
    }

    #[test]
    fn invalid_particles_do_not_stop_the_burst() {
        let config = SpawnConfig {
            burst: 8,
            sprite: None,
            ..SpawnConfig::default()
        };
        let mut spawner = spawner(config);
        let mut pool = ParticlePool::with_validator(16, |p: &Particle| p.velocity.x >= 0.0);
        let report = spawner.spawn_burst(&mut pool, Vec2::ZERO);
        assert_eq!(report.inserted + report.invalid, 8);
        assert!(!report.stopped_full);
    }

    #[test]
    fn sprite_sheet_is_registered_once() {
        let mut sheets = SheetRegistry::new();
        let mut a = ParticleSpawner::new(SpawnConfig::default(), &mut sheets);
        let b = ParticleSpawner::new(SpawnConfig::default(), &mut sheets);
        assert_eq!(sheets.len(), 1);
        assert_eq!(a.sheet, b.sheet);

        match a.make_particle(Vec2::ZERO).appearance {
            Appearance::Animated { sheet, frames, .. } => {
                assert_eq!(sheets.name(sheet), Some("particles/spark"));
                assert_eq!(frames, 4);
            }
            Appearance::Solid => panic!("expected animated particle"),
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let mut a = spawner(SpawnConfig::default());
        let mut b = spawner(SpawnConfig::default());
        assert_eq!(a.make_particle(Vec2::ZERO), b.make_particle(Vec2::ZERO));
    }
}
