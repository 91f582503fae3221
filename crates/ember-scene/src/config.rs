//! Scene configuration
//!
//! Every section is optional in the TOML file; missing values fall back to
//! the defaults of the trail/parallax test scene. After parsing, the
//! environment variables `EMBER_PARTICLE_CAPACITY` and `EMBER_PARTICLE_BURST`
//! override the particle table.

use ember_core::{Color, EmberError, Result, Vec2};
use ember_particles::SpawnConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Window-sized viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 700.0,
        }
    }
}

/// Scrollable level bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 3000.0,
            height: 700.0,
        }
    }
}

/// Trail segments left behind by the player while moving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Seconds between segments
    pub interval: f32,
    /// Alpha lost per second
    pub decay: f32,
    pub color: Color,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            interval: 1.0 / 30.0,
            decay: 2.5,
            color: Color::new(0.4, 0.7, 1.0, 0.8),
        }
    }
}

/// The controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: [f32; 2],
    pub size: [f32; 2],
    pub move_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub color: Color,
    pub trail: TrailConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: [100.0, 300.0],
            size: [24.0, 40.0],
            move_speed: 220.0,
            jump_speed: 520.0,
            gravity: 1200.0,
            max_fall_speed: 900.0,
            color: Color::from_hex(0xE04040),
            trail: TrailConfig::default(),
        }
    }
}

/// Row of ground tiles along the bottom of the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: u32,
    pub spacing: f32,
    pub size: [f32; 2],
    /// Distance from the level bottom to the tiles' top edge
    pub floor_offset: f32,
    pub color: Color,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 30,
            spacing: 48.0,
            size: [48.0, 20.0],
            floor_offset: 20.0,
            color: Color::from_hex(0x3CB043),
        }
    }
}

/// Parallax background stack, back to front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Layer `i` uses texture `{texture_prefix}{i}`
    pub texture_prefix: String,
    /// Scroll factor per layer; the number of entries is the number of layers
    pub scroll: Vec<f32>,
    /// Layer size relative to the screen
    pub scale: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            texture_prefix: "background_4/layer_".to_string(),
            scroll: vec![
                0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60,
            ],
            scale: 1.0,
        }
    }
}

/// Debug line grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    pub origin: [f32; 2],
    pub cell: [f32; 2],
    pub columns: u32,
    pub rows: u32,
    pub color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origin: [0.0, 0.0],
            cell: [32.0, 32.0],
            columns: 10,
            rows: 10,
            color: Color::WHITE,
        }
    }
}

/// Screen-space UI and debug overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub border_thickness: f32,
    pub fade_from: Color,
    pub fade_to: Color,
    /// Fade phase advance per second
    pub fade_rate: f32,
    pub grid: GridConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            border_thickness: 8.0,
            fade_from: Color::YELLOW,
            fade_to: Color::BLUE,
            fade_rate: 0.6,
            grid: GridConfig::default(),
        }
    }
}

/// Complete scene description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub screen: ScreenConfig,
    pub level: LevelConfig,
    pub particles: SpawnConfig,
    pub player: PlayerConfig,
    pub enemies: EnemyConfig,
    pub parallax: ParallaxConfig,
    pub overlay: OverlayConfig,
}

impl SceneConfig {
    /// Load and validate a scene file, applying environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content).map_err(|e| {
            EmberError::ConfigError(format!("Failed to parse scene {}: {}", path.display(), e))
        })?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen.width, self.screen.height)
    }

    pub fn level_size(&self) -> Vec2 {
        Vec2::new(self.level.width, self.level.height)
    }

    /// Reject configurations the simulation cannot run with.
    ///
    /// Every float goes through a range check, so NaN is rejected everywhere.
    pub fn validate(&self) -> Result<()> {
        const MAX: f64 = f32::MAX as f64;
        let positive = f32::MIN_POSITIVE as f64;

        check_range("screen.width", self.screen.width as f64, 1.0, MAX)?;
        check_range("screen.height", self.screen.height as f64, 1.0, MAX)?;
        check_range("level.width", self.level.width as f64, self.screen.width as f64, MAX)?;
        check_range("level.height", self.level.height as f64, self.screen.height as f64, MAX)?;

        let p = &self.particles;
        check_range("particles.capacity", p.capacity as f64, 1.0, 1_000_000.0)?;
        check_range("particles.lifetime_min", p.lifetime_min as f64, positive, MAX)?;
        check_range("particles.lifetime_max", p.lifetime_max as f64, p.lifetime_min as f64, MAX)?;
        check_range("particles.speed_min", p.speed_min as f64, 0.0, MAX)?;
        check_range("particles.speed_max", p.speed_max as f64, p.speed_min as f64, MAX)?;
        check_range("particles.direction", p.direction as f64, -MAX, MAX)?;
        check_range("particles.spread", p.spread as f64, 0.0, 360.0)?;
        check_range("particles.size[0]", p.size[0] as f64, positive, MAX)?;
        check_range("particles.size[1]", p.size[1] as f64, positive, MAX)?;
        if let Some(sprite) = &p.sprite {
            check_range("particles.sprite.frames", sprite.frames as f64, 1.0, MAX)?;
            check_range("particles.sprite.frame_time", sprite.frame_time as f64, positive, MAX)?;
        }

        check_range("player.trail.interval", self.player.trail.interval as f64, positive, MAX)?;
        check_range("parallax.scale", self.parallax.scale as f64, positive, MAX)?;
        for (i, scroll) in self.parallax.scroll.iter().enumerate() {
            check_range(&format!("parallax.scroll[{i}]"), *scroll as f64, -MAX, MAX)?;
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("EMBER_PARTICLE_CAPACITY") {
            self.particles.capacity = parse_env("EMBER_PARTICLE_CAPACITY", &value)?;
        }
        if let Ok(value) = std::env::var("EMBER_PARTICLE_BURST") {
            self.particles.burst = parse_env("EMBER_PARTICLE_BURST", &value)?;
        }
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value < min || value > max || value.is_nan() {
        return Err(EmberError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| EmberError::ConfigError(format!("{name}: cannot parse {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_test_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.screen_size(), Vec2::new(700.0, 700.0));
        assert_eq!(config.level_size(), Vec2::new(3000.0, 700.0));
        assert_eq!(config.particles.capacity, 2048);
        assert_eq!(config.particles.burst, 128);
        assert_eq!(config.enemies.count, 30);
        assert_eq!(config.parallax.scroll.len(), 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
[particles]
capacity = 64

[enemies]
count = 3
"#,
        )
        .unwrap();
        assert_eq!(config.particles.capacity, 64);
        assert_eq!(config.particles.burst, 128);
        assert_eq!(config.enemies.count, 3);
        assert_eq!(config.enemies.spacing, 48.0);
        assert_eq!(config.screen, ScreenConfig::default());
    }

    #[test]
    fn toml_round_trip() {
        let config = SceneConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut config = SceneConfig::default();
        config.particles.capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(EmberError::ValueOutOfRange { .. })
        ));
    }

    fn rejected_field(config: &SceneConfig) -> String {
        match config.validate() {
            Err(EmberError::ValueOutOfRange { field, .. }) => field,
            other => panic!("expected ValueOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn level_smaller_than_screen_rejected() {
        let mut config = SceneConfig::default();
        config.level.width = 300.0;
        assert_eq!(rejected_field(&config), "level.width");
    }

    #[test]
    fn nan_sizes_rejected() {
        let mut config = SceneConfig::default();
        config.level.height = f32::NAN;
        assert_eq!(rejected_field(&config), "level.height");

        let mut config = SceneConfig::default();
        config.particles.size = [8.0, f32::NAN];
        assert_eq!(rejected_field(&config), "particles.size[1]");
    }

    #[test]
    fn particle_ranges_must_be_ordered_and_finite() {
        let mut config = SceneConfig::default();
        config.particles.speed_min = -5.0;
        assert_eq!(rejected_field(&config), "particles.speed_min");

        let mut config = SceneConfig::default();
        config.particles.speed_max = 10.0;
        assert_eq!(rejected_field(&config), "particles.speed_max");

        let mut config = SceneConfig::default();
        config.particles.speed_max = f32::NAN;
        assert_eq!(rejected_field(&config), "particles.speed_max");

        let mut config = SceneConfig::default();
        config.particles.lifetime_min = 0.0;
        assert_eq!(rejected_field(&config), "particles.lifetime_min");

        let mut config = SceneConfig::default();
        config.particles.size = [-1.0, 8.0];
        assert_eq!(rejected_field(&config), "particles.size[0]");

        let mut config = SceneConfig::default();
        config.particles.direction = f32::INFINITY;
        assert_eq!(rejected_field(&config), "particles.direction");
    }

    #[test]
    fn zero_frame_sprite_rejected() {
        let mut config = SceneConfig::default();
        if let Some(sprite) = &mut config.particles.sprite {
            sprite.frames = 0;
        }
        assert_eq!(rejected_field(&config), "particles.sprite.frames");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = SceneConfig::from_toml_str("[particles\ncapacity = 1").unwrap_err();
        assert!(matches!(err, EmberError::TomlParseError(_)));
    }

    #[test]
    fn bundled_scene_matches_defaults() {
        let text = include_str!("../../../scenes/trail_parallax.toml");
        let config = SceneConfig::from_toml_str(text).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.parallax, ParallaxConfig::default());
        assert_eq!(config.particles.capacity, 2048);
        assert_eq!(config.overlay.grid, GridConfig::default());
    }

    #[test]
    fn env_values_parse() {
        assert_eq!(parse_env::<usize>("X", " 512 ").unwrap(), 512);
        assert!(parse_env::<u32>("X", "lots").is_err());
    }
}
