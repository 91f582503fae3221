//! The frame driver

use crate::config::SceneConfig;
use crate::entities::{Enemy, ParallaxLayer, Player, Trail};
use crate::overlay::{FadeColor, LineGrid};
use ember_core::{Camera, Canvas, Rect, Result, SheetRegistry, Vec2};
use ember_lifecycle::LifecycleList;
use ember_particles::{ParticlePool, ParticleSpawner, SpawnReport};
use ember_runtime::InputState;

/// What happened during one [`Scene::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub spawn: SpawnReport,
    pub particles_reclaimed: usize,
    pub particles_alive: usize,
    pub backgrounds_reaped: usize,
    pub trails_reaped: usize,
    pub enemies_reaped: usize,
    /// Enemies the player touched after the enemy pass
    pub contacts: u32,
    pub trail_appended: bool,
}

/// Owns every subsystem of the running scene and sequences them per frame.
///
/// Subsystems are exposed read-only; only [`tick`](Self::tick) changes them.
pub struct Scene {
    player: Player,
    camera: Camera,
    particles: ParticlePool,
    spawner: ParticleSpawner,
    sheets: SheetRegistry,
    backgrounds: LifecycleList<ParallaxLayer>,
    trails: LifecycleList<Trail>,
    enemies: LifecycleList<Enemy>,
    fade: FadeColor,
    grid: Option<LineGrid>,
    border_thickness: f32,
    screen: Vec2,
    level: Vec2,
    frame: u64,
}

impl Scene {
    /// Build the scene a validated configuration describes
    pub fn new(config: &SceneConfig) -> Result<Self> {
        config.validate()?;
        let screen = config.screen_size();
        let level = config.level_size();

        let mut backgrounds = LifecycleList::with_capacity(config.parallax.scroll.len());
        let layer_size = screen * config.parallax.scale;
        for (i, scroll) in config.parallax.scroll.iter().enumerate() {
            let texture = format!("{}{}", config.parallax.texture_prefix, i);
            backgrounds.append(ParallaxLayer::new(texture, *scroll, layer_size));
        }

        let e = &config.enemies;
        let mut enemies = LifecycleList::with_capacity(e.count as usize);
        let enemy_size = Vec2::from_array(e.size);
        for i in 0..e.count {
            let at = Vec2::new(i as f32 * e.spacing, level.y - e.floor_offset);
            enemies.append(Enemy::new(Rect::from_position(at, enemy_size), e.color));
        }

        let player = Player::new(config.player.clone());
        let mut camera = Camera::new(screen, level);
        camera.follow(&player.body);

        let overlay = &config.overlay;
        let grid = overlay
            .grid
            .enabled
            .then(|| LineGrid::from_config(&overlay.grid));

        let mut sheets = SheetRegistry::new();
        let spawner = ParticleSpawner::new(config.particles.clone(), &mut sheets);

        tracing::info!(
            particles = config.particles.capacity,
            layers = backgrounds.len(),
            enemies = enemies.len(),
            "scene created"
        );

        Ok(Self {
            player,
            camera,
            particles: ParticlePool::new(config.particles.capacity),
            spawner,
            sheets,
            backgrounds,
            trails: LifecycleList::new(),
            enemies,
            fade: FadeColor::new(overlay.fade_from, overlay.fade_to, overlay.fade_rate),
            grid,
            border_thickness: overlay.border_thickness,
            screen,
            level,
            frame: 0,
        })
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen
    }

    pub fn level_size(&self) -> Vec2 {
        self.level
    }

    /// Number of completed ticks
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    /// Sprite sheets referenced by particles, by [`SheetId`](ember_core::SheetId)
    pub fn sheets(&self) -> &SheetRegistry {
        &self.sheets
    }

    pub fn backgrounds(&self) -> &LifecycleList<ParallaxLayer> {
        &self.backgrounds
    }

    pub fn trails(&self) -> &LifecycleList<Trail> {
        &self.trails
    }

    pub fn enemies(&self) -> &LifecycleList<Enemy> {
        &self.enemies
    }

    pub fn fade(&self) -> &FadeColor {
        &self.fade
    }

    pub fn grid(&self) -> Option<&LineGrid> {
        self.grid.as_ref()
    }

    /// Advance the whole scene by `dt` seconds
    pub fn tick(&mut self, input: &InputState, dt: f32) -> FrameStats {
        let mut stats = FrameStats::default();

        if input.is_action_pressed("spawn") {
            let at = self.camera.screen_to_world(input.pointer());
            stats.spawn = self.spawner.spawn_burst(&mut self.particles, at);
        }

        self.camera.follow(&self.player.body);

        stats.particles_reclaimed = self.particles.update(dt);
        stats.particles_alive = self.particles.alive_count();

        stats.backgrounds_reaped = self.backgrounds.update_and_reap(&self.camera, dt);
        stats.trails_reaped = self.trails.update_and_reap(&(), dt);
        stats.enemies_reaped = self.enemies.update_and_reap(&(), dt);
        stats.contacts = self.resolve_contacts();

        stats.trail_appended = self
            .player
            .update(input, dt, self.level, &mut self.trails);

        self.fade.update(dt);
        self.frame += 1;

        tracing::trace!(frame = self.frame, ?stats, "tick");
        stats
    }

    /// Collision feedback from the enemy list onto the player.
    ///
    /// A vertical contact zeroes the vertical velocity, a horizontal one the
    /// horizontal velocity; the body is then pushed out along that axis.
    /// An enemy touching the player's feet without overlap counts as support
    /// but not as a contact.
    fn resolve_contacts(&mut self) -> u32 {
        let mut contacts = 0;
        for enemy in self.enemies.iter() {
            let Some(side) = self.player.body.collision_side(&enemy.body) else {
                continue;
            };
            if side.is_vertical() {
                self.player.velocity.y = 0.0;
            } else {
                self.player.velocity.x = 0.0;
            }
            self.player.separate_from(&enemy.body, side);
            contacts += 1;
        }

        let body = self.player.body;
        let feet = Rect::new(body.x, body.bottom(), body.w, 1.0);
        if self.enemies.iter().any(|enemy| feet.intersects(&enemy.body)) {
            self.player.mark_supported();
        }
        contacts
    }

    /// Emit the frame back to front
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.backgrounds.draw_all(canvas, &self.camera);
        self.particles.draw(canvas, &self.camera);
        self.fade.draw_border(canvas, self.screen, self.border_thickness);
        self.trails.draw_all(canvas, &self.camera);
        self.enemies.draw_all(canvas, &self.camera);
        self.player.draw(canvas, &self.camera);
        if let Some(grid) = &self.grid {
            grid.draw(canvas);
        }
    }
}
