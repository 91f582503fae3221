//! The controlled entity

use super::trail::Trail;
use crate::config::PlayerConfig;
use ember_core::{Camera, Canvas, CollisionSide, Rect, Vec2};
use ember_lifecycle::LifecycleList;
use ember_runtime::InputState;

/// Side-scrolling player body driven by input and gravity.
///
/// `velocity` is what the next [`update`](Self::update) integrates; the frame
/// driver may zero components of it in between (collision feedback).
pub struct Player {
    pub body: Rect,
    pub velocity: Vec2,
    /// Standing on the floor or on top of another body as of the last update
    pub grounded: bool,
    /// Set by a top contact during the current frame
    supported: bool,
    trail_timer: f32,
    config: PlayerConfig,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        let body = Rect::from_position(Vec2::from_array(config.start), Vec2::from_array(config.size));
        Self {
            body,
            velocity: Vec2::ZERO,
            grounded: false,
            supported: false,
            trail_timer: 0.0,
            config,
        }
    }

    /// Something is directly beneath the body this frame
    pub fn mark_supported(&mut self) {
        self.supported = true;
    }

    /// Move the body out of `other` along the contact axis.
    ///
    /// Velocity is left alone; zeroing it is the caller's decision.
    pub fn separate_from(&mut self, other: &Rect, side: CollisionSide) {
        match side {
            CollisionSide::Left => self.body.x = other.left() - self.body.w,
            CollisionSide::Right => self.body.x = other.right(),
            CollisionSide::Top => {
                self.body.y = other.top() - self.body.h;
                self.supported = true;
            }
            CollisionSide::Bottom => self.body.y = other.bottom(),
        }
    }

    /// Integrate the current velocity, keep the body inside the level, then
    /// derive next frame's velocity from input and gravity (skipped while
    /// standing). Appends a trail
    /// segment every `trail.interval` seconds while the body is moving.
    ///
    /// Returns true if a trail segment was appended.
    pub fn update(
        &mut self,
        input: &InputState,
        dt: f32,
        level: Vec2,
        trails: &mut LifecycleList<Trail>,
    ) -> bool {
        let before = self.body.position();
        self.body = self.body.translated(self.velocity * dt);

        let mut on_ground = self.supported;
        let max_x = (level.x - self.body.w).max(0.0);
        if self.body.x < 0.0 || self.body.x > max_x {
            self.body.x = self.body.x.clamp(0.0, max_x);
            self.velocity.x = 0.0;
        }
        let max_y = (level.y - self.body.h).max(0.0);
        if self.body.y >= max_y {
            self.body.y = max_y;
            self.velocity.y = self.velocity.y.min(0.0);
            on_ground = true;
        } else if self.body.y < 0.0 {
            self.body.y = 0.0;
            self.velocity.y = self.velocity.y.max(0.0);
        }

        self.velocity.x = input.axis("move_left", "move_right") * self.config.move_speed;
        if on_ground && input.is_action_pressed("jump") {
            self.velocity.y = -self.config.jump_speed;
            on_ground = false;
        } else if on_ground {
            self.velocity.y = self.velocity.y.min(0.0);
        } else {
            self.velocity.y =
                (self.velocity.y + self.config.gravity * dt).min(self.config.max_fall_speed);
        }
        self.grounded = on_ground;
        self.supported = false;

        let moved = self.body.position() != before;
        if !moved {
            return false;
        }
        self.trail_timer += dt;
        if self.trail_timer < self.config.trail.interval {
            return false;
        }
        self.trail_timer = (self.trail_timer - self.config.trail.interval)
            .min(self.config.trail.interval);
        let trail = &self.config.trail;
        trails.append(Trail::new(self.body, trail.color, trail.decay));
        true
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, camera: &Camera) {
        canvas.fill_rect(camera.rect_to_screen(&self.body), self.config.color);
    }
}
