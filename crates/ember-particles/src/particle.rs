//! Particle value type

use crate::curves::lerp_f32;
use ember_core::{Camera, Canvas, Color, Rect, SheetId, Vec2};

/// How a particle is rendered
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Appearance {
    /// Filled rectangle of the particle's size and color
    Solid,
    /// Looping sprite-sheet animation, advanced during `update`
    Animated {
        sheet: SheetId,
        frames: u32,
        frame_time: f32,
        frame: u32,
        elapsed: f32,
    },
}

/// Particle state, copied by value into a pool slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining lifetime; the particle is reclaimed once this reaches zero
    pub life: f32,
    /// Lifetime at spawn, used for draw-time fades
    pub max_life: f32,
    pub size: Vec2,
    pub color: Color,
    /// Fade alpha towards zero over the particle's lifetime
    pub fade: bool,
    pub appearance: Appearance,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, life: f32) -> Self {
        Self {
            position,
            velocity,
            life,
            max_life: life,
            size: Vec2::new(4.0, 4.0),
            color: Color::WHITE,
            fade: false,
            appearance: Appearance::Solid,
        }
    }

    /// Placeholder used to fill free slots
    pub fn dead() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 0.0,
            max_life: 0.0,
            size: Vec2::ZERO,
            color: Color::WHITE,
            fade: false,
            appearance: Appearance::Solid,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_fade(mut self, fade: bool) -> Self {
        self.fade = fade;
        self
    }

    pub fn animated(mut self, sheet: SheetId, frames: u32, frame_time: f32) -> Self {
        self.appearance = Appearance::Animated {
            sheet,
            frames,
            frame_time,
            frame: 0,
            elapsed: 0.0,
        };
        self
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    /// Normalized age in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        if self.max_life <= 0.0 {
            1.0
        } else {
            (1.0 - self.life / self.max_life).clamp(0.0, 1.0)
        }
    }

    /// Integrate position, consume lifetime and step the animation
    pub(crate) fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.life -= dt;

        if let Appearance::Animated {
            frames,
            frame_time,
            frame,
            elapsed,
            ..
        } = &mut self.appearance
        {
            if *frames > 0 && *frame_time > 0.0 && dt.is_finite() {
                *elapsed += dt;
                if *elapsed >= *frame_time {
                    let steps = (*elapsed / *frame_time).floor();
                    *elapsed -= steps * *frame_time;
                    *frame = ((u64::from(*frame) + steps as u64) % u64::from(*frames)) as u32;
                }
            }
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas, camera: &Camera) {
        let screen = camera.world_to_screen(self.position);
        let dest = Rect::from_position(screen - self.size * 0.5, self.size);
        let tint = if self.fade {
            self.color
                .with_alpha(lerp_f32(self.color.a, 0.0, self.age_ratio()))
        } else {
            self.color
        };

        match &self.appearance {
            Appearance::Solid => canvas.fill_rect(dest, tint),
            Appearance::Animated { sheet, frame, .. } => canvas.sprite(*sheet, *frame, dest, tint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::SheetRegistry;

    #[test]
    fn advance_integrates_and_ages() {
        let mut p = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, -4.0), 1.0);
        p.advance(0.25);
        assert_eq!(p.position, Vec2::new(10.5, 9.0));
        assert!((p.life - 0.75).abs() < 1e-6);
        assert!((p.age_ratio() - 0.25).abs() < 1e-6);
        assert!(!p.is_expired());
    }

    #[test]
    fn animation_wraps_frames() {
        let spark = SheetRegistry::new().register("spark");
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 10.0).animated(spark, 3, 0.1);
        p.advance(0.35);
        match p.appearance {
            Appearance::Animated { frame, elapsed, .. } => {
                assert_eq!(frame, 0);
                assert!((elapsed - 0.05).abs() < 1e-4);
            }
            Appearance::Solid => panic!("expected animated appearance"),
        }
    }

    #[test]
    fn age_ratio_of_dead_particle_is_one() {
        assert_eq!(Particle::dead().age_ratio(), 1.0);
    }
}
