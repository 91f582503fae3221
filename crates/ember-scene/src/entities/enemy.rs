//! Simple enemies: axis-aligned bodies with hit points

use ember_core::{Camera, Canvas, Color, Rect, Vec2};
use ember_lifecycle::Lifecycle;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Rect,
    pub velocity: Vec2,
    pub color: Color,
    pub health: i32,
}

impl Enemy {
    pub fn new(body: Rect, color: Color) -> Self {
        Self {
            body,
            velocity: Vec2::ZERO,
            color,
            health: 1,
        }
    }

    pub fn damage(&mut self, amount: i32) {
        self.health -= amount;
    }
}

impl Lifecycle for Enemy {
    type Env = ();

    fn update(&mut self, _env: &(), dt: f32) {
        self.body = self.body.translated(self.velocity * dt);
    }

    fn draw(&self, canvas: &mut dyn Canvas, camera: &Camera) {
        canvas.fill_rect(camera.rect_to_screen(&self.body), self.color);
    }

    fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_with_velocity() {
        let mut enemy = Enemy::new(Rect::new(0.0, 0.0, 10.0, 10.0), Color::GREEN);
        enemy.velocity = Vec2::new(20.0, 0.0);
        enemy.update(&(), 0.5);
        assert_eq!(enemy.body.position(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn dies_when_health_runs_out() {
        let mut enemy = Enemy::new(Rect::new(0.0, 0.0, 10.0, 10.0), Color::GREEN);
        assert!(!enemy.is_dead());
        enemy.damage(1);
        assert!(enemy.is_dead());
    }
}
