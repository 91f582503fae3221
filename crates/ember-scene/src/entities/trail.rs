//! Fading afterimages of the player

use ember_core::{Camera, Canvas, Color, Rect};
use ember_lifecycle::Lifecycle;

/// One trail segment; dies once its alpha is used up
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    pub body: Rect,
    pub color: Color,
    pub alpha: f32,
    /// Alpha lost per second
    pub decay: f32,
}

impl Trail {
    pub fn new(body: Rect, color: Color, decay: f32) -> Self {
        Self {
            body,
            color,
            alpha: color.a,
            decay,
        }
    }
}

impl Lifecycle for Trail {
    type Env = ();

    fn update(&mut self, _env: &(), dt: f32) {
        self.alpha -= self.decay * dt;
    }

    fn draw(&self, canvas: &mut dyn Canvas, camera: &Camera) {
        canvas.fill_rect(camera.rect_to_screen(&self.body), self.color.with_alpha(self.alpha));
    }

    fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_lifecycle::LifecycleList;

    fn trail(alpha: f32) -> Trail {
        Trail::new(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE.with_alpha(alpha), 1.0)
    }

    #[test]
    fn fades_then_dies() {
        let mut t = trail(1.0);
        t.update(&(), 0.5);
        assert!((t.alpha - 0.5).abs() < 1e-6);
        assert!(!t.is_dead());
        t.update(&(), 0.5);
        assert!(t.is_dead());
    }

    #[test]
    fn newest_trail_dying_moves_tail_back() {
        let mut trails = LifecycleList::new();
        let older = trails.append(trail(1.0));
        trails.append(trail(0.1));

        assert_eq!(trails.update_and_reap(&(), 0.2), 1);
        assert_eq!(trails.tail(), older);
        assert_eq!(trails.len(), 1);
    }
}
