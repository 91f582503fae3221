//! 2D camera that tracks a target inside the level bounds

use crate::types::{Rect, Vec2};

/// A viewport into the level
///
/// `position` is the world coordinate of the viewport's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Level size in pixels; the viewport never leaves `[0, level]`
    pub level: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: Vec2::new(700.0, 700.0),
            level: Vec2::new(3000.0, 700.0),
        }
    }
}

impl Camera {
    pub fn new(viewport: Vec2, level: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport,
            level,
        }
    }

    /// Center the viewport on `target`, clamped so it stays inside the level
    pub fn follow(&mut self, target: &Rect) {
        let center = target.center();
        let max_x = (self.level.x - self.viewport.x).max(0.0);
        let max_y = (self.level.y - self.viewport.y).max(0.0);
        self.position = Vec2::new(
            (center.x - self.viewport.x * 0.5).clamp(0.0, max_x),
            (center.y - self.viewport.y * 0.5).clamp(0.0, max_y),
        );
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    /// Translate a world-space rectangle into screen space
    pub fn rect_to_screen(&self, rect: &Rect) -> Rect {
        rect.translated(Vec2::ZERO - self.position)
    }
}
