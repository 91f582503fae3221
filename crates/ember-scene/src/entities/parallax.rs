//! Horizontally scrolling background layers

use ember_core::{Camera, Canvas, Rect, Vec2};
use ember_lifecycle::Lifecycle;

/// One background layer that scrolls at a fraction of the camera speed.
///
/// The layer is drawn twice side by side so that wrapping the offset never
/// exposes a gap.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxLayer {
    pub texture: String,
    /// 0 = fixed to the screen, 1 = moves with the level
    pub scroll: f32,
    pub size: Vec2,
    /// Screen-space x of the first copy, always in `(-size.x, 0]`
    pub offset: f32,
    retired: bool,
}

impl ParallaxLayer {
    pub fn new(texture: impl Into<String>, scroll: f32, size: Vec2) -> Self {
        Self {
            texture: texture.into(),
            scroll,
            size,
            offset: 0.0,
            retired: false,
        }
    }

    /// Mark the layer for removal on the next update pass
    pub fn retire(&mut self) {
        self.retired = true;
    }
}

impl Lifecycle for ParallaxLayer {
    type Env = Camera;

    fn update(&mut self, camera: &Camera, _dt: f32) {
        if self.size.x > 0.0 {
            self.offset = -(camera.position.x * self.scroll).rem_euclid(self.size.x);
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, _camera: &Camera) {
        canvas.texture(&self.texture, Rect::new(self.offset, 0.0, self.size.x, self.size.y));
        canvas.texture(
            &self.texture,
            Rect::new(self.offset + self.size.x, 0.0, self.size.x, self.size.y),
        );
    }

    fn is_dead(&self) -> bool {
        self.retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{CommandRecorder, DrawCommand};

    fn camera_at(x: f32) -> Camera {
        let mut camera = Camera::default();
        camera.position.x = x;
        camera
    }

    #[test]
    fn offset_follows_scroll_factor() {
        let mut layer = ParallaxLayer::new("layer_0", 0.1, Vec2::new(700.0, 700.0));
        layer.update(&camera_at(1000.0), 0.016);
        assert!((layer.offset + 100.0).abs() < 1e-3);
    }

    #[test]
    fn offset_wraps_within_layer_width() {
        let mut layer = ParallaxLayer::new("layer_0", 0.5, Vec2::new(700.0, 700.0));
        for x in [0.0, 650.0, 1400.0, 2299.0] {
            layer.update(&camera_at(x), 0.016);
            assert!(layer.offset <= 0.0 && layer.offset > -700.0, "offset {}", layer.offset);
        }
    }

    #[test]
    fn draws_two_copies() {
        let mut layer = ParallaxLayer::new("layer_3", 0.25, Vec2::new(700.0, 700.0));
        layer.update(&camera_at(400.0), 0.016);

        let mut canvas = CommandRecorder::new();
        layer.draw(&mut canvas, &camera_at(400.0));
        let xs: Vec<f32> = canvas
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Texture { name, dest } => {
                    assert_eq!(name, "layer_3");
                    dest.x
                }
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(xs, vec![-100.0, 600.0]);
    }

    #[test]
    fn retired_layer_is_dead() {
        let mut layer = ParallaxLayer::new("layer_0", 0.1, Vec2::new(700.0, 700.0));
        assert!(!layer.is_dead());
        layer.retire();
        assert!(layer.is_dead());
    }
}
