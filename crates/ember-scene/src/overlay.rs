//! Screen-space overlays: the pulsing border and the debug grid

use crate::config::GridConfig;
use ember_core::{Canvas, Color, Rect, Vec2};
use ember_particles::curves::lerp_color;

/// Color that oscillates between two endpoints over time
#[derive(Clone, Debug, PartialEq)]
pub struct FadeColor {
    pub from: Color,
    pub to: Color,
    /// Phase advance per second
    pub rate: f32,
    phase: f32,
}

impl FadeColor {
    pub fn new(from: Color, to: Color, rate: f32) -> Self {
        Self {
            from,
            to,
            rate,
            phase: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.phase = (self.phase + self.rate * dt).rem_euclid(std::f32::consts::TAU);
    }

    /// Blend factor in `[0, 1]`; starts at 0.5
    pub fn mix(&self) -> f32 {
        (self.phase.sin() + 1.0) * 0.5
    }

    pub fn current(&self) -> Color {
        lerp_color(self.from, self.to, self.mix())
    }

    /// Outline the whole screen in the current color
    pub fn draw_border(&self, canvas: &mut dyn Canvas, screen: Vec2, thickness: f32) {
        canvas.stroke_rect(Rect::new(0.0, 0.0, screen.x, screen.y), thickness, self.current());
    }
}

/// Fixed screen-space grid of lines
#[derive(Clone, Debug, PartialEq)]
pub struct LineGrid {
    pub origin: Vec2,
    pub cell: Vec2,
    pub columns: u32,
    pub rows: u32,
    pub color: Color,
}

impl LineGrid {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            origin: Vec2::from_array(config.origin),
            cell: Vec2::from_array(config.cell),
            columns: config.columns,
            rows: config.rows,
            color: config.color,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.cell.x * self.columns as f32,
            self.cell.y * self.rows as f32,
        )
    }

    /// Emits `columns + 1` vertical then `rows + 1` horizontal lines
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let size = self.size();
        for c in 0..=self.columns {
            let x = self.origin.x + c as f32 * self.cell.x;
            canvas.line(
                Vec2::new(x, self.origin.y),
                Vec2::new(x, self.origin.y + size.y),
                self.color,
            );
        }
        for r in 0..=self.rows {
            let y = self.origin.y + r as f32 * self.cell.y;
            canvas.line(
                Vec2::new(self.origin.x, y),
                Vec2::new(self.origin.x + size.x, y),
                self.color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{CommandRecorder, DrawCommand};

    #[test]
    fn fade_starts_halfway_and_stays_between_endpoints() {
        let mut fade = FadeColor::new(Color::YELLOW, Color::BLUE, 0.6);
        assert!((fade.mix() - 0.5).abs() < 1e-6);

        for _ in 0..500 {
            fade.update(1.0 / 60.0);
            let m = fade.mix();
            assert!((0.0..=1.0).contains(&m));
        }
    }

    #[test]
    fn fade_reaches_target_at_quarter_turn() {
        let mut fade = FadeColor::new(Color::YELLOW, Color::BLUE, 1.0);
        fade.update(std::f32::consts::FRAC_PI_2);
        let c = fade.current();
        assert!((c.b - Color::BLUE.b).abs() < 1e-4);
        assert!((c.r - Color::BLUE.r).abs() < 1e-4);
    }

    #[test]
    fn border_covers_the_screen() {
        let fade = FadeColor::new(Color::YELLOW, Color::BLUE, 0.6);
        let mut canvas = CommandRecorder::new();
        fade.draw_border(&mut canvas, Vec2::new(700.0, 700.0), 8.0);

        match &canvas.commands()[0] {
            DrawCommand::StrokeRect { rect, thickness, .. } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 700.0, 700.0));
                assert_eq!(*thickness, 8.0);
            }
            other => panic!("expected stroke_rect, got {}", other.kind()),
        }
    }

    #[test]
    fn grid_line_count() {
        let grid = LineGrid::from_config(&GridConfig::default());
        assert_eq!(grid.size(), Vec2::new(320.0, 320.0));

        let mut canvas = CommandRecorder::new();
        grid.draw(&mut canvas);
        assert_eq!(canvas.len(), 22);
        assert!(canvas.commands().iter().all(|c| c.kind() == "line"));
    }
}
