//! Rendering collaborator interface
//!
//! The simulation never talks to a graphics API directly. Everything that
//! draws receives a `&mut dyn Canvas`; a windowed backend implements it with
//! real draw calls, while [`CommandRecorder`] captures the calls for tests and
//! headless runs.

use crate::types::{Color, Rect, Vec2};

/// Handle to a sprite sheet registered in a [`SheetRegistry`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SheetId(u32);

impl SheetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Sprite sheet names, interned once at load time.
///
/// Drawables carry a [`SheetId`]; a backend resolves it back to the asset name
/// with [`name`](Self::name).
#[derive(Clone, Debug, Default)]
pub struct SheetRegistry {
    names: Vec<String>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `name`, registering it on first use
    pub fn register(&mut self, name: &str) -> SheetId {
        if let Some(index) = self.names.iter().position(|n| n == name) {
            return SheetId(index as u32);
        }
        self.names.push(name.to_string());
        SheetId((self.names.len() - 1) as u32)
    }

    pub fn name(&self, id: SheetId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Immediate-mode 2D drawing primitives, in screen coordinates
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Draw one frame of a sprite sheet, tinted by `tint`
    fn sprite(&mut self, sheet: SheetId, frame: u32, dest: Rect, tint: Color);

    /// Blit a whole named texture (background layers)
    fn texture(&mut self, name: &str, dest: Rect);
}

/// One recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        thickness: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Sprite {
        sheet: SheetId,
        frame: u32,
        dest: Rect,
        tint: Color,
    },
    Texture {
        name: String,
        dest: Rect,
    },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::FillRect { .. } => "fill_rect",
            DrawCommand::StrokeRect { .. } => "stroke_rect",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Sprite { .. } => "sprite",
            DrawCommand::Texture { .. } => "texture",
        }
    }
}

/// A canvas that records every call in order
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drain all recorded commands, leaving the recorder empty
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for CommandRecorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            thickness,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn sprite(&mut self, sheet: SheetId, frame: u32, dest: Rect, tint: Color) {
        self.commands.push(DrawCommand::Sprite {
            sheet,
            frame,
            dest,
            tint,
        });
    }

    fn texture(&mut self, name: &str, dest: Rect) {
        self.commands.push(DrawCommand::Texture {
            name: name.to_string(),
            dest,
        });
    }
}
