//! Ember Core - Foundational types for the Ember 2D runtime
//!
//! This crate provides the types that all other Ember crates depend on:
//! - `Vec2`, `Rect`, `Color` - Spatial and color types
//! - `CollisionSide` - Result of an axis-aligned overlap test
//! - `Camera` - Viewport that follows a target inside the level bounds
//! - `Canvas` - Rendering collaborator trait, plus a recording implementation
//! - `SheetRegistry` - Interned sprite sheet names addressed by `SheetId`
//! - Error types and Result alias

mod camera;
mod canvas;
mod error;
mod types;

pub use camera::Camera;
pub use canvas::{Canvas, CommandRecorder, DrawCommand, SheetId, SheetRegistry};
pub use error::{EmberError, Result};
pub use types::{CollisionSide, Color, Rect, Vec2};
