//! Ember Scene - entities and the frame driver
//!
//! [`Scene`] owns the particle pool and the three lifecycle lists
//! (backgrounds, trails, enemies) together with the player, camera and
//! overlays, and sequences their update and draw passes each frame.

pub mod config;
pub mod entities;
pub mod overlay;
mod scene;

pub use config::SceneConfig;
pub use entities::{Enemy, ParallaxLayer, Player, Trail};
pub use overlay::{FadeColor, LineGrid};
pub use scene::{FrameStats, Scene};
