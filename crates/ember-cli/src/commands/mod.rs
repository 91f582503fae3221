//! CLI command implementations

pub mod config;
pub mod run;

use anyhow::{Context, Result};
use ember_scene::SceneConfig;
use std::path::Path;

/// Load a scene file, or the built-in defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load scene config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}
