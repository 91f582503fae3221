//! Print the effective configuration

use super::load_config;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let text = config
        .to_toml_string()
        .context("Failed to serialize scene config")?;
    print!("{text}");
    Ok(())
}
