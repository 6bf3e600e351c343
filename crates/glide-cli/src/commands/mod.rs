//! CLI command implementations

pub mod config;
pub mod sample;
pub mod simulate;

use anyhow::{Context, Result};
use glide_animation::{load_config_from_file, SceneConfig};
use std::path::Path;

/// Load a scene config, or the built-in laptop showcase when no path is given.
pub fn load_config(path: Option<&str>) -> Result<SceneConfig> {
    match path {
        Some(path) => load_config_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path)),
        None => Ok(SceneConfig::default()),
    }
}
