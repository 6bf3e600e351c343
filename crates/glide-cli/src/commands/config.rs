//! Config scaffolding command

use anyhow::{Context, Result};
use glide_animation::SceneConfig;
use std::fs;
use std::path::Path;

pub fn run(output: &str, force: bool) -> Result<()> {
    let path = Path::new(output);

    if path.exists() && !force {
        anyhow::bail!("'{}' already exists (use --force to overwrite)", output);
    }

    let content = SceneConfig::default()
        .to_toml()
        .context("Failed to serialize default config")?;
    fs::write(path, content).with_context(|| format!("Failed to write '{}'", output))?;

    println!("Wrote default scene config to {}", output);
    Ok(())
}
