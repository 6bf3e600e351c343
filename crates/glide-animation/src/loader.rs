//! TOML-based animation clip loading

use crate::clip::AnimationClip;
use glide_core::{GlideError, Result};
use std::path::Path;

/// Load an animation clip from a `.anim.toml` file.
///
/// The file format mirrors the `AnimationClip` struct:
/// ```toml
/// name = "open"
/// duration = 2.0
///
/// [[tracks]]
/// node = "screen"
/// target = "rotation"
/// interpolation = "Linear"
///
/// [[tracks.keys]]
/// time = 0.0
/// value = [-1.6, 0.0, 0.0]
/// # ...more keys
/// ```
pub fn load_clip_from_file(path: &Path) -> Result<AnimationClip> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => GlideError::MissingAsset(path.display().to_string()),
        _ => GlideError::AnimationError(format!("Failed to read {}: {}", path.display(), e)),
    })?;
    load_clip_from_str(&content, path)
}

/// Parse and validate an animation clip from a TOML string.
pub fn load_clip_from_str(content: &str, path: &Path) -> Result<AnimationClip> {
    let clip: AnimationClip = toml::from_str(content).map_err(|e| {
        GlideError::AnimationError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    clip.validate()?;
    Ok(clip)
}
