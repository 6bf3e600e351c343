//! Scene configuration (`*.glide.toml`)

use crate::keyframes::{laptop_keyframes, BoundaryPolicy, Keyframe, KeyframeSequence};
use crate::player::LoopMode;
use crate::tween::TweenConfig;
use glide_core::{GlideError, Result, Vec3};
use glide_runtime::ScrollConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Everything needed to build a `ScrollScene`.
///
/// Every section is optional; the defaults reproduce the laptop showcase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub tween: TweenConfig,
    #[serde(default)]
    pub interpolation: InterpolationConfig,
    #[serde(default)]
    pub clip: ClipConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default = "laptop_keyframes")]
    pub keyframes: Vec<Keyframe>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            tween: TweenConfig::default(),
            interpolation: InterpolationConfig::default(),
            clip: ClipConfig::default(),
            model: ModelConfig::default(),
            keyframes: laptop_keyframes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InterpolationConfig {
    #[serde(default)]
    pub boundary: BoundaryPolicy,
}

/// Which embedded clip to scrub and how it ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Clip to drive; the model's first clip when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub loop_mode: LoopMode,
    #[serde(default = "default_true")]
    pub clamp_when_finished: bool,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            name: None,
            loop_mode: LoopMode::Once,
            clamp_when_finished: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Placement of the model when it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_scale")]
    pub scale: Vec3,
}

fn default_model_scale() -> Vec3 {
    Vec3::splat(1.4)
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale: default_model_scale(),
        }
    }
}

impl SceneConfig {
    /// Check the values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !(self.tween.duration > 0.0 && self.tween.duration.is_finite()) {
            return Err(GlideError::ValueOutOfRange {
                field: "tween.duration".into(),
                min: 0.0,
                max: f64::INFINITY,
                value: self.tween.duration,
            });
        }
        if !(self.scroll.reference_viewports > 0.0 && self.scroll.reference_viewports.is_finite()) {
            return Err(GlideError::ValueOutOfRange {
                field: "scroll.reference_viewports".into(),
                min: 0.0,
                max: f64::INFINITY,
                value: self.scroll.reference_viewports,
            });
        }
        if self.keyframes.len() < 2 {
            return Err(GlideError::DegenerateKeyframes(self.keyframes.len()));
        }
        if !self.model.scale.is_finite() {
            return Err(GlideError::ConfigError("model.scale must be finite".into()));
        }
        Ok(())
    }

    /// The configured keyframes with the configured boundary policy.
    pub fn keyframe_sequence(&self) -> Result<KeyframeSequence> {
        Ok(KeyframeSequence::new(self.keyframes.clone())?
            .with_boundary(self.interpolation.boundary))
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GlideError::ConfigError(e.to_string()))
    }
}

/// Load and validate a scene config file.
pub fn load_config_from_file(path: &Path) -> Result<SceneConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        GlideError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let config = load_config_from_str(&content, path)?;
    info!(
        path = %path.display(),
        keyframes = config.keyframes.len(),
        "loaded scene config"
    );
    Ok(config)
}

/// Parse and validate a scene config from a TOML string.
pub fn load_config_from_str(content: &str, path: &Path) -> Result<SceneConfig> {
    let config: SceneConfig = toml::from_str(content).map_err(|e| {
        GlideError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    config.validate()?;
    Ok(config)
}
