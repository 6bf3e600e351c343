//! Core animation clip data types

use glide_core::{GlideError, Result, Vec3};
use serde::{Deserialize, Serialize};

/// A pre-authored animation baked into a model: named tracks over time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Human-readable name
    pub name: String,
    /// Total duration in seconds
    pub duration: f64,
    /// Animated node tracks
    pub tracks: Vec<AnimationTrack>,
}

impl AnimationClip {
    /// Check that the clip can be sampled: a positive finite duration, and
    /// every track holding at least one key with finite, non-decreasing times.
    pub fn validate(&self) -> Result<()> {
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(GlideError::AnimationError(format!(
                "Clip '{}' has non-positive duration: {}",
                self.name, self.duration
            )));
        }

        for (i, track) in self.tracks.iter().enumerate() {
            if track.keys.is_empty() {
                return Err(GlideError::AnimationError(format!(
                    "Clip '{}' track {} has no keys",
                    self.name, i
                )));
            }
            if let Some(key) = track.keys.iter().find(|k| !k.time.is_finite()) {
                return Err(GlideError::AnimationError(format!(
                    "Clip '{}' track {} has a non-finite key time: {}",
                    self.name, i, key.time
                )));
            }
            // The sampler binary-searches keys by time
            if track.keys.windows(2).any(|w| w[1].time < w[0].time) {
                return Err(GlideError::AnimationError(format!(
                    "Clip '{}' track {} has keys out of time order",
                    self.name, i
                )));
            }
        }
        Ok(())
    }
}

/// A single animated channel of one child node (e.g. the screen hinge rotation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationTrack {
    /// Name of the child node this track poses
    pub node: String,
    /// Which transform channel this track drives
    pub target: TrackTarget,
    /// Interpolation mode between keys
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Keys sorted by time
    pub keys: Vec<TrackKey>,
}

/// A value at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackKey {
    /// Time in seconds from clip start
    pub time: f64,
    pub value: Vec3,
    /// Incoming tangent for cubic spline
    #[serde(default)]
    pub in_tangent: Option<Vec3>,
    /// Outgoing tangent for cubic spline
    #[serde(default)]
    pub out_tangent: Option<Vec3>,
}

impl TrackKey {
    pub fn new(time: f64, value: Vec3) -> Self {
        Self {
            time,
            value,
            in_tangent: None,
            out_tangent: None,
        }
    }
}

/// Which transform channel a track drives
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrackTarget {
    Position,
    /// Euler radians
    Rotation,
    Scale,
}

/// How to interpolate between keys
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum Interpolation {
    /// Jump to next value (no blending)
    Step,
    /// Linear interpolation
    #[default]
    Linear,
    /// Cubic Hermite spline (requires tangents)
    CubicSpline,
}
