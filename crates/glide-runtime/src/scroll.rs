//! Scroll offset normalization

use serde::{Deserialize, Serialize};

/// How raw scroll offsets map onto the scroll fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Scroll distance covering the whole animation, in viewport heights.
    #[serde(default = "default_reference_viewports")]
    pub reference_viewports: f64,
}

fn default_reference_viewports() -> f64 {
    4.0
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            reference_viewports: default_reference_viewports(),
        }
    }
}

/// Current scroll position as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Vertical scroll offset in pixels
    pub offset: f64,
    /// Viewport height in pixels
    pub viewport_height: f64,
    pub config: ScrollConfig,
}

impl ScrollState {
    pub fn new(config: ScrollConfig, viewport_height: f64) -> Self {
        Self {
            offset: 0.0,
            viewport_height,
            config,
        }
    }

    /// Scroll distance that maps to a fraction of 1.0, in pixels.
    pub fn reference_distance(&self) -> f64 {
        self.viewport_height * self.config.reference_viewports
    }

    /// Normalized scroll fraction, nominally in [0, 1].
    ///
    /// Overscroll is passed through unclamped. A zero-height or otherwise
    /// unusable viewport yields 0.0.
    pub fn fraction(&self) -> f64 {
        let distance = self.reference_distance();
        if !distance.is_finite() || distance <= 0.0 || !self.offset.is_finite() {
            return 0.0;
        }
        self.offset / distance
    }
}
