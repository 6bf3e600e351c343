//! Scroll-fraction keyframe interpolation
//!
//! A `KeyframeSequence` splits the scroll range [0, 1] into N-1 equal
//! segments, one per consecutive keyframe pair, and linearly interpolates
//! position and rotation within the segment the scroll fraction falls in.

use glide_core::{GlideError, Result, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// One anchor point along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub position: Vec3,
    /// Euler radians
    pub rotation: Vec3,
}

impl Keyframe {
    pub const fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }
}

/// What happens to the local parameter `t` when the scroll fraction is
/// outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Leave `t` unclamped: the first and last segments continue linearly
    /// past their keyframes.
    #[default]
    Extrapolate,
    /// Clamp `t` to [0, 1]: out-of-range fractions hold the first or last
    /// keyframe.
    Clamp,
}

/// Interpolated transform for one scroll fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetTransform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl From<Keyframe> for TargetTransform {
    fn from(kf: Keyframe) -> Self {
        Self {
            position: kf.position,
            rotation: kf.rotation,
        }
    }
}

/// Which keyframe pair brackets a scroll fraction, and how far into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Index of the first keyframe of the pair, in [0, N-2]
    pub index: usize,
    /// Local progress; outside [0, 1] only when extrapolating
    pub t: f64,
}

/// Ordered, immutable keyframes. Always holds at least two.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeSequence {
    keyframes: Vec<Keyframe>,
    boundary: BoundaryPolicy,
}

impl KeyframeSequence {
    /// Build a sequence, rejecting fewer than two keyframes.
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self> {
        if keyframes.len() < 2 {
            return Err(GlideError::DegenerateKeyframes(keyframes.len()));
        }
        if let Some(i) = keyframes
            .iter()
            .position(|kf| !kf.position.is_finite() || !kf.rotation.is_finite())
        {
            return Err(GlideError::ConfigError(format!(
                "keyframe {} has a non-finite component",
                i
            )));
        }
        Ok(Self {
            keyframes,
            boundary: BoundaryPolicy::default(),
        })
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of segments (N-1).
    pub fn segment_count(&self) -> usize {
        self.keyframes.len() - 1
    }

    /// Scroll fraction at which keyframe `k` is reached exactly.
    pub fn breakpoint(&self, k: usize) -> f64 {
        k as f64 / self.segment_count() as f64
    }

    /// Locate the segment for scroll fraction `s`.
    ///
    /// Non-finite fractions are treated as 0.0.
    pub fn segment(&self, s: f64) -> Segment {
        let s = if s.is_finite() { s } else { 0.0 };
        let last = (self.keyframes.len() - 2) as f64;
        let position = s * self.segment_count() as f64;
        let index = position.floor().clamp(0.0, last);
        let mut t = position - index;
        if self.boundary == BoundaryPolicy::Clamp {
            t = t.clamp(0.0, 1.0);
        }
        Segment {
            index: index as usize,
            t,
        }
    }

    /// Interpolated position and rotation for scroll fraction `s`.
    ///
    /// Pure: the same `s` always yields a bit-identical result.
    pub fn interpolate(&self, s: f64) -> TargetTransform {
        let Segment { index, t } = self.segment(s);
        let current = &self.keyframes[index];
        let next = &self.keyframes[index + 1];
        let t = t as f32;
        TargetTransform {
            position: Vec3::lerp(current.position, next.position, t),
            rotation: Vec3::lerp(current.rotation, next.rotation, t),
        }
    }
}

/// The laptop showcase path: enter from the lower right, swing across the
/// page, and settle facing the viewer at the origin.
pub fn laptop_keyframes() -> Vec<Keyframe> {
    vec![
        Keyframe::new(Vec3::new(3.5, -1.25, 0.0), Vec3::new(0.0, -PI / 1.25, 0.0)),
        Keyframe::new(Vec3::new(2.5, -1.0, 0.0), Vec3::new(0.0, -PI, 0.0)),
        Keyframe::new(Vec3::new(-3.5, -1.0, 0.0), Vec3::new(0.0, 0.1, 0.0)),
        Keyframe::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, -PI / 2.0, 0.0)),
        Keyframe::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> KeyframeSequence {
        KeyframeSequence::new(laptop_keyframes()).unwrap()
    }

    fn kf(i: f32) -> Keyframe {
        Keyframe::new(Vec3::new(i, 2.0 * i, -i), Vec3::new(0.1 * i, 0.0, i * i))
    }

    fn assert_exact(actual: TargetTransform, expected: &Keyframe) {
        assert_eq!(actual.position, expected.position);
        assert_eq!(actual.rotation, expected.rotation);
    }

    #[test]
    fn rejects_degenerate_sets() {
        assert!(matches!(
            KeyframeSequence::new(vec![]),
            Err(GlideError::DegenerateKeyframes(0))
        ));
        assert!(matches!(
            KeyframeSequence::new(vec![kf(1.0)]),
            Err(GlideError::DegenerateKeyframes(1))
        ));
        assert!(KeyframeSequence::new(vec![kf(0.0), kf(1.0)]).is_ok());
    }

    #[test]
    fn rejects_non_finite_keyframes() {
        let bad = Keyframe::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ZERO);
        assert!(matches!(
            KeyframeSequence::new(vec![kf(0.0), bad]),
            Err(GlideError::ConfigError(_))
        ));
    }

    #[test]
    fn endpoints_return_first_and_last_exactly() {
        for n in 2..=7 {
            let frames: Vec<Keyframe> = (0..n).map(|i| kf(i as f32 * 1.37 - 0.4)).collect();
            for policy in [BoundaryPolicy::Extrapolate, BoundaryPolicy::Clamp] {
                let seq = KeyframeSequence::new(frames.clone()).unwrap().with_boundary(policy);
                assert_exact(seq.interpolate(0.0), &frames[0]);
                assert_exact(seq.interpolate(1.0), &frames[n - 1]);
            }
        }
    }

    #[test]
    fn half_scroll_lands_on_middle_keyframe() {
        let seq = laptop();
        let seg = seq.segment(0.5);
        assert_eq!(seg, Segment { index: 2, t: 0.0 });
        assert_exact(seq.interpolate(0.5), &laptop_keyframes()[2]);
    }

    #[test]
    fn mid_segment_is_midpoint() {
        let seq = laptop();
        let seg = seq.segment(0.625);
        assert_eq!(seg.index, 2);
        assert_eq!(seg.t, 0.5);

        let frames = laptop_keyframes();
        let out = seq.interpolate(0.625);
        let expected = Vec3::lerp(frames[2].position, frames[3].position, 0.5);
        assert!(out.position.max_abs_diff(&expected) < 1e-6);
        assert!(out.position.max_abs_diff(&Vec3::new(-1.75, -1.0, 0.0)) < 1e-6);
    }

    #[test]
    fn interior_fractions_are_convex_combinations() {
        let seq = laptop();
        let frames = laptop_keyframes();
        for k in 0..seq.segment_count() {
            let lo = seq.breakpoint(k);
            let hi = seq.breakpoint(k + 1);
            for step in 1..10 {
                let s = lo + (hi - lo) * step as f64 / 10.0;
                let seg = seq.segment(s);
                assert_eq!(seg.index, k);
                assert!(seg.t > 0.0 && seg.t < 1.0);

                let out = seq.interpolate(s);
                let (a, b) = (&frames[k], &frames[k + 1]);
                for (v, lo_v, hi_v) in [
                    (out.position.x, a.position.x, b.position.x),
                    (out.position.y, a.position.y, b.position.y),
                    (out.rotation.y, a.rotation.y, b.rotation.y),
                ] {
                    let (min, max) = (lo_v.min(hi_v), lo_v.max(hi_v));
                    assert!(v >= min - 1e-6 && v <= max + 1e-6, "s={} v={}", s, v);
                }
            }
        }
    }

    #[test]
    fn continuous_at_breakpoints() {
        let seq = laptop();
        let frames = laptop_keyframes();
        let eps = 1e-9;
        for k in 1..seq.segment_count() {
            let s = seq.breakpoint(k);
            let below = seq.interpolate(s - eps);
            let above = seq.interpolate(s + eps);
            assert_exact(seq.interpolate(s), &frames[k]);
            assert!(below.position.max_abs_diff(&frames[k].position) < 1e-6);
            assert!(above.position.max_abs_diff(&frames[k].position) < 1e-6);
            assert!(below.rotation.max_abs_diff(&frames[k].rotation) < 1e-6);
            assert!(above.rotation.max_abs_diff(&frames[k].rotation) < 1e-6);
        }
    }

    #[test]
    fn interpolation_is_idempotent() {
        let seq = laptop();
        for s in [-0.3, 0.0, 0.17, 0.5, 0.731, 1.0, 1.4] {
            let a = seq.interpolate(s);
            let b = seq.interpolate(s);
            assert_eq!(a.position.to_array().map(f32::to_bits), b.position.to_array().map(f32::to_bits));
            assert_eq!(a.rotation.to_array().map(f32::to_bits), b.rotation.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn extrapolates_past_the_ends_by_default() {
        let seq = laptop();
        let frames = laptop_keyframes();

        // 1.25 → last segment with t = 2.0
        let seg = seq.segment(1.25);
        assert_eq!(seg.index, 3);
        assert_eq!(seg.t, 2.0);
        let out = seq.interpolate(1.25);
        let expected = Vec3::lerp(frames[3].position, frames[4].position, 2.0);
        assert!(out.position.max_abs_diff(&expected) < 1e-6);

        // Negative fractions → first segment with negative t
        let seg = seq.segment(-0.125);
        assert_eq!(seg.index, 0);
        assert_eq!(seg.t, -0.5);
        let out = seq.interpolate(-0.125);
        assert!(out.position.max_abs_diff(&Vec3::new(4.0, -1.375, 0.0)) < 1e-6);
    }

    #[test]
    fn clamp_policy_holds_the_ends() {
        let seq = laptop().with_boundary(BoundaryPolicy::Clamp);
        let frames = laptop_keyframes();
        assert_eq!(seq.segment(1.25), Segment { index: 3, t: 1.0 });
        assert_exact(seq.interpolate(1.25), &frames[4]);
        assert_eq!(seq.segment(-2.0), Segment { index: 0, t: 0.0 });
        assert_exact(seq.interpolate(-2.0), &frames[0]);
    }

    #[test]
    fn non_finite_fraction_resolves_to_start() {
        let seq = laptop();
        let frames = laptop_keyframes();
        assert_exact(seq.interpolate(f64::NAN), &frames[0]);
        assert_exact(seq.interpolate(f64::INFINITY), &frames[0]);
    }

    #[test]
    fn two_keyframes_form_one_segment() {
        let seq = KeyframeSequence::new(vec![kf(0.0), kf(4.0)]).unwrap();
        assert_eq!(seq.segment_count(), 1);
        assert_eq!(seq.segment(0.75), Segment { index: 0, t: 0.75 });
        let out = seq.interpolate(0.25);
        assert!(out.position.max_abs_diff(&Vec3::new(1.0, 2.0, -1.0)) < 1e-6);
    }
}
