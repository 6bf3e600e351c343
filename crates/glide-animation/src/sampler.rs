//! Pure track evaluation - binary search + interpolation

use crate::clip::{AnimationTrack, Interpolation};
use glide_core::Vec3;

/// Sample a track at a given time, returning the interpolated value.
///
/// Times before the first key or after the last hold the end values. Returns
/// `None` for a track without keys. Keys are expected in time order
/// (`AnimationClip::validate`); out-of-order keys give an unspecified value
/// but never panic.
pub fn sample_track(track: &AnimationTrack, time: f64) -> Option<Vec3> {
    let keys = &track.keys;
    let first = keys.first()?;

    if time <= first.time || time.is_nan() {
        return Some(first.value);
    }

    let last = &keys[keys.len() - 1];
    if time >= last.time {
        return Some(last.value);
    }

    // Index of the first key strictly after `time`
    let idx = keys.partition_point(|k| k.time <= time);
    if idx == 0 {
        return Some(first.value);
    }
    if idx == keys.len() {
        return Some(last.value);
    }
    let prev = &keys[idx - 1];
    let next = &keys[idx];

    let span = next.time - prev.time;
    if span <= 0.0 {
        return Some(prev.value);
    }
    let t = ((time - prev.time) / span) as f32;

    let value = match track.interpolation {
        Interpolation::Step => prev.value,
        Interpolation::Linear => Vec3::lerp(prev.value, next.value, t),
        Interpolation::CubicSpline => {
            let out_tan = prev.out_tangent.unwrap_or(Vec3::ZERO);
            let in_tan = next.in_tangent.unwrap_or(Vec3::ZERO);
            cubic_hermite(prev.value, out_tan, next.value, in_tan, span as f32, t)
        }
    };
    Some(value)
}

/// Cubic Hermite spline interpolation.
///
/// `p0`, `m0`: start value and outgoing tangent (per second)
/// `p1`, `m1`: end value and incoming tangent (per second)
/// `dt`: time span of the interval, used to scale the tangents
/// `t`: normalized [0..1] parameter
pub fn cubic_hermite(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, dt: f32, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p0 * h00 + m0 * (h10 * dt) + p1 * h01 + m1 * (h11 * dt)
}
