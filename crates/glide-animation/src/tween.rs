//! Eased, time-boxed transitions that can be redirected in flight
//!
//! A tween moves a `Vec3` from where it was to a target over a fixed
//! duration. Scroll events arrive faster than the duration, so a running tween
//! is never queued behind: `retarget` restarts the clock from the current
//! value toward the new target. With velocity preservation on, a
//! `u·(1-u)²` correction term (zero at both ends, unit slope at the start)
//! is added so the new path leaves with the old path's velocity.

use crate::ease::Ease;
use glide_core::Vec3;
use serde::{Deserialize, Serialize};

/// Timing shared by the position and rotation tweens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenConfig {
    /// Transition length in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Carry the in-flight velocity into a retargeted transition
    #[serde(default = "default_preserve_velocity")]
    pub preserve_velocity: bool,
}

fn default_duration() -> f64 {
    0.5
}

fn default_preserve_velocity() -> bool {
    true
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            ease: Ease::default(),
            preserve_velocity: default_preserve_velocity(),
        }
    }
}

/// A redirectable transition of one `Vec3`.
#[derive(Debug, Clone)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    /// Velocity-matching term, in value units over the whole duration
    correction: Vec3,
    elapsed: f64,
    duration: f64,
    ease: Ease,
    active: bool,
}

impl Tween {
    /// An idle tween resting at the origin.
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            from: Vec3::ZERO,
            to: Vec3::ZERO,
            correction: Vec3::ZERO,
            elapsed: 0.0,
            duration,
            ease,
            active: false,
        }
    }

    /// Begin a fresh transition from `from` to `to`, ignoring any motion in flight.
    pub fn start(&mut self, from: Vec3, to: Vec3) {
        self.from = from;
        self.to = to;
        self.correction = Vec3::ZERO;
        self.elapsed = 0.0;
        self.active = true;
        if self.duration <= 0.0 {
            self.finish();
        }
    }

    /// Redirect toward `to`, starting from `current`.
    ///
    /// If a transition is in flight and `preserve_velocity` is set, the new
    /// path starts with the old path's velocity; otherwise this is `start`.
    pub fn retarget(&mut self, current: Vec3, to: Vec3, preserve_velocity: bool) {
        if !(self.active && preserve_velocity) || self.duration <= 0.0 {
            self.start(current, to);
            return;
        }
        let velocity = self.velocity();
        let d = self.duration as f32;
        self.from = current;
        self.to = to;
        self.correction = velocity * d - (to - current) * self.ease.derivative(0.0);
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds and return the new value, or `None` if idle.
    pub fn advance(&mut self, dt: f64) -> Option<Vec3> {
        if !self.active {
            return None;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.finish();
        }
        Some(self.value())
    }

    /// Stop where the transition currently is.
    pub fn cancel(&mut self) {
        let here = self.value();
        self.from = here;
        self.to = here;
        self.correction = Vec3::ZERO;
        self.active = false;
    }

    fn finish(&mut self) {
        self.from = self.to;
        self.correction = Vec3::ZERO;
        self.elapsed = self.duration;
        self.active = false;
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f32 {
        if !self.active || self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Current value along the path.
    pub fn value(&self) -> Vec3 {
        if !self.active {
            return self.to;
        }
        let u = self.progress();
        let h = u * (1.0 - u) * (1.0 - u);
        self.from + (self.to - self.from) * self.ease.apply(u) + self.correction * h
    }

    /// Current rate of change, in value units per second.
    pub fn velocity(&self) -> Vec3 {
        if !self.active || self.duration <= 0.0 {
            return Vec3::ZERO;
        }
        let u = self.progress();
        let dh = 1.0 - 4.0 * u + 3.0 * u * u;
        let per_u = (self.to - self.from) * self.ease.derivative(u) + self.correction * dh;
        per_u * (1.0 / self.duration as f32)
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// Independent position and rotation tweens for one object.
#[derive(Debug, Clone)]
pub struct TransformTween {
    pub position: Tween,
    pub rotation: Tween,
}

impl TransformTween {
    pub fn new(config: &TweenConfig) -> Self {
        Self {
            position: Tween::new(config.duration, config.ease),
            rotation: Tween::new(config.duration, config.ease),
        }
    }

    pub fn is_active(&self) -> bool {
        self.position.is_active() || self.rotation.is_active()
    }

    pub fn cancel(&mut self) {
        self.position.cancel();
        self.rotation.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn tween() -> Tween {
        Tween::new(0.5, Ease::PowerOut(2))
    }

    #[test]
    fn idle_tween_does_nothing() {
        let mut t = tween();
        assert_eq!(t.advance(DT), None);
        assert_eq!(t.velocity(), Vec3::ZERO);
    }

    #[test]
    fn reaches_target_exactly_after_duration() {
        let mut t = tween();
        let to = Vec3::new(2.5, -1.0, 0.3);
        t.start(Vec3::new(3.5, -1.25, 0.0), to);
        let mut last = None;
        for _ in 0..40 {
            if let Some(v) = t.advance(DT) {
                last = Some(v);
            }
        }
        assert_eq!(last, Some(to));
        assert!(!t.is_active());
        assert_eq!(t.advance(DT), None);
    }

    #[test]
    fn follows_the_ease_curve() {
        let mut t = tween();
        t.start(Vec3::ZERO, Vec3::new(8.0, 0.0, 0.0));
        let v = t.advance(0.25).unwrap();
        // power2.out at u = 0.5 → 0.875
        assert!((v.x - 7.0).abs() < 1e-5);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut t = Tween::new(0.0, Ease::Linear);
        t.start(Vec3::ZERO, Vec3::ONE);
        assert!(!t.is_active());
        assert_eq!(t.value(), Vec3::ONE);
    }

    #[test]
    fn retarget_keeps_position_and_velocity_continuous() {
        let mut t = tween();
        t.start(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        for _ in 0..6 {
            t.advance(DT);
        }
        let here = t.value();
        let velocity = t.velocity();
        assert!(velocity.x > 0.0);

        t.retarget(here, Vec3::new(-4.0, 2.0, 0.0), true);
        assert_eq!(t.target(), Vec3::new(-4.0, 2.0, 0.0));
        assert_eq!(t.value(), here);
        assert!(t.velocity().max_abs_diff(&velocity) < 1e-4);

        let next = t.advance(1e-4).unwrap();
        assert!(next.distance(&here) < 1e-2);
    }

    #[test]
    fn retarget_without_velocity_restarts_from_current() {
        let mut t = tween();
        t.start(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        t.advance(0.1);
        let here = t.value();
        t.retarget(here, Vec3::new(-4.0, 0.0, 0.0), false);
        assert_eq!(t.value(), here);
        // Plain power2.out launch toward the new target
        assert!(t.velocity().x < 0.0);
    }

    #[test]
    fn retargeted_tween_still_lands_on_target() {
        let mut t = tween();
        t.start(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        t.advance(0.2);
        let target = Vec3::new(1.0, 1.0, 1.0);
        t.retarget(t.value(), target, true);
        for _ in 0..60 {
            t.advance(DT);
        }
        assert_eq!(t.value(), target);
    }

    #[test]
    fn retarget_on_idle_tween_starts_fresh() {
        let mut t = tween();
        t.retarget(Vec3::ONE, Vec3::new(2.0, 2.0, 2.0), true);
        assert!(t.is_active());
        assert_eq!(t.value(), Vec3::ONE);
        assert!(t.velocity().x > 0.0);
    }

    #[test]
    fn cancel_freezes_in_place() {
        let mut t = tween();
        t.start(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        t.advance(0.1);
        let here = t.value();
        t.cancel();
        assert!(!t.is_active());
        assert_eq!(t.value(), here);
        assert_eq!(t.advance(DT), None);
    }

    #[test]
    fn config_defaults_match_showcase() {
        let config: TweenConfig = toml::from_str("").unwrap();
        assert_eq!(config.duration, 0.5);
        assert_eq!(config.ease, Ease::PowerOut(2));
        assert!(config.preserve_velocity);

        let config: TweenConfig = toml::from_str("ease = \"power3.inOut\"\nduration = 1.2").unwrap();
        assert_eq!(config.ease, Ease::PowerInOut(3));
        assert_eq!(config.duration, 1.2);
    }
}
