//! Drives the live object and its clip from interpolated scroll targets

use crate::keyframes::TargetTransform;
use crate::player::ClipCursor;
use crate::tween::{TransformTween, TweenConfig};
use glide_core::TransformTarget;
use tracing::debug;

/// Applies scroll targets to an object (tweened) and a clip (immediate).
///
/// Either collaborator may be missing while the model is still loading;
/// the missing half is skipped silently.
#[derive(Debug, Clone)]
pub struct TransformApplicator {
    tween: TransformTween,
    preserve_velocity: bool,
}

impl TransformApplicator {
    pub fn new(config: &TweenConfig) -> Self {
        Self {
            tween: TransformTween::new(config),
            preserve_velocity: config.preserve_velocity,
        }
    }

    /// Start (or redirect) the transition toward `target`, and scrub the
    /// clip to `fraction` of its duration.
    ///
    /// The fraction is not clamped here; the player's loop policy resolves
    /// out-of-range cursor times.
    pub fn apply<O, P>(
        &mut self,
        target: &TargetTransform,
        fraction: f64,
        object: Option<&mut O>,
        player: Option<&mut P>,
    ) where
        O: TransformTarget + ?Sized,
        P: ClipCursor + ?Sized,
    {
        match object {
            Some(object) => {
                self.tween
                    .position
                    .retarget(object.position(), target.position, self.preserve_velocity);
                self.tween
                    .rotation
                    .retarget(object.rotation(), target.rotation, self.preserve_velocity);
            }
            None => debug!("apply skipped: object not loaded"),
        }

        match player {
            Some(player) => {
                player.set_time(fraction * player.duration());
                player.update(0.0);
            }
            None => debug!("clip scrub skipped: no animation player"),
        }
    }

    /// Advance the in-flight transition and the player's clock by one frame.
    pub fn tick<O, P>(&mut self, dt: f64, object: Option<&mut O>, player: Option<&mut P>)
    where
        O: TransformTarget + ?Sized,
        P: ClipCursor + ?Sized,
    {
        let position = self.tween.position.advance(dt);
        let rotation = self.tween.rotation.advance(dt);
        if let Some(object) = object {
            if let Some(position) = position {
                object.set_position(position);
            }
            if let Some(rotation) = rotation {
                object.set_rotation(rotation);
            }
        }
        if let Some(player) = player {
            player.update(dt);
        }
    }

    /// Drop any transition in flight. The object keeps its last written transform.
    pub fn cancel(&mut self) {
        self.tween.cancel();
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_active()
    }

    pub fn tween(&self) -> &TransformTween {
        &self.tween
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::Ease;
    use glide_core::{SceneObject, Transform, Vec3};

    /// Minimal cursor recording what the applicator did to it.
    #[derive(Default)]
    struct Cursor {
        duration: f64,
        time: f64,
        updates: Vec<f64>,
    }

    impl ClipCursor for Cursor {
        fn duration(&self) -> f64 {
            self.duration
        }
        fn time(&self) -> f64 {
            self.time
        }
        fn set_time(&mut self, time: f64) {
            self.time = time;
        }
        fn update(&mut self, dt: f64) {
            self.updates.push(dt);
        }
    }

    fn applicator() -> TransformApplicator {
        TransformApplicator::new(&TweenConfig::default())
    }

    fn target(x: f32, ry: f32) -> TargetTransform {
        TargetTransform {
            position: Vec3::new(x, 0.0, 0.0),
            rotation: Vec3::new(0.0, ry, 0.0),
        }
    }

    #[test]
    fn clip_time_is_fraction_of_duration() {
        let mut app = applicator();
        let mut cursor = Cursor {
            duration: 2.0,
            ..Default::default()
        };
        app.apply(&target(0.0, 0.0), 0.3, None::<&mut SceneObject>, Some(&mut cursor));
        assert!((cursor.time - 0.6).abs() < 1e-12);
        assert_eq!(cursor.updates, vec![0.0]);
    }

    #[test]
    fn clip_time_is_not_clamped_by_the_applicator() {
        let mut app = applicator();
        let mut cursor = Cursor {
            duration: 2.0,
            ..Default::default()
        };
        app.apply(&target(0.0, 0.0), 1.5, None::<&mut SceneObject>, Some(&mut cursor));
        assert_eq!(cursor.time, 3.0);
    }

    #[test]
    fn object_moves_only_on_ticks() {
        let mut app = applicator();
        let mut object = SceneObject::new("laptop");
        app.apply(&target(4.0, 1.0), 0.0, Some(&mut object), None::<&mut Cursor>);
        assert_eq!(object.transform.position, Vec3::ZERO);
        assert!(app.is_animating());

        app.tick(0.25, Some(&mut object), None::<&mut Cursor>);
        assert!((object.transform.position.x - 3.5).abs() < 1e-5);
        assert!((object.transform.rotation.y - 0.875).abs() < 1e-5);

        app.tick(0.25, Some(&mut object), None::<&mut Cursor>);
        assert_eq!(object.transform.position, Vec3::new(4.0, 0.0, 0.0));
        assert!(!app.is_animating());
    }

    #[test]
    fn retarget_mid_flight_does_not_snap() {
        let mut app = applicator();
        let mut object = SceneObject::new("laptop");
        app.apply(&target(4.0, 0.0), 0.0, Some(&mut object), None::<&mut Cursor>);
        for _ in 0..6 {
            app.tick(1.0 / 60.0, Some(&mut object), None::<&mut Cursor>);
        }
        let before = object.transform.position;

        app.apply(&target(-4.0, 0.0), 0.0, Some(&mut object), None::<&mut Cursor>);
        assert_eq!(object.transform.position, before);
        app.tick(1e-3, Some(&mut object), None::<&mut Cursor>);
        assert!(object.transform.position.distance(&before) < 0.05);
        // Still heading the old way for a moment: velocity was preserved
        assert!(object.transform.position.x > before.x);
    }

    #[test]
    fn missing_collaborators_are_a_no_op() {
        let mut app = applicator();
        app.apply(&target(1.0, 1.0), 0.5, None::<&mut SceneObject>, None::<&mut Cursor>);
        app.tick(0.1, None::<&mut SceneObject>, None::<&mut Cursor>);
        assert!(!app.is_animating());
    }

    #[test]
    fn frame_ticks_advance_the_player_clock() {
        let mut app = applicator();
        let mut cursor = Cursor {
            duration: 1.0,
            ..Default::default()
        };
        app.tick(0.016, None::<&mut SceneObject>, Some(&mut cursor));
        app.tick(0.017, None::<&mut SceneObject>, Some(&mut cursor));
        assert_eq!(cursor.updates, vec![0.016, 0.017]);
    }

    #[test]
    fn cancel_leaves_object_where_it_was() {
        let mut app = TransformApplicator::new(&TweenConfig {
            duration: 1.0,
            ease: Ease::Linear,
            preserve_velocity: false,
        });
        let mut object = Transform::IDENTITY;
        app.apply(&target(10.0, 0.0), 0.0, Some(&mut object), None::<&mut Cursor>);
        app.tick(0.5, Some(&mut object), None::<&mut Cursor>);
        app.cancel();
        app.tick(0.5, Some(&mut object), None::<&mut Cursor>);
        assert!((object.position.x - 5.0).abs() < 1e-5);
    }
}
