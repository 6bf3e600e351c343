//! Scroll-driven scene lifecycle
//!
//! Owns the keyframes, the applicator, and (once it arrives) the model and
//! its animation player. Mounted on a `Host`, it listens to scroll and frame
//! events; unmounting releases both listeners, cancels the tween, and drops
//! the player.

use crate::applicator::TransformApplicator;
use crate::clip::AnimationClip;
use crate::config::SceneConfig;
use crate::keyframes::{KeyframeSequence, TargetTransform};
use crate::player::{AnimationPlayer, ClipCursor, ClipLibrary};
use glide_core::{Result, SceneObject};
use glide_runtime::{Registrar, RuntimeSystem, ScrollState};
use std::any::Any;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::{debug, info, warn};

/// A loaded model and the clips baked into it.
#[derive(Debug, Clone)]
pub struct SceneAsset {
    pub object: SceneObject,
    pub clips: Vec<AnimationClip>,
}

struct LoadedModel {
    object: SceneObject,
    /// Node transforms as loaded, restored when the clip lets go
    rest: SceneObject,
    library: ClipLibrary,
    player: Option<AnimationPlayer>,
}

/// The laptop (or any model) whose transform and clip follow the scroll.
pub struct ScrollScene {
    config: SceneConfig,
    keyframes: KeyframeSequence,
    applicator: TransformApplicator,
    model: Option<LoadedModel>,
    assets: Option<Receiver<SceneAsset>>,
    scroll: Option<ScrollState>,
    last_target: Option<TargetTransform>,
    mounted: bool,
}

impl ScrollScene {
    /// Build a scene from a config. Fails on a degenerate keyframe set.
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let keyframes = config.keyframe_sequence()?;
        let applicator = TransformApplicator::new(&config.tween);
        Ok(Self {
            config,
            keyframes,
            applicator,
            model: None,
            assets: None,
            scroll: None,
            last_target: None,
            mounted: false,
        })
    }

    /// Channel a loader thread can deliver the model through.
    ///
    /// The asset is picked up on the next scroll or frame event.
    pub fn asset_sender(&mut self) -> Sender<SceneAsset> {
        let (tx, rx) = mpsc::channel();
        self.assets = Some(rx);
        tx
    }

    /// Hand over the loaded model directly.
    ///
    /// Clips that fail `AnimationClip::validate` are dropped with a warning.
    pub fn asset_loaded(&mut self, asset: SceneAsset) {
        let first = self.keyframes.keyframes()[0];
        let mut object = asset.object;
        object.transform.position = first.position;
        object.transform.rotation = first.rotation;
        object.transform.scale = self.config.model.scale;

        let library: ClipLibrary = asset
            .clips
            .into_iter()
            .filter(|clip| match clip.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("dropping clip: {}", e);
                    false
                }
            })
            .collect();
        info!(
            object = %object.name,
            clips = library.clip_count(),
            nodes = object.node_count(),
            "model loaded"
        );

        self.model = Some(LoadedModel {
            rest: object.clone(),
            object,
            library,
            player: None,
        });

        if self.mounted {
            self.start_player();
            self.apply_current();
        }
    }

    fn poll_assets(&mut self) {
        let Some(rx) = &self.assets else {
            return;
        };
        let mut latest = None;
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(asset) => latest = Some(asset),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        if disconnected {
            self.assets = None;
        }
        if let Some(asset) = latest {
            self.asset_loaded(asset);
        }
    }

    /// Build a fresh player for the configured clip: one shot, held at the
    /// end, started but paused so only the scroll moves its cursor.
    fn start_player(&mut self) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        let requested = self.config.clip.name.as_deref();
        let clip = match model.library.select(requested) {
            Ok(clip) => clip,
            Err(e) => {
                warn!("{}; falling back to the first clip", e);
                model.library.first()
            }
        };
        let Some(clip) = clip else {
            debug!("model has no clips; transform only");
            model.player = None;
            return;
        };

        let mut player = AnimationPlayer::new(clip.clone());
        player.set_loop(self.config.clip.loop_mode, self.config.clip.clamp_when_finished);
        player.play();
        player.pause();
        info!(clip = %clip.name, duration = clip.duration, "animation player ready");
        model.player = Some(player);
    }

    fn apply_current(&mut self) {
        if let Some(scroll) = self.scroll {
            self.apply_scroll(scroll.fraction());
        }
    }

    /// Interpolate the target for `fraction` and hand it to the applicator.
    pub fn apply_scroll(&mut self, fraction: f64) {
        let target = self.keyframes.interpolate(fraction);
        self.last_target = Some(target);
        let Some(model) = self.model.as_mut() else {
            debug!(fraction, "scroll before model loaded");
            return;
        };
        self.applicator
            .apply(&target, fraction, Some(&mut model.object), model.player.as_mut());
        model.sync_pose();
    }

    /// Advance tweens and the player clock by one frame.
    pub fn advance_frame(&mut self, dt: f64) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        self.applicator
            .tick(dt, Some(&mut model.object), model.player.as_mut());
        model.sync_pose();
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn keyframes(&self) -> &KeyframeSequence {
        &self.keyframes
    }

    pub fn object(&self) -> Option<&SceneObject> {
        self.model.as_ref().map(|m| &m.object)
    }

    pub fn player(&self) -> Option<&AnimationPlayer> {
        self.model.as_ref()?.player.as_ref()
    }

    /// Target from the most recent scroll application.
    pub fn last_target(&self) -> Option<TargetTransform> {
        self.last_target
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_animating(&self) -> bool {
        self.applicator.is_animating()
    }

    /// Clip cursor in seconds, if a player is running.
    pub fn clip_time(&self) -> Option<f64> {
        self.player().map(|p| p.time())
    }
}

impl LoadedModel {
    fn sync_pose(&mut self) {
        let Some(player) = &self.player else {
            return;
        };
        if player.is_enabled() {
            player.pose().apply_to(&mut self.object);
        } else {
            for name in self.rest.node_names() {
                if let (Some(node), Some(rest)) = (self.object.node_mut(name), self.rest.node(name)) {
                    *node = *rest;
                }
            }
        }
    }
}

impl RuntimeSystem for ScrollScene {
    fn mount(&mut self, registrar: &mut Registrar<'_>, scroll: &ScrollState) -> Result<()> {
        registrar.on_scroll();
        registrar.on_frame();
        self.mounted = true;
        self.scroll = Some(*scroll);
        self.poll_assets();
        // A model delivered before mounting gets its player now.
        if self.model.as_ref().is_some_and(|m| m.player.is_none()) {
            self.start_player();
        }
        self.apply_current();
        Ok(())
    }

    fn on_scroll(&mut self, scroll: &ScrollState) -> Result<()> {
        self.scroll = Some(*scroll);
        self.poll_assets();
        self.apply_scroll(scroll.fraction());
        Ok(())
    }

    fn on_frame(&mut self, dt: f64) -> Result<()> {
        self.poll_assets();
        self.advance_frame(dt);
        Ok(())
    }

    fn unmount(&mut self) -> Result<()> {
        self.applicator.cancel();
        if let Some(model) = self.model.as_mut() {
            model.player = None;
        }
        self.mounted = false;
        info!("scroll scene unmounted");
        Ok(())
    }

    fn name(&self) -> &str {
        "scroll_scene"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
