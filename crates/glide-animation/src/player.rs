//! Clip library and the scroll-scrubbed animation player

use crate::clip::{AnimationClip, TrackTarget};
use crate::sampler::sample_track;
use glide_core::{GlideError, Result, SceneObject, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A player whose time cursor can be set directly.
///
/// The transform applicator drives clips through this, so any player that
/// can be scrubbed and ticked works.
pub trait ClipCursor {
    /// Clip length in seconds
    fn duration(&self) -> f64;
    /// Current cursor position in seconds
    fn time(&self) -> f64;
    /// Move the cursor. Out-of-range times are resolved on the next `update`.
    fn set_time(&mut self, time: f64);
    /// Advance the playback clock by `dt` seconds and re-evaluate the clip.
    fn update(&mut self, dt: f64);
}

/// Clips that came with a model, in file order and by name.
#[derive(Debug, Default)]
pub struct ClipLibrary {
    clips: Vec<AnimationClip>,
    by_name: HashMap<String, usize>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip. Replaces any existing clip with the same name in place.
    pub fn add_clip(&mut self, clip: AnimationClip) {
        if let Some(&i) = self.by_name.get(&clip.name) {
            self.clips[i] = clip;
        } else {
            self.by_name.insert(clip.name.clone(), self.clips.len());
            self.clips.push(clip);
        }
    }

    pub fn get_clip(&self, name: &str) -> Option<&AnimationClip> {
        self.by_name.get(name).map(|&i| &self.clips[i])
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn first(&self) -> Option<&AnimationClip> {
        self.clips.first()
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.iter().map(|c| c.name.as_str())
    }

    /// Pick the clip named `name`, or the first clip when no name is given.
    ///
    /// `Ok(None)` means the library is empty.
    pub fn select(&self, name: Option<&str>) -> Result<Option<&AnimationClip>> {
        match name {
            Some(name) => self
                .get_clip(name)
                .map(Some)
                .ok_or_else(|| GlideError::ClipNotFound(name.to_string())),
            None => Ok(self.first()),
        }
    }
}

impl FromIterator<AnimationClip> for ClipLibrary {
    fn from_iter<I: IntoIterator<Item = AnimationClip>>(iter: I) -> Self {
        let mut library = ClipLibrary::new();
        for clip in iter {
            library.add_clip(clip);
        }
        library
    }
}

/// What happens when the cursor runs off either end of the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Play through once and stop at the end
    #[default]
    Once,
    /// Wrap around
    Repeat,
}

/// Playback state of one clip.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Current playback time in seconds
    pub time: f64,
    /// Playback speed multiplier (1.0 = normal)
    pub speed: f64,
    pub loop_mode: LoopMode,
    /// Hold the last pose after a one-shot clip finishes instead of
    /// releasing the nodes back to rest
    pub clamp_when_finished: bool,
    /// Whether `play` has been called
    pub playing: bool,
    /// A paused clip keeps its cursor while the clock runs
    pub paused: bool,
    /// A one-shot clip has reached an end
    pub finished: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
            loop_mode: LoopMode::Once,
            clamp_when_finished: false,
            playing: false,
            paused: false,
            finished: false,
        }
    }
}

impl PlaybackState {
    /// Whether the clip currently poses its nodes.
    pub fn is_enabled(&self) -> bool {
        self.playing && !(self.finished && !self.clamp_when_finished)
    }
}

/// Advance a playback state by `dt` seconds and resolve the cursor against
/// the clip's loop policy.
pub fn advance(state: &mut PlaybackState, clip: &AnimationClip, dt: f64) {
    if state.playing && !state.paused {
        state.time += dt * state.speed;
    }
    if !state.time.is_finite() {
        state.time = 0.0;
    }

    match state.loop_mode {
        LoopMode::Repeat => {
            state.finished = false;
            if clip.duration > 0.0 {
                if state.time >= clip.duration {
                    state.time %= clip.duration;
                } else if state.time < 0.0 {
                    state.time = clip.duration - (-state.time % clip.duration);
                    if state.time >= clip.duration {
                        state.time = 0.0;
                    }
                }
            } else {
                state.time = 0.0;
            }
        }
        LoopMode::Once => {
            if state.time >= clip.duration {
                state.time = clip.duration;
                state.finished = true;
            } else if state.time < 0.0 {
                state.time = 0.0;
                state.finished = true;
            } else {
                state.finished = false;
            }
        }
    }
}

/// One sampled channel of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSample {
    pub node: String,
    pub target: TrackTarget,
    pub value: Vec3,
}

/// The clip evaluated at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pose {
    pub samples: Vec<TrackSample>,
}

impl Pose {
    /// Sample every track of `clip` at `time`.
    pub fn sample(clip: &AnimationClip, time: f64) -> Self {
        let samples = clip
            .tracks
            .iter()
            .filter_map(|track| {
                sample_track(track, time).map(|value| TrackSample {
                    node: track.node.clone(),
                    target: track.target,
                    value,
                })
            })
            .collect();
        Self { samples }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Write the pose onto the object's child nodes. Tracks naming a node
    /// the object does not have are skipped. Returns how many channels were
    /// written.
    pub fn apply_to(&self, object: &mut SceneObject) -> usize {
        let mut written = 0;
        for sample in &self.samples {
            let Some(node) = object.node_mut(&sample.node) else {
                continue;
            };
            match sample.target {
                TrackTarget::Position => node.position = sample.value,
                TrackTarget::Rotation => node.rotation = sample.value,
                TrackTarget::Scale => node.scale = sample.value,
            }
            written += 1;
        }
        written
    }
}

/// Evaluates one clip for one object.
///
/// The playback clock only moves forward, once per frame. The cursor is
/// owned by whoever drives the player: it advances with the clock only
/// while playing and not paused.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: AnimationClip,
    state: PlaybackState,
    clock: f64,
    pose: Pose,
}

impl AnimationPlayer {
    pub fn new(clip: AnimationClip) -> Self {
        let pose = Pose::sample(&clip, 0.0);
        Self {
            clip,
            state: PlaybackState::default(),
            clock: 0.0,
            pose,
        }
    }

    /// Configure the loop policy.
    pub fn set_loop(&mut self, mode: LoopMode, clamp_when_finished: bool) {
        self.state.loop_mode = mode;
        self.state.clamp_when_finished = clamp_when_finished;
    }

    pub fn play(&mut self) {
        self.state.playing = true;
        self.state.finished = false;
    }

    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    pub fn resume(&mut self) {
        self.state.paused = false;
    }

    /// Stop playback and rewind.
    pub fn stop(&mut self) {
        self.state.playing = false;
        self.state.finished = false;
        self.state.time = 0.0;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = speed;
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Total time the playback clock has run, in seconds.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// The pose from the last `update`. Empty while the clip is disabled.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }
}

impl ClipCursor for AnimationPlayer {
    fn duration(&self) -> f64 {
        self.clip.duration
    }

    fn time(&self) -> f64 {
        self.state.time
    }

    fn set_time(&mut self, time: f64) {
        self.state.time = time;
    }

    fn update(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;
        advance(&mut self.state, &self.clip, dt);
        self.pose = if self.state.is_enabled() {
            Pose::sample(&self.clip, self.state.time)
        } else {
            Pose::default()
        };
    }
}
