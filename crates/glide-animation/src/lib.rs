//! Scroll-driven animation for Glide
//!
//! Turns a one-dimensional scroll fraction into motion of a 3D model:
//! - `KeyframeSequence` - pure scroll fraction → (position, rotation) interpolation
//! - `TransformApplicator` - eased, retargetable tween of the object plus direct
//!   clip scrubbing
//! - `AnimationPlayer` - evaluates the model's baked clip at the scrubbed time
//! - `ScrollScene` - mount/unmount lifecycle wiring, as a `RuntimeSystem`

pub mod applicator;
pub mod clip;
pub mod config;
pub mod ease;
pub mod keyframes;
pub mod loader;
pub mod player;
pub mod sampler;
pub mod scene;
pub mod tween;

pub use applicator::TransformApplicator;
pub use config::{load_config_from_file, SceneConfig};
pub use keyframes::{BoundaryPolicy, Keyframe, KeyframeSequence, TargetTransform};
pub use player::{AnimationPlayer, ClipCursor};
pub use scene::{SceneAsset, ScrollScene};
