//! Glide Core - Foundational types for the Glide engine
//!
//! This crate provides the types every other Glide crate depends on:
//! - `Vec3`, `Transform` - Spatial types (Euler rotations in radians)
//! - `SceneObject`, `TransformTarget` - The live object driven by scroll
//! - Error types and Result alias

mod error;
mod scene;
mod types;

pub use error::{GlideError, Result};
pub use scene::{SceneObject, TransformTarget};
pub use types::{Transform, Vec3};
