//! The live scene object driven by scroll

use crate::types::{Transform, Vec3};
use std::collections::BTreeMap;

/// Anything with a mutable position and rotation.
///
/// The transform applicator only needs this much of an object, so hosts can
/// drive their own scene-graph nodes without going through `SceneObject`.
pub trait TransformTarget {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Vec3);
}

/// A loaded model: a root transform plus named child nodes posed by clips.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    nodes: BTreeMap<String, Transform>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            nodes: BTreeMap::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Add a child node with its rest transform.
    pub fn with_node(mut self, name: impl Into<String>, transform: Transform) -> Self {
        self.nodes.insert(name.into(), transform);
        self
    }

    pub fn node(&self, name: &str) -> Option<&Transform> {
        self.nodes.get(name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Transform> {
        self.nodes.get_mut(name)
    }

    /// Node names in sorted order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl TransformTarget for SceneObject {
    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
    }
}

impl TransformTarget for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Vec3 {
        self.rotation
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }
}
