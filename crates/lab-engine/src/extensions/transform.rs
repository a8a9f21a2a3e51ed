// extensions/transform.rs
//
// Scene hierarchy for pivots, orbits and nested bodies. Each node owns its
// local transform; `propagate` writes the composed matrix into Entity.world.
//
// Nodes are stored in insertion order and a parent must be inserted before
// its children, so propagation is a single forward pass with no recursion:
//
//   graph.insert(pivot, LocalTransform::new(), None);
//   graph.insert(planet, LocalTransform::from_translation(Vec3::X * 10.0), Some(pivot));
//   if let Some(local) = graph.local_mut(pivot) { local.rotate_local(Vec3::Y, 0.01); }
//   graph.propagate(&mut scene);

use std::collections::HashMap;
use glam::{Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Translation, rotation and scale relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::default() }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotate about an axis expressed in this node's own frame.
    pub fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Debug, Clone)]
struct Node {
    id: EntityId,
    /// Index of the parent in `nodes`; always smaller than this node's index.
    parent: Option<usize>,
    children: Vec<usize>,
    local: LocalTransform,
}

#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: Vec<Node>,
    index: HashMap<EntityId, usize>,
    /// Scratch world matrices, parallel to `nodes`.
    worlds: Vec<Mat4>,
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent`, or as a root when `parent` is `None`.
    ///
    /// Re-inserting an existing id only replaces its local transform. An
    /// unknown parent is logged and the node becomes a root.
    pub fn insert(&mut self, id: EntityId, local: LocalTransform, parent: Option<EntityId>) {
        if let Some(&i) = self.index.get(&id) {
            self.nodes[i].local = local;
            self.dirty = true;
            return;
        }

        let parent_index = parent.and_then(|p| {
            let found = self.index.get(&p).copied();
            if found.is_none() {
                log::warn!("transform: parent {:?} of {:?} is not in the graph", p, id);
            }
            found
        });

        let i = self.nodes.len();
        if let Some(p) = parent_index {
            self.nodes[p].children.push(i);
        }
        self.nodes.push(Node { id, parent: parent_index, children: Vec::new(), local });
        self.worlds.push(Mat4::IDENTITY);
        self.index.insert(id, i);
        self.dirty = true;
    }

    pub fn local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.index.get(&id).map(|&i| &self.nodes[i].local)
    }

    /// Mutable local transform. Marks the graph for propagation.
    pub fn local_mut(&mut self, id: EntityId) -> Option<&mut LocalTransform> {
        let i = *self.index.get(&id)?;
        self.dirty = true;
        Some(&mut self.nodes[i].local)
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        let i = *self.index.get(&id)?;
        self.nodes[i].parent.map(|p| self.nodes[p].id)
    }

    pub fn children(&self, id: EntityId) -> Vec<EntityId> {
        match self.index.get(&id) {
            Some(&i) => self.nodes[i].children.iter().map(|&c| self.nodes[c].id).collect(),
            None => Vec::new(),
        }
    }

    /// `id` followed by all of its descendants, depth first. Just `[id]`
    /// for an entity outside the graph.
    pub fn subtree(&self, id: EntityId) -> Vec<EntityId> {
        let Some(&start) = self.index.get(&id) else { return vec![id] };
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            out.push(self.nodes[i].id);
            stack.extend(self.nodes[i].children.iter().rev());
        }
        out
    }

    /// Recompute world matrices and write them into the scene. Skipped when
    /// nothing changed since the last call.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for (i, node) in self.nodes.iter().enumerate() {
            let parent_world = node.parent.map_or(Mat4::IDENTITY, |p| self.worlds[p]);
            let world = parent_world * node.local.matrix();
            self.worlds[i] = world;
            if let Some(entity) = scene.get_mut(node.id) {
                entity.world = world;
            }
        }

        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.worlds.clear();
        self.dirty = false;
    }
}
