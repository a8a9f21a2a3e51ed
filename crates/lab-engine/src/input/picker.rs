//! Pointer picking and single-object highlighting.
//!
//! A click casts a ray from the camera through the pointer, tests it against
//! every active object and its descendants, and reports the nearest named
//! mesh. At most one mesh carries the highlight at a time: its original
//! emissive color is saved and restored before the next pick.

use std::collections::HashSet;
use glam::Vec2;
use crate::api::model::EngineContext;
use crate::api::types::{EntityId, PickHit};
use crate::components::mesh::Color;
use crate::core::scene::Scene;
use crate::picking::ray::Ray;
use crate::renderer::camera::OrbitCamera;

/// Emissive color written into a picked mesh.
pub const HIGHLIGHT_COLOR: Color = Color::from_hex(0x555555);

/// Callback invoked with the name of every picked object.
pub type PickObserver = Box<dyn FnMut(&str)>;

#[derive(Debug, Clone, Copy)]
struct SavedHighlight {
    id: EntityId,
    original: Color,
}

pub struct Picker {
    highlight_color: Color,
    saved: Option<SavedHighlight>,
    observers: Vec<PickObserver>,
}

impl Picker {
    pub fn new(highlight_color: Color) -> Self {
        Self {
            highlight_color,
            saved: None,
            observers: Vec::new(),
        }
    }

    /// Add an observer. Every observer sees every hit, in subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(&str) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Entity currently carrying the highlight.
    pub fn highlighted(&self) -> Option<EntityId> {
        self.saved.map(|s| s.id)
    }

    /// Restore the highlighted mesh's original emissive color.
    pub fn clear_highlight(&mut self, scene: &mut Scene) {
        let Some(saved) = self.saved.take() else { return };
        if let Some(mesh) = scene.get_mut(saved.id).and_then(|e| e.mesh.as_mut()) {
            if mesh.material.supports_emissive() {
                mesh.material.emissive = Some(saved.original);
            }
        }
    }

    /// Forget the highlight without touching the scene. Used after the scene
    /// it pointed into has been torn down.
    pub fn reset(&mut self) {
        self.saved = None;
    }

    /// Nearest named mesh hit by `ray` among the active objects and their
    /// descendants. Returns the entity and the distance along the ray.
    pub fn raycast(&self, ray: &Ray, ctx: &EngineContext) -> Option<(EntityId, f32)> {
        let mut visited = HashSet::new();
        let mut nearest: Option<(EntityId, f32)> = None;

        for &root in ctx.active_objects() {
            for id in ctx.graph.subtree(root) {
                if !visited.insert(id) {
                    continue;
                }
                let Some(entity) = ctx.scene.get(id) else { continue };
                let Some(mesh) = &entity.mesh else { continue };
                if entity.name.is_empty() || !entity.has_valid_transform() {
                    continue;
                }

                // Cheap reject on the world bounding sphere first.
                let radius = mesh.geometry.bounding_radius() * entity.world_max_scale();
                if ray.intersect_sphere(entity.world_position(), radius).is_none() {
                    continue;
                }

                let local = ray.transformed(&entity.world.inverse());
                if let Some(t) = local.intersect_geometry(&mesh.geometry) {
                    if nearest.map_or(true, |(_, best)| t < best) {
                        nearest = Some((id, t));
                    }
                }
            }
        }

        nearest
    }

    /// Handle a click at `screen` (pixels, origin top-left).
    ///
    /// The previous highlight is always cleared. On a hit the mesh is
    /// highlighted when its material has an emissive channel and every
    /// observer is notified. A miss notifies nobody.
    pub fn click(&mut self, screen: Vec2, camera: &OrbitCamera, ctx: &mut EngineContext) -> Option<PickHit> {
        self.clear_highlight(&mut ctx.scene);

        let ray = camera.ray(screen);
        let (id, distance) = self.raycast(&ray, ctx)?;
        let entity = ctx.scene.get_mut(id)?;

        let mut highlighted = false;
        if let Some(mesh) = entity.mesh.as_mut().filter(|m| m.material.supports_emissive()) {
            let original = mesh.material.emissive.unwrap_or(Color::BLACK);
            self.saved = Some(SavedHighlight { id, original });
            mesh.material.emissive = Some(self.highlight_color);
            highlighted = true;
        }

        let hit = PickHit {
            id,
            name: entity.name.clone(),
            distance,
            highlighted,
        };
        log::debug!("picked {} ({:?}) at {:.2}", hit.name, hit.id, hit.distance);

        for observer in self.observers.iter_mut() {
            observer(&hit.name);
        }
        Some(hit)
    }
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(HIGHLIGHT_COLOR)
    }
}
