//! Per-frame behaviors attached to scene nodes.
//!
//! Every animated node registers one [`Animatable`]; the render loop ticks the
//! whole list each frame before propagating transforms.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::extensions::transform::TransformGraph;

/// Reference frame rate the per-frame increments are tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

/// A per-frame behavior. Implementors mutate local transforms in the graph.
pub trait Animatable {
    /// Advance by `dt` seconds.
    fn tick(&mut self, dt: f32, graph: &mut TransformGraph);
}

/// Constant rotation about a local axis. Used for orbit pivots (which carry
/// their children around the center) and for self-spinning bodies.
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    pub target: EntityId,
    pub axis: Vec3,
    /// Radians per reference frame.
    pub per_frame: f32,
}

impl Spin {
    pub fn new(target: EntityId, axis: Vec3, per_frame: f32) -> Self {
        Self {
            target,
            axis: axis.normalize_or_zero(),
            per_frame,
        }
    }

    /// Spin about the local Y axis.
    pub fn about_y(target: EntityId, per_frame: f32) -> Self {
        Self::new(target, Vec3::Y, per_frame)
    }
}

impl Animatable for Spin {
    fn tick(&mut self, dt: f32, graph: &mut TransformGraph) {
        if self.axis == Vec3::ZERO {
            return;
        }
        let angle = self.per_frame * dt * REFERENCE_FPS;
        if let Some(local) = graph.local_mut(self.target) {
            local.rotate_local(self.axis, angle);
        }
    }
}

/// Tick every animator once.
///
/// Call this once per frame before propagating transforms.
pub fn tick_animators(animators: &mut [Box<dyn Animatable>], dt: f32, graph: &mut TransformGraph) {
    for animator in animators.iter_mut() {
        animator.tick(dt, graph);
    }
}
