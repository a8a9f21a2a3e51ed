use glam::{Mat4, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Fat Entity: one struct with optional components.
/// Entities without a mesh act as groups (pivots) in the transform hierarchy.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Semantic name reported by picking. Empty names are never reported.
    pub name: String,
    /// World transform, written by `TransformGraph::propagate`.
    pub world: Mat4,
    /// Mesh component. Entities without one are invisible.
    pub mesh: Option<MeshComponent>,
    /// Local-space point positions for point-cloud meshes.
    pub points: Option<Vec<Vec3>>,
    /// Whether the entity was registered as an active (pickable) object.
    pub pickable: bool,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            world: Mat4::IDENTITY,
            mesh: None,
            points: None,
            pickable: false,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_points(mut self, points: Vec<Vec3>) -> Self {
        self.points = Some(points);
        self
    }

    /// World-space position (translation column of the world matrix).
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// Largest world-space scale factor across the three axes.
    pub fn world_max_scale(&self) -> f32 {
        let x = self.world.x_axis.truncate().length();
        let y = self.world.y_axis.truncate().length();
        let z = self.world.z_axis.truncate().length();
        x.max(y).max(z)
    }

    /// A transform is usable if it is finite and not collapsed to zero scale.
    pub fn has_valid_transform(&self) -> bool {
        self.world.is_finite() && self.world.determinant().abs() > f32::EPSILON
    }
}
