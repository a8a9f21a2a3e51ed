/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Result of a successful pick: the nearest named mesh under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    /// Entity that was hit.
    pub id: EntityId,
    /// Semantic name of the hit entity (never empty).
    pub name: String,
    /// World-space distance from the camera to the hit point.
    pub distance: f32,
    /// Whether the hit entity was visually highlighted.
    pub highlighted: bool,
}
