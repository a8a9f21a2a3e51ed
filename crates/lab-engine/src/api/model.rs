use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::assets::registry::ResourcePool;
use crate::components::entity::Entity;
use crate::components::mesh::{Geometry, Material, MeshComponent};
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::systems::animation::Animatable;

/// Camera placement a model asks for when it is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub target: Vec3,
    pub distance: f32,
    pub elevation: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 50.0,
            elevation: 0.3,
        }
    }
}

/// The contract every explorable model fulfills.
pub trait ModelBuilder {
    /// Display title, forwarded to the tutor as context for picks.
    fn title(&self) -> &str;

    /// Initial camera placement.
    fn camera_view(&self) -> CameraView {
        CameraView::default()
    }

    /// Populate an empty context with the model's objects and animators.
    fn build(&self, ctx: &mut EngineContext);
}

/// Description of a mesh entity to spawn.
#[derive(Debug, Clone)]
pub struct MeshDesc {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub local: LocalTransform,
    pub parent: Option<EntityId>,
    pub pickable: bool,
}

impl MeshDesc {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            local: LocalTransform::default(),
            parent: None,
            pickable: false,
        }
    }

    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.local.translation = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.local.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.local.scale = scale;
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Register the spawned entity as an active (pickable) object.
    pub fn pickable(mut self) -> Self {
        self.pickable = true;
        self
    }
}

/// Mutable access to the scene being built and animated.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub resources: ResourcePool,
    pub rng: Rng,
    /// Entities eligible for pointer-ray intersection, in registration order.
    active: Vec<EntityId>,
    animators: Vec<Box<dyn Animatable>>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(seed: u64) -> Self {
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            resources: ResourcePool::new(),
            rng: Rng::new(seed),
            active: Vec::new(),
            animators: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a transform-only node (group or pivot).
    pub fn spawn_group(
        &mut self,
        name: impl Into<String>,
        local: LocalTransform,
        parent: Option<EntityId>,
    ) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(Entity::new(id).with_name(name));
        self.attach(id, local, parent);
        id
    }

    /// Spawn a mesh entity, allocating its geometry and material.
    pub fn spawn_mesh(&mut self, desc: MeshDesc) -> EntityId {
        let id = self.next_id();
        let mesh = MeshComponent {
            geometry: desc.geometry,
            material: desc.material,
            geometry_handle: self.resources.create_geometry(desc.geometry),
            material_handle: self.resources.create_material(desc.material),
        };
        self.scene.spawn(Entity::new(id).with_name(desc.name).with_mesh(mesh));
        self.attach(id, desc.local, desc.parent);
        if desc.pickable {
            self.register_active(id);
        }
        id
    }

    /// Spawn a point cloud. The local positions are relative to the entity.
    pub fn spawn_points(
        &mut self,
        name: impl Into<String>,
        points: Vec<Vec3>,
        size: f32,
        material: Material,
    ) -> EntityId {
        let geometry = Geometry::Points { size };
        let id = self.next_id();
        let mesh = MeshComponent {
            geometry,
            material,
            geometry_handle: self.resources.create_geometry(geometry),
            material_handle: self.resources.create_material(material),
        };
        self.scene.spawn(
            Entity::new(id)
                .with_name(name)
                .with_mesh(mesh)
                .with_points(points),
        );
        self.attach(id, LocalTransform::default(), None);
        id
    }

    fn attach(&mut self, id: EntityId, local: LocalTransform, parent: Option<EntityId>) {
        self.graph.insert(id, local, parent);
    }

    /// Register an entity (and, implicitly, its descendants) for picking.
    pub fn register_active(&mut self, id: EntityId) {
        if !self.active.contains(&id) {
            self.active.push(id);
            if let Some(entity) = self.scene.get_mut(id) {
                entity.pickable = true;
            }
        }
    }

    pub fn active_objects(&self) -> &[EntityId] {
        &self.active
    }

    /// Attach a per-frame behavior.
    pub fn animate(&mut self, animator: impl Animatable + 'static) {
        self.animators.push(Box::new(animator));
    }

    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }

    /// Split borrow used by the render loop.
    pub fn animators_and_graph(&mut self) -> (&mut [Box<dyn Animatable>], &mut TransformGraph) {
        (self.animators.as_mut_slice(), &mut self.graph)
    }

    /// Dispose every mesh resource and drop all objects, animators and
    /// hierarchy data. The RNG and ID counter carry on so later loads
    /// differ from earlier ones.
    /// Returns the number of resource handles released.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        let entities: Vec<Entity> = self.scene.drain().collect();
        for entity in entities {
            if let Some(mesh) = entity.mesh {
                released += self.resources.dispose_geometry(mesh.geometry_handle) as usize;
                released += self.resources.dispose_material(mesh.material_handle) as usize;
            }
        }
        // Anything allocated outside a mesh entity is released too.
        released += self.resources.dispose_all();
        self.graph.clear();
        self.active.clear();
        self.animators.clear();
        released
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(42)
    }
}
