pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod picking;

// Re-export key types at crate root for convenience
pub use api::model::{CameraView, EngineContext, MeshDesc, ModelBuilder};
pub use api::types::{EntityId, PickHit};
pub use api::viewer::{Viewer, ViewerConfig};
pub use components::entity::Entity;
pub use components::mesh::{Color, Geometry, Material, MeshComponent};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use renderer::camera::{CameraUniform, OrbitCamera};
pub use input::picker::{Picker, PickObserver, HIGHLIGHT_COLOR};
pub use input::pointer::{PointerAction, PointerTracker};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::registry::{GeometryHandle, MaterialHandle, ResourcePool};
pub use picking::ray::Ray;
pub use systems::animation::{tick_animators, Animatable, Spin, REFERENCE_FPS};
pub use systems::render::build_render_buffer;

// Scene hierarchy
pub use extensions::{TransformGraph, LocalTransform};
