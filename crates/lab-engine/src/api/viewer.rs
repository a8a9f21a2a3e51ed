use glam::Vec2;
use crate::api::model::{EngineContext, ModelBuilder};
use crate::api::types::{EntityId, PickHit};
use crate::components::mesh::Color;
use crate::input::picker::{Picker, HIGHLIGHT_COLOR};
use crate::input::pointer::{PointerAction, PointerTracker};
use crate::input::queue::InputEvent;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::instance::RenderBuffer;
use crate::systems::animation::tick_animators;
use crate::systems::render::build_render_buffer;

/// Configuration for the viewer, provided by the host.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// Vertical field of view in degrees (default: 75).
    pub fov_degrees: f32,
    /// Fraction of pending camera motion applied per frame (default: 0.05).
    pub damping: f32,
    /// Emissive color written into picked meshes.
    pub highlight_color: Color,
    /// Seed for randomized scene content.
    pub seed: u64,
    /// Frames longer than this (seconds) are clamped, e.g. after a
    /// background tab resumes.
    pub max_frame_dt: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fov_degrees: 75.0,
            damping: 0.05,
            highlight_color: HIGHLIGHT_COLOR,
            seed: 42,
            max_frame_dt: 0.1,
        }
    }
}

/// One 3D viewport: the scene being explored, its camera, and the
/// pick/highlight state.
pub struct Viewer {
    config: ViewerConfig,
    ctx: EngineContext,
    camera: OrbitCamera,
    picker: Picker,
    pointer: PointerTracker,
    buffer: RenderBuffer,
    title: Option<String>,
    frame_count: u64,
}

impl Viewer {
    /// Create a viewer. `on_pick` receives the name of every picked object.
    pub fn new(mut config: ViewerConfig, on_pick: impl FnMut(&str) + 'static) -> Self {
        let mut camera = OrbitCamera::new(config.width, config.height);
        camera.fov_y = config.fov_degrees.to_radians();
        camera.damping = config.damping;
        config.width = camera.screen_width;
        config.height = camera.screen_height;

        let mut picker = Picker::new(config.highlight_color);
        picker.subscribe(on_pick);

        Self {
            ctx: EngineContext::new(config.seed),
            camera,
            picker,
            pointer: PointerTracker::new(),
            buffer: RenderBuffer::new(),
            title: None,
            frame_count: 0,
            config,
        }
    }

    /// Replace the current scene with the one `builder` produces.
    pub fn load(&mut self, builder: &dyn ModelBuilder) {
        self.cleanup();

        builder.build(&mut self.ctx);
        let view = builder.camera_view();
        self.camera.set_view(view.target, view.distance, view.elevation);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        build_render_buffer(self.ctx.scene.iter(), &mut self.buffer);
        self.title = Some(builder.title().to_string());

        log::info!(
            "Loaded {}: {} objects, {} active, {} animators",
            builder.title(),
            self.ctx.scene.len(),
            self.ctx.active_objects().len(),
            self.ctx.animator_count(),
        );
    }

    /// Tear down the current scene and dispose its resources.
    /// Returns the number of resource handles released.
    pub fn cleanup(&mut self) -> usize {
        self.picker.reset();
        let released = self.ctx.clear();
        self.buffer.clear();
        if let Some(title) = self.title.take() {
            log::info!("Cleaned up {title}: released {released} resources");
        }
        released
    }

    /// Advance one display frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.config.max_frame_dt) } else { 0.0 };

        if self.camera.is_moving() {
            self.camera.update();
        }
        let (animators, graph) = self.ctx.animators_and_graph();
        tick_animators(animators, dt, graph);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        build_render_buffer(self.ctx.scene.iter(), &mut self.buffer);
        self.frame_count += 1;
    }

    /// Apply one pointer event. Returns the hit when the event completed a click.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<PickHit> {
        let action = match event {
            InputEvent::PointerDown { x, y } => self.pointer.on_pointer_down(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer.on_pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer.on_pointer_up(Vec2::new(x, y)),
            InputEvent::Wheel { delta } => {
                self.camera.zoom(delta);
                PointerAction::None
            }
        };

        match action {
            PointerAction::Orbit(delta) => {
                self.camera.orbit(delta.x, delta.y);
                None
            }
            PointerAction::Click(pos) => self.click(pos),
            PointerAction::None => None,
        }
    }

    /// Pick at a screen position.
    pub fn click(&mut self, screen: Vec2) -> Option<PickHit> {
        self.picker.click(screen, &self.camera, &mut self.ctx)
    }

    /// Add another pick observer.
    pub fn subscribe_pick(&mut self, observer: impl FnMut(&str) + 'static) {
        self.picker.subscribe(observer);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_screen_size(width, height);
        self.config.width = self.camera.screen_width;
        self.config.height = self.camera.screen_height;
    }

    /// Title of the loaded model.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn highlighted(&self) -> Option<EntityId> {
        self.picker.highlighted()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.buffer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
