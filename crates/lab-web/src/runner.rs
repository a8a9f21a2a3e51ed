use std::cell::RefCell;
use std::rc::Rc;
use glam::Vec2;
use lab_engine::{
    CameraUniform, InputEvent, InputQueue, ModelBuilder, PickHit, Viewer, ViewerConfig,
};

/// Drives a [`Viewer`] from the browser's animation callback.
///
/// Pointer events are queued as they arrive and applied at the start of the
/// next tick, so a click is never handled in the middle of a frame. Pick
/// names are collected in an outbox the host drains after the tick returns,
/// which lets JS observers call back into the wasm module freely.
pub struct ViewerRunner {
    viewer: Viewer,
    input: InputQueue,
    picks: Rc<RefCell<Vec<String>>>,
    camera_uniform: CameraUniform,
}

impl ViewerRunner {
    pub fn new(config: ViewerConfig) -> Self {
        let picks = Rc::new(RefCell::new(Vec::new()));
        let outbox = picks.clone();
        let viewer = Viewer::new(config, move |name| outbox.borrow_mut().push(name.to_string()));
        let camera_uniform = viewer.camera().uniform();
        Self {
            viewer,
            input: InputQueue::new(),
            picks,
            camera_uniform,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, then advance the viewer.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.viewer.handle_input(event);
        }
        self.viewer.frame(dt);
        self.camera_uniform = self.viewer.camera().uniform();
    }

    /// Rebuild the scene. Queued pointer events targeted the old scene and
    /// are dropped.
    pub fn load(&mut self, builder: &dyn ModelBuilder) {
        self.input.drain();
        self.viewer.load(builder);
        self.camera_uniform = self.viewer.camera().uniform();
    }

    pub fn cleanup(&mut self) -> usize {
        self.input.drain();
        self.viewer.cleanup()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewer.resize(width, height);
        self.camera_uniform = self.viewer.camera().uniform();
    }

    /// Names picked since the last call, oldest first.
    pub fn take_picks(&mut self) -> Vec<String> {
        std::mem::take(&mut *self.picks.borrow_mut())
    }

    /// Add an in-process pick observer.
    pub fn subscribe_pick(&mut self, observer: impl FnMut(&str) + 'static) {
        self.viewer.subscribe_pick(observer);
    }

    /// Pick at a screen position immediately, bypassing the queue.
    pub fn click(&mut self, screen: Vec2) -> Option<PickHit> {
        self.viewer.click(screen)
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn title(&self) -> Option<&str> {
        self.viewer.title()
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    // ---- Pointer accessors for host-side reads of wasm memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.viewer.render_buffer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.viewer.render_buffer().instance_count()
    }

    pub fn opaque_split(&self) -> u32 {
        self.viewer.render_buffer().opaque_split
    }

    pub fn instance_floats(&self) -> Vec<f32> {
        self.viewer.render_buffer().as_floats().to_vec()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn camera_floats(&self) -> Vec<f32> {
        bytemuck::cast_slice::<CameraUniform, f32>(std::slice::from_ref(&self.camera_uniform)).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_engine::{CameraView, Color, EngineContext, Geometry, Material, MeshDesc};
    use glam::Vec3;

    struct Ball;

    impl ModelBuilder for Ball {
        fn title(&self) -> &str {
            "Ball"
        }

        fn camera_view(&self) -> CameraView {
            CameraView { target: Vec3::ZERO, distance: 20.0, elevation: 0.0 }
        }

        fn build(&self, ctx: &mut EngineContext) {
            ctx.spawn_mesh(
                MeshDesc::new("Nucleus", Geometry::Sphere { radius: 3.0 }, Material::standard(Color::WHITE))
                    .pickable(),
            );
        }
    }

    fn runner() -> ViewerRunner {
        let mut r = ViewerRunner::new(ViewerConfig::default());
        r.load(&Ball);
        r
    }

    #[test]
    fn clicks_apply_on_next_tick() {
        let mut r = runner();
        r.push_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        r.push_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        assert!(r.take_picks().is_empty());
        assert_eq!(r.pending_input(), 2);

        r.tick(1.0 / 60.0);
        assert_eq!(r.pending_input(), 0);
        assert_eq!(r.take_picks(), vec!["Nucleus".to_string()]);
        assert!(r.take_picks().is_empty());
    }

    #[test]
    fn load_drops_stale_input() {
        let mut r = runner();
        r.push_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        r.push_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        r.load(&Ball);
        r.tick(1.0 / 60.0);
        assert!(r.take_picks().is_empty());
    }

    #[test]
    fn buffers_are_exposed() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.instance_floats().len(), lab_engine::MeshInstance::FLOATS);
        assert_eq!(r.camera_floats().len(), 20);
        assert_eq!(r.title(), Some("Ball"));
    }

    #[test]
    fn cleanup_empties_the_scene() {
        let mut r = runner();
        assert_eq!(r.cleanup(), 2);
        assert_eq!(r.instance_count(), 0);
        assert_eq!(r.title(), None);
    }
}
