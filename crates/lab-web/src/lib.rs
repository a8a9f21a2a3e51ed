pub mod runner;

pub use runner::ViewerRunner;

// Used by `export_viewer!` in the invoking crate.
#[doc(hidden)]
pub use {console_error_panic_hook, console_log, log};

use lab_engine::ViewerConfig;
use wasm_bindgen::JsValue;

/// A JS function that receives picked object names.
pub struct JsPickObserver {
    callback: js_sys::Function,
}

impl JsPickObserver {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }

    /// Call the function with `name`. A throwing observer is logged and
    /// does not stop the others.
    pub fn notify(&self, name: &str) {
        if let Err(err) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(name)) {
            log::warn!("pick observer threw: {:?}", err);
        }
    }
}

/// An application that owns a [`ViewerRunner`] once the host creates one.
///
/// The application is created lazily on the first exported call, so
/// non-viewer exports work before `viewer_init`.
pub trait ViewerHost: Sized {
    /// Used in the initialization log message.
    const NAME: &'static str;

    fn create() -> Result<Self, JsValue>;

    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig::default()
    }

    fn attach_viewer(&mut self, runner: ViewerRunner);

    fn viewer(&mut self) -> Option<&mut ViewerRunner>;

    /// Called with every picked name after a tick, before JS observers.
    fn on_picks(&mut self, _names: &[String]) {}
}

/// Generate the `#[wasm_bindgen]` viewer exports for an application.
///
/// Generates:
/// - `thread_local!` storage for the application and the JS pick observers
/// - `with_app()` / `with_runner()` helpers returning `Result<_, JsValue>`
/// - `viewer_init`, `viewer_tick`, pointer/wheel/resize handlers,
///   `viewer_cleanup`, `viewer_subscribe_pick` and buffer accessors
///
/// Model loading exports stay in the application, built on `with_runner`.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use lab_engine::*;
/// use lab_web::{ViewerHost, ViewerRunner};
///
/// lab_web::export_viewer!(MyApp);
/// ```
#[macro_export]
macro_rules! export_viewer {
    ($app_type:ty) => {
        use std::cell::RefCell;

        thread_local! {
            static APP: RefCell<Option<$app_type>> = RefCell::new(None);
            static PICK_OBSERVERS: RefCell<Vec<$crate::JsPickObserver>> = RefCell::new(Vec::new());
        }

        fn with_app<R>(f: impl FnOnce(&mut $app_type) -> R) -> Result<R, JsValue> {
            APP.with(|cell| {
                let mut slot = cell.try_borrow_mut()
                    .map_err(|_| JsValue::from_str("re-entrant call into the application"))?;
                if slot.is_none() {
                    $crate::console_error_panic_hook::set_once();
                    let _ = $crate::console_log::init_with_level($crate::log::Level::Info);
                    *slot = Some(<$app_type as $crate::ViewerHost>::create()?);
                    $crate::log::info!("{}: initialized", <$app_type as $crate::ViewerHost>::NAME);
                }
                match slot.as_mut() {
                    Some(app) => Ok(f(app)),
                    None => Err(JsValue::from_str("application unavailable")),
                }
            })
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::ViewerRunner) -> R) -> Result<R, JsValue> {
            with_app(|app| <$app_type as $crate::ViewerHost>::viewer(app).map(f))?
                .ok_or_else(|| JsValue::from_str("viewer not initialized; call viewer_init() first"))
        }

        /// Drain picks out of the application, then notify JS observers
        /// with no borrow held.
        fn dispatch_picks() -> Result<(), JsValue> {
            let names = with_app(|app| {
                let names = <$app_type as $crate::ViewerHost>::viewer(app)
                    .map(|r| r.take_picks())
                    .unwrap_or_default();
                if !names.is_empty() {
                    <$app_type as $crate::ViewerHost>::on_picks(app, &names);
                }
                names
            })?;
            if !names.is_empty() {
                PICK_OBSERVERS.with(|observers| {
                    for name in &names {
                        for observer in observers.borrow().iter() {
                            observer.notify(name);
                        }
                    }
                });
            }
            Ok(())
        }

        #[wasm_bindgen]
        pub fn viewer_init(on_pick: js_sys::Function, width: f32, height: f32) -> Result<(), JsValue> {
            with_app(|app| {
                let mut config = <$app_type as $crate::ViewerHost>::viewer_config(app);
                config.width = width;
                config.height = height;
                config.seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
                <$app_type as $crate::ViewerHost>::attach_viewer(app, $crate::ViewerRunner::new(config));
            })?;
            PICK_OBSERVERS.with(|observers| {
                let mut observers = observers.borrow_mut();
                observers.clear();
                observers.push($crate::JsPickObserver::new(on_pick));
            });
            $crate::log::info!("viewer: initialized at {}x{}", width, height);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn viewer_subscribe_pick(observer: js_sys::Function) {
            PICK_OBSERVERS.with(|observers| {
                observers.borrow_mut().push($crate::JsPickObserver::new(observer));
            });
        }

        #[wasm_bindgen]
        pub fn viewer_tick(dt: f32) -> Result<(), JsValue> {
            with_runner(|r| r.tick(dt))?;
            dispatch_picks()
        }

        #[wasm_bindgen]
        pub fn viewer_cleanup() -> Result<u32, JsValue> {
            with_runner(|r| r.cleanup() as u32)
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_down(x: f32, y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }))
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_up(x: f32, y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }))
        }

        #[wasm_bindgen]
        pub fn viewer_pointer_move(x: f32, y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }))
        }

        /// `delta_y` as reported by the DOM wheel event (positive = away from the user).
        #[wasm_bindgen]
        pub fn viewer_wheel(delta_y: f32) -> Result<(), JsValue> {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta: -delta_y / 100.0 }))
        }

        #[wasm_bindgen]
        pub fn viewer_resize(width: f32, height: f32) -> Result<(), JsValue> {
            with_runner(|r| r.resize(width, height))
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> Result<*const f32, JsValue> {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> Result<u32, JsValue> {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_opaque_split() -> Result<u32, JsValue> {
            with_runner(|r| r.opaque_split())
        }

        #[wasm_bindgen]
        pub fn get_instance_floats() -> Result<Vec<f32>, JsValue> {
            with_runner(|r| r.instance_floats())
        }

        #[wasm_bindgen]
        pub fn get_instance_stride() -> u32 {
            lab_engine::MeshInstance::FLOATS as u32
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> Result<*const f32, JsValue> {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_camera_floats() -> Result<Vec<f32>, JsValue> {
            with_runner(|r| r.camera_floats())
        }

        #[wasm_bindgen]
        pub fn get_model_title() -> Result<Option<String>, JsValue> {
            with_runner(|r| r.title().map(str::to_string))
        }
    };
}
