use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use lab_engine::*;

// Static data
mod catalog;
mod error;

// 3D models
mod models;

// Simulations
mod circuits;
mod quiz;
mod waves;

// Tutor
mod tutor;

// Application controller
mod app;

use app::ScienceLab;
use catalog::Tab;
use models::ModelKind;
use tutor::JsChatService;

lab_web::export_viewer!(ScienceLab);

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js)
}

// ---- Navigation ----

#[wasm_bindgen]
pub fn modules_json() -> Result<String, JsValue> {
    with_app(|app| app.catalog().modules_json().map_err(to_js))?
}

/// Open a module and return its descriptor as JSON.
#[wasm_bindgen]
pub fn open_module(id: &str) -> Result<String, JsValue> {
    with_app(|app| app.open_module(id).map_err(to_js).and_then(to_json))?
}

#[wasm_bindgen]
pub fn go_home() -> Result<(), JsValue> {
    with_app(|app| app.go_home())
}

/// Switch tab by its kebab-case name (`"ohms-law"`, `"quiz"`, ...).
#[wasm_bindgen]
pub fn select_tab(tab: &str) -> Result<(), JsValue> {
    let tab: Tab = serde_json::from_value(serde_json::Value::String(tab.to_string())).map_err(to_js)?;
    with_app(|app| app.set_tab(tab))
}

#[wasm_bindgen]
pub fn nav_state() -> Result<String, JsValue> {
    with_app(|app| to_json(&app.nav_state()))?
}

// ---- 3D models ----

#[wasm_bindgen]
pub fn load_solar_system() -> Result<(), JsValue> {
    with_app(|app| app.load_model(ModelKind::SolarSystem))
}

#[wasm_bindgen]
pub fn load_dna_model() -> Result<(), JsValue> {
    with_app(|app| app.load_model(ModelKind::Dna))
}

#[wasm_bindgen]
pub fn load_neon_atom_model() -> Result<(), JsValue> {
    with_app(|app| app.load_model(ModelKind::NeonAtom))
}

// ---- Simulations ----

/// Current and power for the circuit panel, as JSON.
#[wasm_bindgen]
pub fn ohms_law(voltage: f32, resistance: f32) -> Result<String, JsValue> {
    let reading = circuits::ohms_law(voltage, resistance);
    to_json(&serde_json::json!({
        "reading": reading,
        "current_label": reading.current_label(),
        "power_label": reading.power_label(),
    }))
}

/// Slider bounds for the circuit panel: `{"voltage":[min,max],"resistance":[min,max]}`.
#[wasm_bindgen]
pub fn ohms_law_ranges() -> Result<String, JsValue> {
    to_json(&serde_json::json!({
        "voltage": circuits::VOLTAGE_RANGE,
        "resistance": circuits::RESISTANCE_RANGE,
    }))
}

/// SVG path data for both field curves. `steps == 0` uses the default.
#[wasm_bindgen]
pub fn em_wave_paths(frequency: f32, amplitude: f32, steps: u32) -> Result<String, JsValue> {
    let steps = if steps == 0 { waves::DEFAULT_STEPS } else { steps as usize };
    let paths = waves::EmWave::new(frequency, amplitude).paths(steps);
    to_json(&waves::WaveDrawing::from(&paths))
}

// ---- Quiz ----

#[wasm_bindgen]
pub fn quiz_start() -> Result<String, JsValue> {
    with_app(|app| {
        app.quiz_mut().start();
        to_json(&app.quiz().snapshot())
    })?
}

/// Submit the selected option (`undefined` when nothing is selected).
/// Rejections come back as errors and leave the quiz unchanged.
#[wasm_bindgen]
pub fn quiz_submit(option: Option<u32>) -> Result<String, JsValue> {
    with_app(|app| {
        let answer = app.quiz_mut().submit(option.map(|o| o as usize)).map_err(to_js)?;
        to_json(&serde_json::json!({
            "answer": answer,
            "state": app.quiz().snapshot(),
        }))
    })?
}

#[wasm_bindgen]
pub fn quiz_state() -> Result<String, JsValue> {
    with_app(|app| to_json(&app.quiz().snapshot()))?
}

// ---- Tutor ----

/// Start a tutor session backed by `send_fn(request_json) -> Promise<string>`.
#[wasm_bindgen]
pub fn tutor_init(send_fn: js_sys::Function) -> Result<(), JsValue> {
    with_app(|app| app.init_tutor(Rc::new(JsChatService::new(send_fn))).map_err(to_js))?
}

#[cfg(feature = "gemini")]
#[wasm_bindgen]
pub fn tutor_init_gemini(api_key: String) -> Result<(), JsValue> {
    with_app(|app| app.init_tutor(Rc::new(tutor::GeminiService::new(api_key))).map_err(to_js))?
}

/// Await a pending reply and record it. Resolves with the assistant text.
fn finish_reply(pending: tutor::PendingReply) -> js_sys::Promise {
    future_to_promise(async move {
        let result = pending.await;
        let reply = with_app(|app| app.tutor_mut().map(|t| t.complete(result).text.clone()))?
            .map_err(to_js)?;
        Ok(JsValue::from_str(&reply))
    })
}

#[wasm_bindgen]
pub fn tutor_send(text: &str) -> Result<js_sys::Promise, JsValue> {
    let pending = with_app(|app| app.tutor_mut().and_then(|t| t.submit(text)))?.map_err(to_js)?;
    Ok(finish_reply(pending))
}

/// Ask the tutor about a picked object in the current model.
#[wasm_bindgen]
pub fn tutor_ask_about(name: &str) -> Result<js_sys::Promise, JsValue> {
    let pending = with_app(|app| app.ask_about(name))?.map_err(to_js)?;
    Ok(finish_reply(pending))
}

#[wasm_bindgen]
pub fn tutor_is_busy() -> Result<bool, JsValue> {
    with_app(|app| app.tutor().is_some_and(|t| t.is_busy()))
}

#[wasm_bindgen]
pub fn tutor_history_json() -> Result<String, JsValue> {
    with_app(|app| match app.tutor() {
        Some(t) => t.history_json().map_err(to_js),
        None => Ok("[]".to_string()),
    })?
}
